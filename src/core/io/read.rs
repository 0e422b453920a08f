use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

use super::date::first_out_of_order;

/// One trading day of the raw price history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceRecord {
    /// Date exactly as written in the source file
    pub date: String,
    pub close: f64,
    /// 0.0 when the column is absent or the field does not parse
    pub volume: f64,
}

/// Position of a named column in a CSV header.
pub fn column_index(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

/// Open a CSV file with a header row.
///
/// Rows may have differing field counts; short rows simply lack the
/// trailing fields.
pub fn open_csv<P: AsRef<Path>>(path: P) -> Result<csv::Reader<File>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    Ok(ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(file))
}

/// Read the historical price file.
///
/// The header must contain `Date` and `Close`; `Volume` is optional. Rows
/// whose close is not a positive number and rows the CSV reader cannot
/// decode are skipped. An empty date is kept as an empty string. Row order
/// is preserved.
pub fn load_price_records<P: AsRef<Path>>(path: P) -> Result<Vec<PriceRecord>> {
    let path = path.as_ref();
    let mut reader = open_csv(path)?;

    let headers = reader.headers().map_err(|e| Error::csv(path, e))?.clone();
    let require = |name: &str| {
        column_index(&headers, name).ok_or_else(|| Error::MissingColumn {
            path: path.to_path_buf(),
            column: name.to_string(),
        })
    };
    let date_idx = require("Date")?;
    let close_idx = require("Close")?;
    let volume_idx = column_index(&headers, "Volume");

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (line, result) in reader.records().enumerate() {
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                debug!(line = line + 2, error = %e, "skipping undecodable row");
                skipped += 1;
                continue;
            }
        };

        match parse_price_row(&row, date_idx, close_idx, volume_idx) {
            Some(record) => records.push(record),
            None => {
                debug!(line = line + 2, "skipping row without a usable close");
                skipped += 1;
            }
        }
    }

    info!(path = %path.display(), rows = records.len(), skipped, "loaded price history");

    let dates: Vec<&str> = records.iter().map(|r| r.date.as_str()).collect();
    if let Some(i) = first_out_of_order(&dates) {
        warn!(
            row = i,
            date = %records[i].date,
            previous = %records[i - 1].date,
            "price history is not in strictly ascending date order"
        );
    }

    Ok(records)
}

fn parse_price_row(
    row: &StringRecord,
    date_idx: usize,
    close_idx: usize,
    volume_idx: Option<usize>,
) -> Option<PriceRecord> {
    let date = row.get(date_idx).unwrap_or_default();
    let close = row
        .get(close_idx)
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|c| c.is_finite() && *c > 0.0)?;
    let volume = volume_idx
        .and_then(|i| row.get(i))
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0);

    Some(PriceRecord {
        date: date.to_string(),
        close,
        volume,
    })
}

/// Closing prices in file order.
pub fn closes(records: &[PriceRecord]) -> Vec<f64> {
    records.iter().map(|r| r.close).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(lines: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file
    }

    #[test]
    fn test_load_price_records() {
        let file = csv_file(&[
            "Date,Open,High,Low,Close,Volume",
            "2020-01-02,17.9,18.1,17.8,18.05,1200",
            "2020-01-03,18.0,18.4,17.9,18.32,",
            "2020-01-06,18.3,18.6,18.2,18.51,n/a",
        ]);

        let records = load_price_records(file.path()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].date, "2020-01-02");
        assert!((records[0].close - 18.05).abs() < 1e-10);
        assert_eq!(records[0].volume, 1200.0);
        assert_eq!(records[1].volume, 0.0);
        assert_eq!(records[2].volume, 0.0);
    }

    #[test]
    fn test_non_numeric_close_is_skipped() {
        let file = csv_file(&[
            "Date,Close",
            "2020-01-02,18.05",
            "2020-01-03,null",
            "2020-01-06,",
            "2020-01-07,18.51",
        ]);

        let records = load_price_records(file.path()).unwrap();
        assert_eq!(closes(&records), vec![18.05, 18.51]);
    }

    #[test]
    fn test_empty_date_keeps_row() {
        let file = csv_file(&[
            "Date,Close",
            "2020-01-02,18.05",
            ",18.20",
            "2020-01-06,18.51",
        ]);

        let records = load_price_records(file.path()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].date, "");
        assert_eq!(closes(&records), vec![18.05, 18.20, 18.51]);
    }

    #[test]
    fn test_volume_column_optional() {
        let file = csv_file(&["Date,Close", "2020-01-02,18.05"]);
        let records = load_price_records(file.path()).unwrap();
        assert_eq!(records[0].volume, 0.0);
    }

    #[test]
    fn test_short_rows_are_skipped() {
        let file = csv_file(&["Date,Open,Close", "2020-01-02,18.0", "2020-01-03,18.0,18.2"]);
        let records = load_price_records(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, "2020-01-03");
    }

    #[test]
    fn test_missing_close_column() {
        let file = csv_file(&["Date,Price", "2020-01-02,18.05"]);
        let err = load_price_records(file.path()).unwrap_err();
        match err {
            Error::MissingColumn { column, .. } => assert_eq!(column, "Close"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = load_price_records("/nonexistent/silver.csv").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_empty_file_body() {
        let file = csv_file(&["Date,Close,Volume"]);
        assert!(load_price_records(file.path()).unwrap().is_empty());
    }
}
