//! Column-level quality profile of an arbitrary CSV table.
//!
//! Used on the raw price history and on the forecast file. Nothing here
//! assumes a fixed schema; the `Date` and `Close` checks only run when those
//! columns exist.

use std::collections::HashSet;
use std::hash::Hash;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use stats::{find_min_max, mean, quantile_linear, sample_std, sorted_copy, IqrBounds};
use tracing::debug;

use crate::core::io::{first_out_of_order, open_csv, parse_date};
use crate::error::{Error, Result};

/// Field spellings treated as missing, in addition to the empty string.
pub const MISSING_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub const DATE_COLUMN: &str = "Date";
pub const CLOSE_COLUMN: &str = "Close";

pub fn is_missing(field: &str) -> bool {
    field.is_empty() || MISSING_MARKERS.contains(&field)
}

/// Inferred type of a column from its non-missing values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Date,
    Text,
    /// Every value is missing
    Empty,
}

impl ColumnKind {
    pub fn label(&self) -> &'static str {
        match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Date => "date",
            ColumnKind::Text => "text",
            ColumnKind::Empty => "empty",
        }
    }
}

/// count / mean / std / min / quartiles / max, as in a `describe()` table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; NaN below two values
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
    pub max: f64,
}

impl NumericSummary {
    pub fn describe(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let sorted = sorted_copy(values);
        let (min, max) = find_min_max(values);
        Some(Self {
            count: values.len(),
            mean: mean(values),
            std: sample_std(values),
            min,
            q25: quantile_linear(&sorted, 0.25),
            q50: quantile_linear(&sorted, 0.50),
            q75: quantile_linear(&sorted, 0.75),
            max,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnProfile {
    pub name: String,
    pub kind: ColumnKind,
    pub missing: usize,
    pub missing_pct: f64,
    /// Present only for numeric columns
    pub summary: Option<NumericSummary>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlierCount {
    pub bounds: IqrBounds,
    pub count: usize,
    pub pct: f64,
}

/// A CSV file held in memory as strings.
#[derive(Debug, Clone)]
pub struct Table {
    pub path: PathBuf,
    pub headers: Vec<String>,
    /// Rows padded or truncated to the header width
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = open_csv(path)?;
        let header_record = reader.headers().map_err(|e| Error::csv(path, e))?.clone();
        let headers: Vec<String> = header_record.iter().map(str::to_string).collect();
        let width = headers.len();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| Error::csv(path, e))?;
            if record.len() != width {
                debug!(line = rows.len() + 2, fields = record.len(), width, "ragged row");
            }
            let mut row: Vec<String> = record.iter().take(width).map(str::to_string).collect();
            row.resize(width, String::new());
            rows.push(row);
        }

        Ok(Self {
            path: path.to_path_buf(),
            headers,
            rows,
        })
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.headers.len())
    }

    pub fn head(&self, n: usize) -> &[Vec<String>] {
        &self.rows[..n.min(self.rows.len())]
    }

    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.headers.iter().position(|h| h == name)?;
        Some(self.rows.iter().map(|r| r[idx].as_str()).collect())
    }

    /// Non-missing values of a column that parse as numbers.
    pub fn numeric_column(&self, name: &str) -> Option<Vec<f64>> {
        let values = self.column(name)?;
        Some(
            values
                .into_iter()
                .filter(|v| !is_missing(v))
                .filter_map(|v| v.parse::<f64>().ok())
                .collect(),
        )
    }
}

/// Quality report for one table.
#[derive(Debug, Clone)]
pub struct TableProfile {
    pub table: Table,
    pub columns: Vec<ColumnProfile>,
    /// Earliest and latest parsed `Date`
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    /// Rows identical to some earlier row
    pub duplicate_rows: usize,
    /// Rows whose `Date` repeats an earlier one; None without a `Date` column
    pub duplicate_dates: Option<usize>,
    /// First row that breaks strictly ascending date order
    pub out_of_order: Option<usize>,
    /// IQR outliers on `Close` with interpolated quartiles
    pub close_outliers: Option<OutlierCount>,
}

impl TableProfile {
    pub fn build(table: Table) -> Self {
        let columns = table
            .headers
            .iter()
            .enumerate()
            .map(|(i, name)| profile_column(name, table.rows.iter().map(|r| r[i].as_str())))
            .collect();

        let dates = table.column(DATE_COLUMN);
        let date_range = dates.as_deref().and_then(parse_date_range);
        let duplicate_dates = dates.as_deref().map(count_duplicate_dates);
        let out_of_order = dates.as_deref().and_then(first_out_of_order);
        let duplicate_rows = count_duplicates(table.rows.iter());
        let close_outliers = table
            .numeric_column(CLOSE_COLUMN)
            .filter(|v| !v.is_empty())
            .map(|closes| count_close_outliers(&closes, table.rows.len()));

        Self {
            table,
            columns,
            date_range,
            duplicate_rows,
            duplicate_dates,
            out_of_order,
            close_outliers,
        }
    }

    /// Read and profile `path` in one step.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::build(Table::read(path)?))
    }

    /// Columns with at least one missing value.
    pub fn columns_with_missing(&self) -> impl Iterator<Item = &ColumnProfile> {
        self.columns.iter().filter(|c| c.missing > 0)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.table.headers.iter().any(|h| h == name)
    }
}

fn profile_column<'a>(name: &str, values: impl Iterator<Item = &'a str>) -> ColumnProfile {
    let values: Vec<&str> = values.collect();
    let present: Vec<&str> = values.iter().copied().filter(|v| !is_missing(v)).collect();
    let missing = values.len() - present.len();
    let missing_pct = if values.is_empty() {
        0.0
    } else {
        missing as f64 / values.len() as f64 * 100.0
    };

    let numbers: Option<Vec<f64>> = present.iter().map(|v| v.parse::<f64>().ok()).collect();
    let kind = if present.is_empty() {
        ColumnKind::Empty
    } else if numbers.is_some() {
        ColumnKind::Numeric
    } else if present.iter().all(|v| parse_date(v).is_some()) {
        ColumnKind::Date
    } else {
        ColumnKind::Text
    };

    let summary = match (kind, numbers) {
        (ColumnKind::Numeric, Some(numbers)) => NumericSummary::describe(&numbers),
        _ => None,
    };

    ColumnProfile {
        name: name.to_string(),
        kind,
        missing,
        missing_pct,
        summary,
    }
}

fn parse_date_range(dates: &[&str]) -> Option<(NaiveDate, NaiveDate)> {
    let mut parsed = dates.iter().filter_map(|d| parse_date(d));
    let first = parsed.next()?;
    Some(parsed.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
}

fn count_duplicates<T: Hash + Eq>(items: impl IntoIterator<Item = T>) -> usize {
    let mut seen = HashSet::new();
    let mut duplicates = 0;
    for item in items {
        if !seen.insert(item) {
            duplicates += 1;
        }
    }
    duplicates
}

/// Dates compare as calendar days when they parse, as raw text otherwise.
fn count_duplicate_dates(dates: &[&str]) -> usize {
    count_duplicates(
        dates
            .iter()
            .map(|d| parse_date(d).map_or_else(|| d.to_string(), |p| p.to_string())),
    )
}

fn count_close_outliers(closes: &[f64], row_count: usize) -> OutlierCount {
    let sorted = sorted_copy(closes);
    let bounds = IqrBounds::new(quantile_linear(&sorted, 0.25), quantile_linear(&sorted, 0.75));
    let count = closes.iter().filter(|&&c| bounds.is_outlier(c)).count();
    OutlierCount {
        bounds,
        count,
        pct: if row_count > 0 {
            count as f64 / row_count as f64 * 100.0
        } else {
            0.0
        },
    }
}
