//! Feature engineering over the daily price history.
//!
//! Produces one [`FeatureRow`] per price record. Window lengths are fixed:
//! SMA 5/20/50, RSI 14, Bollinger 20, momentum 5, volatility 30 and lags
//! 1/7/30. Rows without enough history carry the indicator placeholders
//! (0.0, or 50.0 for RSI) so the table stays aligned with its input.

use std::path::Path;

use csv::StringRecord;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use indicators::{
    bollinger_distance, lag, momentum, moving_average, returns, rolling_volatility, rsi,
    RSI_NEUTRAL,
};

use crate::core::io::{closes, column_index, ensure_parent_dir, open_csv, PriceRecord};
use crate::error::{Error, Result};

pub const SMA_WINDOWS: [usize; 3] = [5, 20, 50];
pub const RSI_PERIOD: usize = 14;
pub const BOLLINGER_PERIOD: usize = 20;
pub const MOMENTUM_WINDOW: usize = 5;
pub const VOLATILITY_WINDOW: usize = 30;
pub const LAGS: [usize; 3] = [1, 7, 30];

/// Header of the feature CSV, in column order.
pub const FEATURE_COLUMNS: [&str; 14] = [
    "date", "price", "return", "sma_5", "sma_20", "sma_50", "rsi", "bb_distance", "momentum",
    "volatility", "lag_1", "lag_7", "lag_30", "target",
];

/// Next-day direction label.
///
/// Written to CSV as `1` (up), `0` (down or unchanged) and `-1` when no next
/// day exists. `Unknown` is never a class; scorers must skip it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "f64")]
pub enum Target {
    Down,
    Up,
    Unknown,
}

impl Target {
    pub fn is_known(self) -> bool {
        self != Target::Unknown
    }

    pub fn label(self) -> i8 {
        match self {
            Target::Down => 0,
            Target::Up => 1,
            Target::Unknown => -1,
        }
    }
}

impl From<Target> for i8 {
    fn from(t: Target) -> i8 {
        t.label()
    }
}

impl TryFrom<f64> for Target {
    type Error = String;

    /// Accepts `1`, `0`, `-1` and their float spellings (`1.0`).
    fn try_from(value: f64) -> std::result::Result<Self, Self::Error> {
        match value {
            v if v == 1.0 => Ok(Target::Up),
            v if v == 0.0 => Ok(Target::Down),
            v if v == -1.0 => Ok(Target::Unknown),
            _ => Err(format!("target must be 1, 0 or -1, got {}", value)),
        }
    }
}

/// One day of engineered features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub date: String,
    pub price: f64,
    /// Daily percent return
    #[serde(rename = "return")]
    pub ret: f64,
    pub sma_5: f64,
    pub sma_20: f64,
    pub sma_50: f64,
    pub rsi: f64,
    pub bb_distance: f64,
    pub momentum: f64,
    pub volatility: f64,
    pub lag_1: f64,
    pub lag_7: f64,
    pub lag_30: f64,
    pub target: Target,
}

/// Up/down counts over the labelled rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetDistribution {
    pub up: usize,
    pub down: usize,
}

impl TargetDistribution {
    pub fn total(&self) -> usize {
        self.up + self.down
    }

    pub fn up_pct(&self) -> f64 {
        pct(self.up, self.total())
    }

    pub fn down_pct(&self) -> f64 {
        pct(self.down, self.total())
    }

    /// Classes differ by less than 10% of the labelled rows.
    pub fn is_balanced(&self) -> bool {
        (self.up.abs_diff(self.down) as f64) < self.total() as f64 * 0.1
    }
}

fn pct(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// Ordered feature rows, one per input price record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureTable {
    pub rows: Vec<FeatureRow>,
}

impl FeatureTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn target_distribution(&self) -> TargetDistribution {
        self.rows.iter().fold(TargetDistribution { up: 0, down: 0 }, |mut d, row| {
            match row.target {
                Target::Up => d.up += 1,
                Target::Down => d.down += 1,
                Target::Unknown => {}
            }
            d
        })
    }
}

/// Direction of the next close relative to today's.
///
/// `Up` when tomorrow is strictly higher, `Down` otherwise, and `Unknown`
/// for the last day.
pub fn direction_targets(prices: &[f64]) -> Vec<Target> {
    let mut targets: Vec<Target> = prices
        .windows(2)
        .map(|w| if w[1] > w[0] { Target::Up } else { Target::Down })
        .collect();

    if !prices.is_empty() {
        targets.push(Target::Unknown);
    }

    targets
}

/// Compute every feature column for the given price history.
pub fn build_features(records: &[PriceRecord]) -> FeatureTable {
    let prices = closes(records);

    debug!(n = prices.len(), "computing returns and moving averages");
    let ret = returns(&prices);
    let [sma_5, sma_20, sma_50] = SMA_WINDOWS.map(|w| moving_average(&prices, w));

    debug!("computing oscillators and volatility");
    let rsi_values = rsi(&prices, RSI_PERIOD);
    let bb = bollinger_distance(&prices, BOLLINGER_PERIOD);
    let mom = momentum(&prices, MOMENTUM_WINDOW);
    let vol = rolling_volatility(&prices, VOLATILITY_WINDOW);

    debug!("computing lags and targets");
    let [lag_1, lag_7, lag_30] = LAGS.map(|l| lag(&prices, l));
    let targets = direction_targets(&prices);

    let rows = records
        .iter()
        .enumerate()
        .map(|(i, record)| FeatureRow {
            date: record.date.clone(),
            price: record.close,
            ret: ret[i],
            sma_5: sma_5[i],
            sma_20: sma_20[i],
            sma_50: sma_50[i],
            rsi: rsi_values[i],
            bb_distance: bb[i],
            momentum: mom[i],
            volatility: vol[i],
            lag_1: lag_1[i],
            lag_7: lag_7[i],
            lag_30: lag_30[i],
            target: targets[i],
        })
        .collect();

    FeatureTable { rows }
}

/// Write the feature table as CSV, creating parent directories as needed.
///
/// The header is always written, even for an empty table.
pub fn write_features<P: AsRef<Path>>(path: P, table: &FeatureTable) -> Result<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| Error::csv(path, e))?;

    writer
        .write_record(FEATURE_COLUMNS)
        .map_err(|e| Error::csv(path, e))?;
    for row in &table.rows {
        writer.serialize(row).map_err(|e| Error::csv(path, e))?;
    }
    writer.flush().map_err(|e| Error::io(path, e))?;

    info!(path = %path.display(), rows = table.len(), "wrote feature table");
    Ok(())
}

/// Columns a feature file must carry for the baselines to run.
pub const REQUIRED_FEATURE_COLUMNS: [&str; 4] = ["date", "sma_5", "sma_20", "target"];

/// Read a feature table written by [`write_features`].
///
/// Every data row is kept in file order so split points and row adjacency
/// match the file. Fields that are absent or do not parse fall back to the
/// indicator placeholders; an unreadable target becomes [`Target::Unknown`],
/// which the scorers skip.
pub fn read_features<P: AsRef<Path>>(path: P) -> Result<FeatureTable> {
    let path = path.as_ref();
    let mut reader = open_csv(path)?;

    let headers = reader.headers().map_err(|e| Error::csv(path, e))?.clone();
    for column in REQUIRED_FEATURE_COLUMNS {
        if column_index(&headers, column).is_none() {
            return Err(Error::MissingColumn {
                path: path.to_path_buf(),
                column: column.to_string(),
            });
        }
    }

    let mut rows = Vec::new();
    let mut malformed_rows = 0usize;
    for (line, result) in reader.records().enumerate() {
        let record = result.map_err(|e| Error::csv(path, e))?;
        let (row, malformed) = parse_feature_row(&record, &headers);
        if malformed > 0 {
            debug!(line = line + 2, malformed, "feature row has unreadable fields");
            malformed_rows += 1;
        }
        rows.push(row);
    }

    info!(path = %path.display(), rows = rows.len(), malformed_rows, "loaded feature table");
    Ok(FeatureTable { rows })
}

/// Decode one record by header name. Returns the row and the number of
/// present fields that failed to parse.
fn parse_feature_row(record: &StringRecord, headers: &StringRecord) -> (FeatureRow, usize) {
    let field = |name: &str| column_index(headers, name).map(|i| record.get(i));

    let mut malformed = 0usize;
    let mut number = |name: &str, placeholder: f64| match field(name) {
        None => placeholder,
        Some(value) => match value.and_then(|s| s.parse::<f64>().ok()) {
            Some(v) => v,
            None => {
                malformed += 1;
                placeholder
            }
        },
    };

    let price = number("price", 0.0);
    let ret = number("return", 0.0);
    let sma_5 = number("sma_5", 0.0);
    let sma_20 = number("sma_20", 0.0);
    let sma_50 = number("sma_50", 0.0);
    let rsi = number("rsi", RSI_NEUTRAL);
    let bb_distance = number("bb_distance", 0.0);
    let momentum = number("momentum", 0.0);
    let volatility = number("volatility", 0.0);
    let lag_1 = number("lag_1", 0.0);
    let lag_7 = number("lag_7", 0.0);
    let lag_30 = number("lag_30", 0.0);
    let raw_target = number("target", -1.0);

    let target = Target::try_from(raw_target).unwrap_or_else(|_| {
        malformed += 1;
        Target::Unknown
    });
    let date = field("date").flatten().unwrap_or_default().to_string();

    let row = FeatureRow {
        date,
        price,
        ret,
        sma_5,
        sma_20,
        sma_50,
        rsi,
        bb_distance,
        momentum,
        volatility,
        lag_1,
        lag_7,
        lag_30,
        target,
    };
    (row, malformed)
}
