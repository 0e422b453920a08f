//! Descriptive statistics over the raw price history.

use stats::{find_min_max, index_quantile, mean, population_std, sorted_copy, IqrBounds};

use crate::core::io::{closes, PriceRecord};
use crate::error::{Error, Result};
use crate::models::baseline::{Accuracy, RANDOM_CHANCE};

/// Rows compared at each end of the series for the long-run trend.
pub const TREND_WINDOW: usize = 100;

const MIN_ROWS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct BasicStats {
    pub count: usize,
    pub first_date: String,
    pub last_date: String,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub range: f64,
    /// Upper median, `sorted[n/2]`
    pub median: f64,
    /// Population standard deviation
    pub std_dev: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendStats {
    pub positive_days: usize,
    pub negative_days: usize,
    /// Share of return days that were positive, in percent
    pub positive_pct: f64,
    pub negative_pct: f64,
    /// Mean daily percent return
    pub mean_return_pct: f64,
    /// Rows actually averaged at each end; smaller than `TREND_WINDOW` for short series
    pub window: usize,
    pub first_avg: f64,
    pub last_avg: f64,
    pub change_pct: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutlierStats {
    pub bounds: IqrBounds,
    pub count: usize,
    pub pct: f64,
    /// Smallest and largest outlying price, if any
    pub range: Option<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VolatilityStats {
    pub mean_abs_change: f64,
    pub max_abs_change: f64,
    /// Population std of the daily percent returns
    pub return_std_pct: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VolumeStats {
    pub mean: f64,
    /// Days reporting zero volume, which includes days where it was missing
    pub zero_days: usize,
}

/// Everything the EDA stage reports.
#[derive(Debug, Clone, PartialEq)]
pub struct EdaReport {
    pub basic: BasicStats,
    pub trend: TrendStats,
    pub outliers: OutlierStats,
    pub volatility: VolatilityStats,
    pub direction: Accuracy,
    pub volume: VolumeStats,
}

impl EdaReport {
    pub fn beats_random(&self) -> bool {
        self.direction.percent > RANDOM_CHANCE
    }
}

/// Day-over-day percent returns; one shorter than `prices`.
pub fn daily_returns_pct(prices: &[f64]) -> Vec<f64> {
    prices
        .windows(2)
        .map(|w| (w[1] - w[0]) / w[0] * 100.0)
        .collect()
}

/// Price-direction persistence over the raw series.
///
/// For every `i` in `1..n-1`, predicts that the move from `i` to `i+1`
/// repeats the move from `i-1` to `i`. A flat day counts as "not up".
pub fn direction_persistence(prices: &[f64]) -> Accuracy {
    let correct = prices
        .windows(3)
        .filter(|w| (w[2] > w[1]) == (w[1] > w[0]))
        .count();
    Accuracy::from_counts(correct, prices.len().saturating_sub(2))
}

/// Run every EDA statistic over `records`.
pub fn analyze(records: &[PriceRecord]) -> Result<EdaReport> {
    let n = records.len();
    if n < MIN_ROWS {
        return Err(Error::InsufficientData {
            needed: MIN_ROWS,
            got: n,
        });
    }

    let prices = closes(records);
    let sorted = sorted_copy(&prices);
    let returns = daily_returns_pct(&prices);

    Ok(EdaReport {
        basic: basic_stats(records, &prices, &sorted),
        trend: trend_stats(&prices, &returns),
        outliers: outlier_stats(&prices, &sorted),
        volatility: volatility_stats(&prices, &returns),
        direction: direction_persistence(&prices),
        volume: volume_stats(records),
    })
}

fn basic_stats(records: &[PriceRecord], prices: &[f64], sorted: &[f64]) -> BasicStats {
    let (min, max) = find_min_max(prices);
    BasicStats {
        count: prices.len(),
        first_date: records[0].date.clone(),
        last_date: records[records.len() - 1].date.clone(),
        min,
        max,
        mean: mean(prices),
        range: max - min,
        median: index_quantile(sorted, 1, 2),
        std_dev: population_std(prices),
    }
}

fn trend_stats(prices: &[f64], returns: &[f64]) -> TrendStats {
    let positive_days = returns.iter().filter(|&&r| r > 0.0).count();
    let negative_days = returns.iter().filter(|&&r| r < 0.0).count();
    let days = returns.len() as f64;

    let window = TREND_WINDOW.min(prices.len());
    let first_avg = mean(&prices[..window]);
    let last_avg = mean(&prices[prices.len() - window..]);

    TrendStats {
        positive_days,
        negative_days,
        positive_pct: positive_days as f64 / days * 100.0,
        negative_pct: negative_days as f64 / days * 100.0,
        mean_return_pct: mean(returns),
        window,
        first_avg,
        last_avg,
        change_pct: (last_avg - first_avg) / first_avg * 100.0,
    }
}

fn outlier_stats(prices: &[f64], sorted: &[f64]) -> OutlierStats {
    let bounds = IqrBounds::new(index_quantile(sorted, 1, 4), index_quantile(sorted, 3, 4));
    let outliers = bounds.outliers(prices);
    let range = if outliers.is_empty() {
        None
    } else {
        Some(find_min_max(&outliers))
    };

    OutlierStats {
        bounds,
        count: outliers.len(),
        pct: outliers.len() as f64 / prices.len() as f64 * 100.0,
        range,
    }
}

fn volatility_stats(prices: &[f64], returns: &[f64]) -> VolatilityStats {
    let changes: Vec<f64> = prices.windows(2).map(|w| (w[1] - w[0]).abs()).collect();
    let (_, max_abs_change) = find_min_max(&changes);

    VolatilityStats {
        mean_abs_change: mean(&changes),
        max_abs_change,
        return_std_pct: population_std(returns),
    }
}

fn volume_stats(records: &[PriceRecord]) -> VolumeStats {
    let volumes: Vec<f64> = records.iter().map(|r| r.volume).collect();
    VolumeStats {
        mean: mean(&volumes),
        zero_days: volumes.iter().filter(|&&v| v == 0.0).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(closes: &[f64]) -> Vec<PriceRecord> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PriceRecord {
                date: format!("2020-01-{:02}", i + 1),
                close,
                volume: if i % 2 == 0 { 100.0 } else { 0.0 },
            })
            .collect()
    }

    #[test]
    fn test_requires_three_rows() {
        let err = analyze(&records(&[1.0, 2.0])).unwrap_err();
        assert!(matches!(err, Error::InsufficientData { needed: 3, got: 2 }));
        assert!(analyze(&records(&[1.0, 2.0, 3.0])).is_ok());
    }

    #[test]
    fn test_basic_stats() {
        let report = analyze(&records(&[10.0, 11.0, 9.0, 9.0, 12.0])).unwrap();
        let b = &report.basic;
        assert_eq!(b.count, 5);
        assert_eq!(b.first_date, "2020-01-01");
        assert_eq!(b.last_date, "2020-01-05");
        assert_eq!((b.min, b.max), (9.0, 12.0));
        assert!((b.mean - 10.2).abs() < 1e-10);
        assert!((b.range - 3.0).abs() < 1e-10);
        // sorted = [9, 9, 10, 11, 12]
        assert_eq!(b.median, 10.0);
        assert!((b.std_dev - 1.16619037896906).abs() < 1e-10);
    }

    #[test]
    fn test_trend_short_series_shrinks_window() {
        let report = analyze(&records(&[10.0, 11.0, 9.0, 9.0, 12.0])).unwrap();
        let t = &report.trend;
        assert_eq!(t.window, 5);
        assert_eq!(t.first_avg, t.last_avg);
        assert_eq!(t.change_pct, 0.0);
        assert_eq!(t.positive_days, 2);
        assert_eq!(t.negative_days, 1);
        assert!((t.positive_pct - 50.0).abs() < 1e-10);
    }

    #[test]
    fn test_trend_uses_both_ends() {
        let closes: Vec<f64> = (0..250).map(|i| if i < 150 { 10.0 } else { 20.0 }).collect();
        let report = analyze(&records(&closes)).unwrap();
        assert_eq!(report.trend.window, TREND_WINDOW);
        assert_eq!(report.trend.first_avg, 10.0);
        assert_eq!(report.trend.last_avg, 20.0);
        assert!((report.trend.change_pct - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_outliers() {
        let mut closes = vec![10.0; 19];
        closes.push(100.0);
        let report = analyze(&records(&closes)).unwrap();
        let o = &report.outliers;
        assert_eq!(o.bounds.iqr, 0.0);
        assert_eq!(o.count, 1);
        assert!((o.pct - 5.0).abs() < 1e-10);
        assert_eq!(o.range, Some((100.0, 100.0)));

        let flat = analyze(&records(&[5.0, 5.0, 5.0])).unwrap();
        assert_eq!(flat.outliers.count, 0);
        assert_eq!(flat.outliers.range, None);
    }

    #[test]
    fn test_volatility() {
        let report = analyze(&records(&[10.0, 11.0, 9.0, 9.0, 12.0])).unwrap();
        let v = &report.volatility;
        // changes = [1, 2, 0, 3]
        assert!((v.mean_abs_change - 1.5).abs() < 1e-10);
        assert_eq!(v.max_abs_change, 3.0);
        assert!(v.return_std_pct > 0.0);
    }

    #[test]
    fn test_direction_persistence() {
        // moves: up, down, flat, up -> pairs (up,down) (down,flat) (flat,up)
        // "not up" == "not up" only for (down, flat)
        let acc = direction_persistence(&[10.0, 11.0, 9.0, 9.0, 12.0]);
        assert_eq!(acc.as_tuple().1, 1);
        assert_eq!(acc.total, 3);

        let rising = direction_persistence(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(rising.percent, 100.0);
    }

    #[test]
    fn test_volume() {
        let report = analyze(&records(&[1.0, 2.0, 3.0, 4.0])).unwrap();
        assert_eq!(report.volume.zero_days, 2);
        assert!((report.volume.mean - 50.0).abs() < 1e-10);
    }
}
