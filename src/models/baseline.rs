//! Chronological data split and naive directional baselines.

use crate::error::{Error, Result};
use crate::features::{FeatureRow, Target};

/// Accuracy reported when a baseline is compared against coin flipping.
pub const RANDOM_CHANCE: f64 = 50.0;

/// Three contiguous, order-preserving partitions of a time series.
#[derive(Debug, Clone, Copy)]
pub struct DataSplit<'a, T> {
    pub train: &'a [T],
    pub val: &'a [T],
    pub test: &'a [T],
}

impl<T> DataSplit<'_, T> {
    /// Total rows across the three partitions.
    pub fn len(&self) -> usize {
        self.train.len() + self.val.len() + self.test.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Partitions paired with their display names, in time order.
    pub fn named(&self) -> [(&'static str, &[T]); 3] {
        [("Train", self.train), ("Val", self.val), ("Test", self.test)]
    }
}

/// Split `rows` by position into train/validation/test without shuffling.
///
/// Cut points are `floor(n * train_pct)` and `floor(n * (train_pct + val_pct))`;
/// the test partition takes whatever remains.
pub fn split_chronological<T>(rows: &[T], train_pct: f64, val_pct: f64) -> Result<DataSplit<'_, T>> {
    if !(0.0..=1.0).contains(&train_pct) || !(0.0..=1.0).contains(&val_pct) {
        return Err(Error::InvalidSplit(format!(
            "fractions must lie in [0, 1], got train={} val={}",
            train_pct, val_pct
        )));
    }
    if train_pct + val_pct > 1.0 {
        return Err(Error::InvalidSplit(format!(
            "train + val exceeds 1 ({})",
            train_pct + val_pct
        )));
    }

    let n = rows.len();
    let train_end = ((n as f64 * train_pct) as usize).min(n);
    let val_end = ((n as f64 * (train_pct + val_pct)) as usize).clamp(train_end, n);

    Ok(DataSplit {
        train: &rows[..train_end],
        val: &rows[train_end..val_end],
        test: &rows[val_end..],
    })
}

/// Directional accuracy of a baseline over one partition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accuracy {
    /// Percentage of scored rows predicted correctly; 0 when nothing was scored
    pub percent: f64,
    pub correct: usize,
    pub total: usize,
}

impl Accuracy {
    pub fn from_counts(correct: usize, total: usize) -> Self {
        let percent = if total > 0 {
            correct as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        Self { percent, correct, total }
    }

    pub fn as_tuple(&self) -> (f64, usize, usize) {
        (self.percent, self.correct, self.total)
    }
}

/// Persistence baseline: tomorrow moves the same way as today.
///
/// Row `i` is predicted with the target of row `i-1`. Pairs where either
/// target is the end-of-series sentinel are not scored.
pub fn naive_persistence(rows: &[FeatureRow]) -> Accuracy {
    let (correct, total) = rows
        .windows(2)
        .filter(|w| w[0].target.is_known() && w[1].target.is_known())
        .fold((0, 0), |(correct, total), w| {
            (correct + usize::from(w[0].target == w[1].target), total + 1)
        });

    Accuracy::from_counts(correct, total)
}

/// Moving-average crossover baseline: predict up when SMA5 is above SMA20.
///
/// Rows with the sentinel target, or with either average still at its 0.0
/// placeholder, are not scored.
pub fn moving_average_crossover(rows: &[FeatureRow]) -> Accuracy {
    let (correct, total) = rows
        .iter()
        .filter(|r| r.target.is_known() && r.sma_5 != 0.0 && r.sma_20 != 0.0)
        .fold((0, 0), |(correct, total), r| {
            let prediction = if r.sma_5 > r.sma_20 { Target::Up } else { Target::Down };
            (correct + usize::from(prediction == r.target), total + 1)
        });

    Accuracy::from_counts(correct, total)
}

/// One baseline scored on each partition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitScores {
    pub train: Accuracy,
    pub val: Accuracy,
    pub test: Accuracy,
}

impl SplitScores {
    fn score(split: &DataSplit<'_, FeatureRow>, f: fn(&[FeatureRow]) -> Accuracy) -> Self {
        Self {
            train: f(split.train),
            val: f(split.val),
            test: f(split.test),
        }
    }

    pub fn named(&self) -> [(&'static str, Accuracy); 3] {
        [("Train", self.train), ("Val", self.val), ("Test", self.test)]
    }
}

/// Both baselines over a split, plus the summary figures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaselineReport {
    pub persistence: SplitScores,
    pub crossover: SplitScores,
}

impl BaselineReport {
    pub fn evaluate(split: &DataSplit<'_, FeatureRow>) -> Self {
        Self {
            persistence: SplitScores::score(split, naive_persistence),
            crossover: SplitScores::score(split, moving_average_crossover),
        }
    }

    /// Higher of the two test-set accuracies; the threshold later models must beat.
    pub fn best_test_accuracy(&self) -> f64 {
        self.persistence.test.percent.max(self.crossover.test.percent)
    }

    /// Percentage points between the best baseline and `target`.
    /// Negative when the baseline already beats the target.
    pub fn gap_to(&self, target: f64) -> f64 {
        target - self.best_test_accuracy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(target: i8, sma_5: f64, sma_20: f64) -> FeatureRow {
        FeatureRow {
            date: String::new(),
            price: 10.0,
            ret: 0.0,
            sma_5,
            sma_20,
            sma_50: 0.0,
            rsi: 50.0,
            bb_distance: 0.0,
            momentum: 0.0,
            volatility: 0.0,
            lag_1: 0.0,
            lag_7: 0.0,
            lag_30: 0.0,
            target: Target::try_from(target as f64).unwrap(),
        }
    }

    fn rows_from_targets(targets: &[i8]) -> Vec<FeatureRow> {
        targets.iter().map(|&t| row(t, 0.0, 0.0)).collect()
    }

    #[test]
    fn test_split_sizes() {
        let data: Vec<usize> = (0..100).collect();
        let split = split_chronological(&data, 0.70, 0.15).unwrap();
        assert_eq!(split.train.len(), 70);
        assert_eq!(split.val.len(), 15);
        assert_eq!(split.test.len(), 15);
        assert_eq!(split.len(), 100);
    }

    #[test]
    fn test_split_is_contiguous() {
        for n in [0, 1, 2, 3, 7, 10, 33, 101, 2517] {
            let data: Vec<usize> = (0..n).collect();
            let split = split_chronological(&data, 0.70, 0.15).unwrap();
            assert_eq!(split.len(), n);

            let rejoined: Vec<usize> = split
                .train
                .iter()
                .chain(split.val)
                .chain(split.test)
                .copied()
                .collect();
            assert_eq!(rejoined, data);

            assert_eq!(split.train.len(), (n as f64 * 0.70) as usize);
            assert_eq!(split.train.len() + split.val.len(), (n as f64 * 0.85) as usize);
        }
    }

    #[test]
    fn test_split_rejects_bad_fractions() {
        let data = vec![1, 2, 3];
        assert!(matches!(split_chronological(&data, 0.9, 0.2), Err(Error::InvalidSplit(_))));
        assert!(split_chronological(&data, -0.1, 0.2).is_err());
        assert!(split_chronological(&data, 0.5, 1.5).is_err());
        assert!(split_chronological(&data, 1.0, 0.0).is_ok());
    }

    #[test]
    fn test_naive_persistence_example() {
        // Predictions [_, 1, 0, 1] vs actual [0, 1, 1] -> 0 of 3
        let rows = rows_from_targets(&[1, 0, 1, 1, -1]);
        let acc = naive_persistence(&rows);
        assert_eq!(acc.as_tuple(), (0.0, 0, 3));
    }

    #[test]
    fn test_naive_persistence_counts() {
        let rows = rows_from_targets(&[1, 1, 0, 0, 0, 1]);
        let acc = naive_persistence(&rows);
        assert_eq!(acc.correct, 3);
        assert_eq!(acc.total, 5);
        assert!((acc.percent - 60.0).abs() < 1e-10);
    }

    #[test]
    fn test_empty_and_sentinel_only() {
        assert_eq!(naive_persistence(&[]).as_tuple(), (0.0, 0, 0));
        assert_eq!(moving_average_crossover(&[]).as_tuple(), (0.0, 0, 0));

        let sentinel = rows_from_targets(&[-1]);
        assert_eq!(naive_persistence(&sentinel).as_tuple(), (0.0, 0, 0));
        assert_eq!(moving_average_crossover(&sentinel).as_tuple(), (0.0, 0, 0));
    }

    #[test]
    fn test_crossover() {
        let rows = vec![
            row(1, 0.0, 0.0),   // placeholders, skipped
            row(1, 10.5, 0.0),  // sma_20 placeholder, skipped
            row(1, 10.5, 10.0), // predict up, correct
            row(0, 10.5, 10.0), // predict up, wrong
            row(0, 9.5, 10.0),  // predict down, correct
            row(0, 10.0, 10.0), // equal -> down, correct
            row(-1, 11.0, 10.0), // sentinel, skipped
        ];
        let acc = moving_average_crossover(&rows);
        assert_eq!(acc.correct, 3);
        assert_eq!(acc.total, 4);
        assert!((acc.percent - 75.0).abs() < 1e-10);
    }

    #[test]
    fn test_report_best_and_gap() {
        let mut rows: Vec<FeatureRow> = (0..40)
            .map(|i| row(if i % 2 == 0 { 1 } else { 0 }, 11.0, 10.0))
            .collect();
        if let Some(last) = rows.last_mut() {
            last.target = Target::Unknown;
        }

        let split = split_chronological(&rows, 0.5, 0.25).unwrap();
        let report = BaselineReport::evaluate(&split);

        // Alternating targets never persist
        assert_eq!(report.persistence.test.correct, 0);
        // Always predicting up is right on every even row
        assert_eq!(report.crossover.test.total, 9);
        assert_eq!(report.crossover.test.correct, 5);
        let best = report.best_test_accuracy();
        assert!((best - 500.0 / 9.0).abs() < 1e-10);
        assert!((report.gap_to(60.0) - (60.0 - best)).abs() < 1e-10);
    }
}
