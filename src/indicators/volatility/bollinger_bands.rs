use stats::{mean, population_std};

/// Computes the distance of each price from its Bollinger middle band,
/// expressed in standard deviations.
///
/// The middle band is the mean of the trailing `period` prices ending at `i`,
/// and the deviation is the population standard deviation of the same window.
/// Both are computed directly from the window so that a flat window yields a
/// standard deviation of exactly zero.
///
/// # Arguments
///
/// * `data` - A slice of f64 values (typically closing prices).
/// * `period` - The window size (typically 20).
///
/// # Returns
///
/// A Vec<f64> aligned with `data`. Entries are 0.0 for the first `period - 1`
/// values and wherever the window's standard deviation is zero.
pub fn bollinger_distance(data: &[f64], period: usize) -> Vec<f64> {
    let mut distance = vec![0.0; data.len()];

    if period == 0 || period > data.len() {
        return distance;
    }

    for (i, dist) in distance.iter_mut().enumerate().skip(period - 1) {
        let slice = &data[i + 1 - period..=i];
        let middle = mean(slice);
        let std_dev = population_std(slice);

        if std_dev != 0.0 {
            *dist = (data[i] - middle) / std_dev;
        }
    }

    distance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bollinger_distance() {
        let data = vec![10.0, 12.0, 14.0, 16.0, 18.0];
        let out = bollinger_distance(&data, 5);

        // Mean = 14, variance = (16 + 4 + 0 + 4 + 16) / 5 = 8
        assert_eq!(out.len(), 5);
        for &v in &out[..4] {
            assert_eq!(v, 0.0);
        }
        assert!((out[4] - 4.0 / 8.0_f64.sqrt()).abs() < 1e-10);
    }

    #[test]
    fn test_bollinger_distance_flat_window() {
        let data = vec![
            10.0, 11.0, 9.0, 12.0, 10.0,
            12.0, 12.0, 12.0, 12.0, 12.0,
        ];
        let out = bollinger_distance(&data, 5);
        assert_eq!(out[9], 0.0);
        assert!(out[5] > 0.0);
    }

    #[test]
    fn test_bollinger_distance_insufficient_history() {
        let data = vec![1.0, 2.0, 3.0];
        assert_eq!(bollinger_distance(&data, 20), vec![0.0; 3]);
        assert_eq!(bollinger_distance(&data, 0), vec![0.0; 3]);
    }
}
