/// Calculates the Simple Moving Average (SMA) for a given data slice and window.
///
/// # Arguments
///
/// * `data` - A slice of f64 values.
/// * `window` - The number of trailing values averaged, including the current one.
///
/// # Returns
///
/// A Vec<f64> the same length as `data`. The first `window - 1` values are 0.0.
pub fn moving_average(data: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || window > data.len() {
        return vec![0.0; data.len()];
    }

    let mut sma = Vec::with_capacity(data.len());

    // Not enough history yet
    for _ in 0..window - 1 {
        sma.push(0.0);
    }

    let mut sum: f64 = data.iter().take(window).sum();
    sma.push(sum / window as f64);

    for i in window..data.len() {
        sum = sum - data[i - window] + data[i];
        sma.push(sum / window as f64);
    }

    sma
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moving_average() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let sma = moving_average(&data, 3);

        assert_eq!(sma.len(), 5);
        assert_eq!(sma[0], 0.0);
        assert_eq!(sma[1], 0.0);
        assert!((sma[2] - 2.0).abs() < 1e-10); // (1+2+3)/3 = 2
        assert!((sma[3] - 3.0).abs() < 1e-10); // (2+3+4)/3 = 3
        assert!((sma[4] - 4.0).abs() < 1e-10); // (3+4+5)/3 = 4
    }

    #[test]
    fn test_moving_average_edge_cases() {
        let data = vec![1.0, 2.0];
        assert_eq!(moving_average(&data, 3), vec![0.0, 0.0]);
        assert_eq!(moving_average(&data, 0), vec![0.0, 0.0]);
        assert!(moving_average(&[], 5).is_empty());

        let sma = moving_average(&data, 2);
        assert_eq!(sma[0], 0.0);
        assert!((sma[1] - 1.5).abs() < 1e-10);
    }

    #[test]
    fn test_sliding_matches_direct_window_mean() {
        let data: Vec<f64> = (0..300)
            .map(|i| 20.0 + (i as f64 * 0.37).sin() * 3.0 + i as f64 * 0.01)
            .collect();
        let window = 20;
        let sma = moving_average(&data, window);

        for i in window - 1..data.len() {
            let direct: f64 = data[i + 1 - window..=i].iter().sum::<f64>() / window as f64;
            assert!(
                (sma[i] - direct).abs() < 1e-9,
                "index {}: sliding {} vs direct {}",
                i,
                sma[i],
                direct
            );
        }
    }
}
