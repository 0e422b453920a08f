/// RSI value used before a full period of changes is available.
pub const RSI_NEUTRAL: f64 = 50.0;

/// Calculates the Relative Strength Index with a simple trailing average.
///
/// For each index `i >= period` the last `period` daily changes
/// (`data[j] - data[j-1]` for `j` in `i-period+1..=i`) are split into gains
/// and losses. A zero change counts as a zero loss. Averages are plain means
/// over `period`, recomputed at every index rather than smoothed.
///
/// # Arguments
///
/// * `data` - A slice of f64 values (prices).
/// * `period` - The number of changes in each window (typically 14).
///
/// # Returns
///
/// A Vec<f64> in [0, 100]. The first `period` values are `RSI_NEUTRAL`.
/// When the window holds no losses at all the value is exactly 100.
pub fn rsi(data: &[f64], period: usize) -> Vec<f64> {
    let mut rsi_values = vec![RSI_NEUTRAL; data.len()];

    if period == 0 {
        return rsi_values;
    }

    for (i, rsi_val) in rsi_values.iter_mut().enumerate().skip(period) {
        let mut gains = 0.0;
        let mut losses = 0.0;

        for j in i + 1 - period..=i {
            let change = data[j] - data[j - 1];
            if change > 0.0 {
                gains += change;
            } else {
                losses -= change;
            }
        }

        let avg_gain = gains / period as f64;
        let avg_loss = losses / period as f64;

        *rsi_val = if avg_loss == 0.0 {
            100.0
        } else {
            let rs = avg_gain / avg_loss;
            100.0 - (100.0 / (1.0 + rs))
        };
    }

    rsi_values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsi_placeholder() {
        let prices: Vec<f64> = (0..20).map(|i| 10.0 + i as f64).collect();
        let out = rsi(&prices, 14);
        assert_eq!(out.len(), 20);
        for &v in &out[..14] {
            assert_eq!(v, RSI_NEUTRAL);
        }
    }

    #[test]
    fn test_rsi_uptrend_is_exactly_100() {
        let prices: Vec<f64> = (0..30).map(|i| 1.0 + 0.1 * i as f64).collect();
        let out = rsi(&prices, 14);
        for &v in &out[14..] {
            assert_eq!(v, 100.0);
        }
    }

    #[test]
    fn test_rsi_flat_is_100() {
        // Zero changes count as zero losses
        let prices = vec![5.0; 20];
        let out = rsi(&prices, 14);
        assert_eq!(out[14], 100.0);
        assert_eq!(out[19], 100.0);
    }

    #[test]
    fn test_rsi_downtrend_is_zero() {
        let prices: Vec<f64> = (0..20).map(|i| 30.0 - i as f64).collect();
        let out = rsi(&prices, 14);
        for &v in &out[14..] {
            assert!(v.abs() < 1e-10);
        }
    }

    #[test]
    fn test_rsi_known_value() {
        // Period 2 over changes +2, -1 -> avg_gain 1.0, avg_loss 0.5 -> RS 2
        let prices = vec![10.0, 12.0, 11.0];
        let out = rsi(&prices, 2);
        assert_eq!(out[0], RSI_NEUTRAL);
        assert_eq!(out[1], RSI_NEUTRAL);
        assert!((out[2] - (100.0 - 100.0 / 3.0)).abs() < 1e-10);
    }

    #[test]
    fn test_rsi_bounded() {
        let prices: Vec<f64> = (0..200)
            .map(|i| 20.0 + (i as f64 * 0.7).sin() * 2.0 + (i as f64 * 0.13).cos())
            .collect();
        for v in rsi(&prices, 14) {
            assert!((0.0..=100.0).contains(&v));
        }
    }

    #[test]
    fn test_rsi_short_series() {
        assert_eq!(rsi(&[1.0, 2.0], 14), vec![RSI_NEUTRAL, RSI_NEUTRAL]);
        assert!(rsi(&[], 14).is_empty());
    }
}
