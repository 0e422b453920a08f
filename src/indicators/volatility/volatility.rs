use stats::population_std;

/// Rolling volatility: population standard deviation of the trailing
/// `window` prices ending at each index.
///
/// Returns 0.0 for the first `window - 1` entries.
pub fn rolling_volatility(data: &[f64], window: usize) -> Vec<f64> {
    let mut volatility = vec![0.0; data.len()];

    if window == 0 || window > data.len() {
        return volatility;
    }

    for (i, vlt) in volatility.iter_mut().enumerate().skip(window - 1) {
        *vlt = population_std(&data[i + 1 - window..=i]);
    }

    volatility
}
