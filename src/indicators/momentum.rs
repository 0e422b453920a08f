/// Percentage change from the previous price: `(p[i] - p[i-1]) / p[i-1] * 100`.
///
/// The first entry has no prior day and is 0.0.
pub fn returns(data: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(data.len());
    if data.is_empty() {
        return out;
    }

    out.push(0.0);
    out.extend(data.windows(2).map(|w| (w[1] - w[0]) / w[0] * 100.0));
    out
}

/// Percentage change over `window` days: `(p[i] - p[i-window]) / p[i-window] * 100`.
///
/// Entries with `i < window` are 0.0.
pub fn momentum(data: &[f64], window: usize) -> Vec<f64> {
    (0..data.len())
        .map(|i| {
            if i < window || window == 0 {
                0.0
            } else {
                (data[i] - data[i - window]) / data[i - window] * 100.0
            }
        })
        .collect()
}

/// The price `offset` days earlier, or 0.0 when that day precedes the series.
pub fn lag(data: &[f64], offset: usize) -> Vec<f64> {
    (0..data.len())
        .map(|i| if i < offset { 0.0 } else { data[i - offset] })
        .collect()
}
