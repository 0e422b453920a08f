// ============================================================================
// Central tendency and dispersion
// ============================================================================

/// Arithmetic mean. Returns 0.0 for an empty slice.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Population variance (divides by n). Returns 0.0 for an empty slice.
pub fn population_variance(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let m = mean(data);
    data.iter().map(|&x| (x - m) * (x - m)).sum::<f64>() / data.len() as f64
}

/// Population standard deviation (divides by n).
pub fn population_std(data: &[f64]) -> f64 {
    population_variance(data).sqrt()
}

/// Sample standard deviation (divides by n-1). NaN when fewer than two values.
pub fn sample_std(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return f64::NAN;
    }
    let m = mean(data);
    let ss: f64 = data.iter().map(|&x| (x - m) * (x - m)).sum();
    (ss / (n - 1) as f64).sqrt()
}

pub fn find_min_max(data: &[f64]) -> (f64, f64) {
    let mut min_val = f64::INFINITY;
    let mut max_val = f64::NEG_INFINITY;

    for &val in data {
        if val < min_val {
            min_val = val;
        }
        if val > max_val {
            max_val = val;
        }
    }

    (min_val, max_val)
}

// ============================================================================
// Order statistics
// ============================================================================

/// Ascending copy of `data`. NaNs sort last.
pub fn sorted_copy(data: &[f64]) -> Vec<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Quantile with linear interpolation between closest ranks.
///
/// `sorted_data` must be ascending. Position is `q * (n - 1)`; the result
/// interpolates between the two neighbouring order statistics.
pub fn quantile_linear(sorted_data: &[f64], q: f64) -> f64 {
    let n = sorted_data.len();
    if n == 0 {
        return f64::NAN;
    }
    let q = q.clamp(0.0, 1.0);
    let pos = q * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        return sorted_data[lo];
    }
    let frac = pos - lo as f64;
    sorted_data[lo] + (sorted_data[hi] - sorted_data[lo]) * frac
}

/// Order statistic at index `floor(n * num / den)`.
///
/// Used for the quick quartile and median estimates (`n/4`, `n/2`, `3n/4`).
pub fn index_quantile(sorted_data: &[f64], num: usize, den: usize) -> f64 {
    let n = sorted_data.len();
    if n == 0 || den == 0 {
        return f64::NAN;
    }
    let k = (num * n / den).min(n - 1);
    sorted_data[k]
}

// ============================================================================
// Inter-quartile range fences
// ============================================================================

/// Tukey fences built from the first and third quartiles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IqrBounds {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower: f64,
    pub upper: f64,
}

impl IqrBounds {
    pub fn new(q1: f64, q3: f64) -> Self {
        let iqr = q3 - q1;
        Self {
            q1,
            q3,
            iqr,
            lower: q1 - 1.5 * iqr,
            upper: q3 + 1.5 * iqr,
        }
    }

    pub fn is_outlier(&self, x: f64) -> bool {
        x < self.lower || x > self.upper
    }

    /// Values of `data` falling outside the fences, in original order.
    pub fn outliers(&self, data: &[f64]) -> Vec<f64> {
        data.iter().copied().filter(|&x| self.is_outlier(x)).collect()
    }
}
