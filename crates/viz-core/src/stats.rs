// File: crates/viz-core/src/stats.rs
// Summary: Numeric primitives: grids, quantiles, moments, Gaussian kernel density.

/// Evenly spaced grid of `steps` points covering [start, end].
pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 {
        return vec![start, end];
    }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n-1 denominator). Zero for fewer than 2 values.
pub fn sample_std_dev(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let m = mean(values);
    let ss = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>();
    (ss / (n - 1) as f64).sqrt()
}

/// Linear-interpolation quantile over an ascending-sorted slice.
/// `q` in [0, 1]; position q*(n-1) interpolated between neighbors.
/// The same estimator is used for Q1, median, and Q3 so summaries are
/// internally consistent.
pub fn quantile_linear(sorted: &[f64], q: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let pos = q.clamp(0.0, 1.0) * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
    }
}

/// Silverman's rule-of-thumb bandwidth: 1.06 * sigma * n^(-1/5).
/// Zero when the sample has no spread.
pub fn silverman_bandwidth(values: &[f64]) -> f64 {
    let sigma = sample_std_dev(values);
    if sigma <= 0.0 || values.is_empty() {
        return 0.0;
    }
    1.06 * sigma * (values.len() as f64).powf(-0.2)
}

/// Gaussian kernel density estimate of `values` evaluated at `at`.
pub fn gaussian_kde(values: &[f64], bandwidth: f64, at: f64) -> f64 {
    if values.is_empty() || bandwidth <= 0.0 {
        return 0.0;
    }
    const INV_SQRT_TAU: f64 = 0.398_942_280_401_432_7; // 1 / sqrt(2*pi)
    let sum: f64 = values
        .iter()
        .map(|v| {
            let u = (at - v) / bandwidth;
            INV_SQRT_TAU * (-0.5 * u * u).exp()
        })
        .sum();
    sum / (values.len() as f64 * bandwidth)
}
