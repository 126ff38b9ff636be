//! Pure statistics over a series of latencies in seconds.
//!
//! Empty input has no mean and no spread. Both functions return `f64::NAN` in that
//! case instead of dividing by zero, so the caller can tell "no data" apart from a
//! genuine zero-variance series.

/// Arithmetic mean, or `NaN` for an empty slice.
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return f64::NAN;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Population standard deviation (divides by `n`, not `n - 1`), or `NaN` for an
/// empty slice.
pub fn population_std(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return f64::NAN;
    }
    let mean = mean(samples);
    let variance = samples
        .iter()
        .map(|x| {
            let d = x - mean;
            d * d
        })
        .sum::<f64>()
        / samples.len() as f64;
    variance.sqrt()
}
