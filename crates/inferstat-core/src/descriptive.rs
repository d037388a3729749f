//! Point estimates and dispersion
//!
//! NaN entries mark missing observations and are dropped before counting,
//! so `n` below always means the number of non-NaN values.

use crate::errors::{check_len, StatsResult};

/// Aggregate descriptive statistics for a sample
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Number of observations used
    pub n: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator)
    pub std_dev: f64,
    /// Standard error of the mean
    pub std_error: f64,
    pub min: f64,
    pub max: f64,
}

/// Filter NaN values from a slice
pub(crate) fn filter_nan(data: &[f64]) -> Vec<f64> {
    data.iter().copied().filter(|x| !x.is_nan()).collect()
}

/// Mean shifted by the first value, exact for a constant sample
pub(crate) fn mean_of(data: &[f64]) -> f64 {
    let Some(&shift) = data.first() else {
        return f64::NAN;
    };
    shift + data.iter().map(|&x| x - shift).sum::<f64>() / data.len() as f64
}

/// Unbiased variance of data already known to hold at least 2 values
///
/// Corrected two-pass formula: the squared deviations minus the squared sum of
/// deviations over n, which cancels the rounding error left in the mean.
pub(crate) fn variance_of(data: &[f64]) -> f64 {
    let mean = mean_of(data);
    let (ss, sum_dev) = data.iter().fold((0.0, 0.0), |(ss, sum), &x| {
        let d = x - mean;
        (ss + d * d, sum + d)
    });
    let n = data.len() as f64;
    ((ss - sum_dev * sum_dev / n) / (n - 1.0)).max(0.0)
}

/// Median of data already known to be non-empty
pub(crate) fn median_of(data: &[f64]) -> f64 {
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Arithmetic mean, the point estimate of the population mean
pub fn point_estimate(sample: &[f64]) -> StatsResult<f64> {
    let data = filter_nan(sample);
    check_len("sample", data.len(), 1)?;
    Ok(mean_of(&data))
}

/// Unbiased sample variance (n - 1 denominator)
pub fn sample_variance(sample: &[f64]) -> StatsResult<f64> {
    let data = filter_nan(sample);
    check_len("sample", data.len(), 2)?;
    Ok(variance_of(&data))
}

/// Unbiased sample standard deviation
///
/// Requires at least 2 observations.
pub fn sample_std_dev(sample: &[f64]) -> StatsResult<f64> {
    sample_variance(sample).map(f64::sqrt)
}

/// Standard error of the mean, `sd / sqrt(n)`
pub fn standard_error(sample: &[f64]) -> StatsResult<f64> {
    let data = filter_nan(sample);
    check_len("sample", data.len(), 2)?;
    Ok((variance_of(&data) / data.len() as f64).sqrt())
}

/// Sample median; the mean of the two middle values for even `n`
pub fn median(sample: &[f64]) -> StatsResult<f64> {
    let data = filter_nan(sample);
    check_len("sample", data.len(), 1)?;
    Ok(median_of(&data))
}

/// Compute count, mean, dispersion and range in one call
pub fn describe(sample: &[f64]) -> StatsResult<Summary> {
    let data = filter_nan(sample);
    check_len("sample", data.len(), 2)?;

    let n = data.len();
    let variance = variance_of(&data);
    let (min, max) = data
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
            (lo.min(x), hi.max(x))
        });

    Ok(Summary {
        n,
        mean: mean_of(&data),
        std_dev: variance.sqrt(),
        std_error: (variance / n as f64).sqrt(),
        min,
        max,
    })
}
