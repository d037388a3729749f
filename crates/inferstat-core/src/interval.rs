//! Confidence intervals for a population mean
//!
//! The interval is `mean ± critical * sd / sqrt(n)`. By default the critical
//! value is the standard-normal quantile, a large-sample approximation that is
//! kept even for small samples. Callers that want the small-sample interval
//! select [`CriticalValue::StudentT`].

use std::fmt;

use statrs::distribution::{ContinuousCDF, Normal, StudentsT};

use crate::descriptive::{filter_nan, mean_of, variance_of};
use crate::errors::{check_len, check_unit_interval, StatsError, StatsResult};

/// Source of the two-tailed critical value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CriticalValue {
    /// Standard-normal quantile (z)
    #[default]
    Normal,
    /// Student-t quantile with `n - 1` degrees of freedom
    StudentT,
}

/// Options for interval estimation
#[derive(Debug, Clone, Default)]
pub struct IntervalOptions {
    /// Critical value source (default: normal)
    pub method: CriticalValue,
}

/// Confidence interval for a population mean
#[derive(Debug, Clone, PartialEq)]
pub struct ConfidenceInterval {
    /// Lower bound
    pub lower: f64,
    /// Upper bound
    pub upper: f64,
    /// Point estimate at the centre of the interval
    pub estimate: f64,
    /// Half-width of the interval
    pub margin: f64,
    /// Confidence level used
    pub confidence_level: f64,
    /// Critical value source used
    pub method: CriticalValue,
}

impl ConfidenceInterval {
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

impl fmt::Display for ConfidenceInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.0}% CI: [{:.4}, {:.4}] (estimate={:.4}, margin={:.4})",
            self.confidence_level * 100.0,
            self.lower,
            self.upper,
            self.estimate,
            self.margin
        )
    }
}

/// Two-tailed critical value for `confidence_level`
///
/// `df` is only consulted for [`CriticalValue::StudentT`].
pub fn critical_value(confidence_level: f64, method: CriticalValue, df: f64) -> StatsResult<f64> {
    check_unit_interval("confidence level", confidence_level)?;
    let q = 1.0 - (1.0 - confidence_level) / 2.0;

    match method {
        CriticalValue::Normal => {
            let normal = Normal::new(0.0, 1.0).map_err(|_| StatsError::InvalidConfidenceLevel {
                parameter: "confidence level",
                value: confidence_level,
            })?;
            Ok(normal.inverse_cdf(q))
        }
        CriticalValue::StudentT => {
            let t_dist = StudentsT::new(0.0, 1.0, df).map_err(|_| {
                StatsError::InsufficientSampleSize {
                    field: "sample",
                    required: 2,
                    actual: (df + 1.0).max(0.0) as usize,
                }
            })?;
            Ok(t_dist.inverse_cdf(q))
        }
    }
}

/// Confidence interval for the mean using the standard-normal critical value
///
/// # Arguments
/// * `sample` - Sample data (at least 2 observations)
/// * `confidence_level` - Level in (0, 1), e.g. 0.95
pub fn confidence_interval(sample: &[f64], confidence_level: f64) -> StatsResult<ConfidenceInterval> {
    confidence_interval_with(sample, confidence_level, &IntervalOptions::default())
}

/// Confidence interval for the mean with an explicit critical value source
pub fn confidence_interval_with(
    sample: &[f64],
    confidence_level: f64,
    options: &IntervalOptions,
) -> StatsResult<ConfidenceInterval> {
    check_unit_interval("confidence level", confidence_level)?;

    let data = filter_nan(sample);
    check_len("sample", data.len(), 2)?;

    let n = data.len() as f64;
    let mean = mean_of(&data);
    let std_error = (variance_of(&data) / n).sqrt();
    let critical = critical_value(confidence_level, options.method, n - 1.0)?;
    let margin = critical * std_error;

    Ok(ConfidenceInterval {
        lower: mean - margin,
        upper: mean + margin,
        estimate: mean,
        margin,
        confidence_level,
        method: options.method,
    })
}
