//! Statistical hypothesis testing
//!
//! Parametric t-tests, the Levene / Brown-Forsythe variance check and
//! Fisher's exact test. Every routine is a pure function returning a fresh
//! result record.


use std::fmt;

use statrs::distribution::{ContinuousCDF, FisherSnedecor, StudentsT};

use crate::errors::{StatsError, StatsResult};

/// Alternative hypothesis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alternative {
    #[default]
    TwoSided,
    /// The first parameter is less than the second (or the hypothesized value)
    Less,
    /// The first parameter is greater than the second (or the hypothesized value)
    Greater,
}

/// Generic test result structure for all statistical tests
#[derive(Debug, Clone, PartialEq)]
pub struct TestResult {
    /// Test statistic (t, F, odds ratio)
    pub statistic: f64,
    /// p-value in [0, 1]
    pub p_value: f64,
    /// Degrees of freedom, if applicable (numerator df for F tests)
    pub df: Option<f64>,
    /// Alternative hypothesis
    pub alternative: Alternative,
    /// Total sample size
    pub n: usize,
    /// Group 1 sample size (for two-sample tests)
    pub n1: usize,
    /// Group 2 sample size (for two-sample tests)
    pub n2: usize,
    /// Test method/name
    pub method: String,
}

impl TestResult {
    /// Whether the null hypothesis is rejected at significance level `alpha`
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.df {
            Some(df) => write!(
                f,
                "{}: statistic={:.4}, df={:.2}, p={:.6}",
                self.method, self.statistic, df, self.p_value
            ),
            None => write!(
                f,
                "{}: statistic={:.4}, p={:.6}",
                self.method, self.statistic, self.p_value
            ),
        }
    }
}

/// Ratio `numerator / denominator` where a zero denominator yields 0 or ±∞
///
/// 0/0 is defined as 0 so that identical inputs give a zero statistic
/// rather than NaN.
pub(crate) fn ratio_or_degenerate(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        return numerator / denominator;
    }
    tracing::debug!(numerator, "zero standard error, statistic is degenerate");
    if numerator == 0.0 {
        0.0
    } else {
        numerator.signum() * f64::INFINITY
    }
}

/// p-value of a t statistic under the Student-t distribution with `df` degrees of freedom
pub(crate) fn student_t_p_value(t: f64, df: f64, alternative: Alternative) -> StatsResult<f64> {
    if t.is_infinite() {
        return Ok(match alternative {
            Alternative::TwoSided => 0.0,
            Alternative::Less => if t < 0.0 { 0.0 } else { 1.0 },
            Alternative::Greater => if t > 0.0 { 0.0 } else { 1.0 },
        });
    }

    let dist = StudentsT::new(0.0, 1.0, df).map_err(|_| StatsError::InsufficientSampleSize {
        field: "degrees of freedom",
        required: 1,
        actual: df.max(0.0) as usize,
    })?;

    let p = match alternative {
        // exact at the centre of the distribution
        Alternative::TwoSided if t == 0.0 => 1.0,
        Alternative::TwoSided => 2.0 * dist.sf(t.abs()),
        Alternative::Less => dist.cdf(t),
        Alternative::Greater => dist.sf(t),
    };
    Ok(p.clamp(0.0, 1.0))
}

/// Upper-tail p-value of an F statistic
pub(crate) fn f_p_value(f_stat: f64, df1: f64, df2: f64) -> StatsResult<f64> {
    if f_stat.is_infinite() {
        return Ok(0.0);
    }
    if f_stat <= 0.0 {
        return Ok(1.0);
    }
    let dist = FisherSnedecor::new(df1, df2).map_err(|_| StatsError::InsufficientSampleSize {
        field: "degrees of freedom",
        required: 1,
        actual: df2.max(0.0) as usize,
    })?;
    Ok(dist.sf(f_stat).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ratio_or_degenerate() {
        assert_relative_eq!(ratio_or_degenerate(1.0, 2.0), 0.5);
        assert_eq!(ratio_or_degenerate(0.0, 0.0), 0.0);
        assert_eq!(ratio_or_degenerate(-3.0, 0.0), f64::NEG_INFINITY);
        assert_eq!(ratio_or_degenerate(3.0, 0.0), f64::INFINITY);
    }

    #[test]
    fn test_student_t_p_value_tails() {
        let two = student_t_p_value(2.0, 10.0, Alternative::TwoSided).unwrap();
        let greater = student_t_p_value(2.0, 10.0, Alternative::Greater).unwrap();
        let less = student_t_p_value(2.0, 10.0, Alternative::Less).unwrap();

        assert_relative_eq!(two, 2.0 * greater, epsilon = 1e-12);
        assert_relative_eq!(greater + less, 1.0, epsilon = 1e-12);
        assert_relative_eq!(two, 0.0734, epsilon = 1e-4);
    }

    #[test]
    fn test_student_t_p_value_degenerate() {
        assert_eq!(student_t_p_value(0.0, 4.0, Alternative::TwoSided).unwrap(), 1.0);
        assert_eq!(student_t_p_value(f64::INFINITY, 4.0, Alternative::TwoSided).unwrap(), 0.0);
        assert_eq!(student_t_p_value(f64::NEG_INFINITY, 4.0, Alternative::Greater).unwrap(), 1.0);
    }

    #[test]
    fn test_f_p_value() {
        // F(1, 8) upper tail at 2.0571 from the Levene reference case
        assert_relative_eq!(f_p_value(2.057142857, 1.0, 8.0).unwrap(), 0.189404, epsilon = 1e-5);
        assert_eq!(f_p_value(0.0, 1.0, 8.0).unwrap(), 1.0);
    }

    #[test]
    fn test_display() {
        let result = TestResult {
            statistic: 1.5,
            p_value: 0.2,
            df: Some(4.0),
            alternative: Alternative::TwoSided,
            n: 5,
            n1: 5,
            n2: 0,
            method: "One-sample t-test".into(),
        };
        assert_eq!(
            result.to_string(),
            "One-sample t-test: statistic=1.5000, df=4.00, p=0.200000"
        );
        assert!(!result.is_significant(0.05));
    }
}
