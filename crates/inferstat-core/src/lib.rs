//! inferstat-core: Estimation and hypothesis testing toolkit
//!
//! Point estimates, confidence intervals for a mean, one-sample, two-sample
//! and paired t-tests, Levene's variance check and Fisher's exact test.
//! Every routine is a pure function over caller-owned data, consumed directly
//! from Rust or through the C boundary in `inferstat-ffi`.

pub mod descriptive;
pub mod errors;
pub mod interval;
pub mod tests;
pub mod types;

pub use descriptive::{
    describe, median, point_estimate, sample_std_dev, sample_variance, standard_error, Summary,
};
pub use errors::{ReasonCode, StatsError, StatsResult};
pub use interval::{
    confidence_interval, confidence_interval_with, critical_value, ConfidenceInterval,
    CriticalValue, IntervalOptions,
};
pub use tests::categorical::{
    fishers_exact_test, fishers_exact_test_with, FisherExactOptions, FisherExactResult, OddsRatio,
};
pub use tests::parametric::{
    compare_two_samples, one_sample_t_test, one_sample_t_test_with, paired_t_test,
    paired_t_test_with, two_sample_t_test, two_sample_t_test_with, TTestKind, TTestOptions,
    TwoSampleComparison,
};
pub use tests::variance::{
    levene_test, variance_equality_check, variance_equality_check_with, LeveneCenter,
    VarianceCheck, VarianceCheckOptions,
};
pub use tests::{Alternative, TestResult};
pub use types::*;
