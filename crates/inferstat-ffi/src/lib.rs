//! C FFI boundary for inferstat
//!
//! This crate provides C-compatible functions so a host written in C or C++
//! (a data-loading or reporting layer) can call the estimators and tests.
//! Every entry point returns `true` on success; on failure it returns `false`
//! and fills `out_error`.

mod types;

pub use types::*;

use inferstat_core::{
    confidence_interval_with, critical_value, fishers_exact_test_with, one_sample_t_test_with,
    paired_t_test_with, point_estimate, sample_std_dev, two_sample_t_test_with,
    variance_equality_check_with, ContingencyTable, CriticalValue, FisherExactOptions,
    IntervalOptions, PairedSample, StatsResult, TTestKind, TTestOptions, TestResult, VarianceCheckOptions,
};
use libc::c_char;

/// Helper to allocate and copy a string
unsafe fn alloc_string(s: &str) -> *mut c_char {
    let len = s.len() + 1;
    let ptr = libc::malloc(len) as *mut c_char;
    if !ptr.is_null() {
        std::ptr::copy_nonoverlapping(s.as_ptr(), ptr as *mut u8, s.len());
        *ptr.add(s.len()) = 0;
    }
    ptr
}

/// Run a core routine, catching panics and reporting errors into `out_error`
///
/// Returns `None` when the routine failed or panicked.
unsafe fn run_guarded<T>(
    name: &str,
    out_error: *mut InferstatError,
    f: impl FnOnce() -> StatsResult<T>,
) -> Option<T> {
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(f)) {
        Ok(Ok(value)) => Some(value),
        Ok(Err(e)) => {
            if !out_error.is_null() {
                (*out_error).set_stats_error(&e);
            }
            None
        }
        Err(_) => {
            tracing::warn!(routine = name, "caught panic at FFI boundary");
            if !out_error.is_null() {
                (*out_error).set(ErrorCode::InternalError, &format!("Internal panic in {}", name));
            }
            None
        }
    }
}

/// Reset `out_error` and reject a NULL out-pointer
unsafe fn begin_call<T>(out: *mut T, out_error: *mut InferstatError) -> bool {
    if !out_error.is_null() {
        *out_error = InferstatError::success();
    }
    if out.is_null() {
        if !out_error.is_null() {
            (*out_error).set(ErrorCode::InvalidArgument, "output pointer is NULL");
        }
        return false;
    }
    true
}

unsafe fn write_test_result(out_result: *mut TestResultFFI, r: &TestResult, equal_variance: bool) {
    (*out_result) = TestResultFFI {
        statistic: r.statistic,
        p_value: r.p_value,
        df: r.df.unwrap_or(f64::NAN),
        n: r.n,
        n1: r.n1,
        n2: r.n2,
        alternative: r.alternative.into(),
        equal_variance,
        method: alloc_string(&r.method),
    };
}

/// Get library version string
#[no_mangle]
pub extern "C" fn inferstat_version() -> *const c_char {
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr() as *const c_char
}

// ============================================================================
// Estimation
// ============================================================================

/// Arithmetic mean of the valid values
///
/// # Safety
/// - `data` must be a valid DataArray
/// - `out_value` must be a valid pointer
/// - `out_error` must be a valid pointer or NULL
#[no_mangle]
pub unsafe extern "C" fn inferstat_point_estimate(
    data: DataArray,
    out_value: *mut f64,
    out_error: *mut InferstatError,
) -> bool {
    if !begin_call(out_value, out_error) {
        return false;
    }
    let values = data.to_vec();
    match run_guarded("point estimate", out_error, || point_estimate(&values)) {
        Some(mean) => {
            *out_value = mean;
            true
        }
        None => false,
    }
}

/// Unbiased sample standard deviation of the valid values
///
/// # Safety
/// - `data` must be a valid DataArray
/// - `out_value` must be a valid pointer
/// - `out_error` must be a valid pointer or NULL
#[no_mangle]
pub unsafe extern "C" fn inferstat_sample_std_dev(
    data: DataArray,
    out_value: *mut f64,
    out_error: *mut InferstatError,
) -> bool {
    if !begin_call(out_value, out_error) {
        return false;
    }
    let values = data.to_vec();
    match run_guarded("sample std dev", out_error, || sample_std_dev(&values)) {
        Some(sd) => {
            *out_value = sd;
            true
        }
        None => false,
    }
}

/// Confidence interval for the mean
///
/// # Safety
/// - `data` must be a valid DataArray
/// - `out_result` must be a valid pointer
/// - `out_error` must be a valid pointer or NULL
#[no_mangle]
pub unsafe extern "C" fn inferstat_confidence_interval(
    data: DataArray,
    options: IntervalOptionsFFI,
    out_result: *mut ConfidenceIntervalFFI,
    out_error: *mut InferstatError,
) -> bool {
    if !begin_call(out_result, out_error) {
        return false;
    }
    let values = data.to_vec();
    let opts = IntervalOptions {
        method: options.method.into(),
    };
    match run_guarded("confidence interval", out_error, || {
        confidence_interval_with(&values, options.confidence_level, &opts)
    }) {
        Some(ci) => {
            *out_result = ConfidenceIntervalFFI::from(&ci);
            true
        }
        None => false,
    }
}

/// Two-tailed standard-normal critical value for a confidence level
///
/// # Returns
/// The z-critical value, or NaN if the level is not in (0, 1)
#[no_mangle]
pub extern "C" fn inferstat_z_critical(confidence_level: f64) -> f64 {
    critical_value(confidence_level, CriticalValue::Normal, f64::NAN).unwrap_or(f64::NAN)
}

/// Two-tailed Student-t critical value for a confidence level
///
/// # Returns
/// The t-critical value, or NaN if invalid inputs
#[no_mangle]
pub extern "C" fn inferstat_t_critical(confidence_level: f64, df: usize) -> f64 {
    critical_value(confidence_level, CriticalValue::StudentT, df as f64).unwrap_or(f64::NAN)
}

// ============================================================================
// Hypothesis tests
// ============================================================================

/// One-sample t-test
///
/// # Safety
/// - `data` must be a valid DataArray
/// - `out_result` must be a valid pointer
/// - `out_error` must be a valid pointer or NULL
#[no_mangle]
pub unsafe extern "C" fn inferstat_one_sample_t_test(
    data: DataArray,
    hypothesized_mean: f64,
    options: TTestOptionsFFI,
    out_result: *mut TestResultFFI,
    out_error: *mut InferstatError,
) -> bool {
    if !begin_call(out_result, out_error) {
        return false;
    }
    let values = data.to_vec();
    let opts = TTestOptions {
        alternative: options.alternative.into(),
    };
    match run_guarded("one-sample t-test", out_error, || {
        one_sample_t_test_with(&values, hypothesized_mean, &opts)
    }) {
        Some(r) => {
            write_test_result(out_result, &r, false);
            true
        }
        None => false,
    }
}

/// Levene's variance equality check between two groups
///
/// `equal_variance` in the result carries the decision for the two-sample t-test.
///
/// # Safety
/// - `group1` and `group2` must be valid DataArrays
/// - `out_result` must be a valid pointer
/// - `out_error` must be a valid pointer or NULL
#[no_mangle]
pub unsafe extern "C" fn inferstat_variance_equality_check(
    group1: DataArray,
    group2: DataArray,
    options: VarianceCheckOptionsFFI,
    out_result: *mut TestResultFFI,
    out_error: *mut InferstatError,
) -> bool {
    if !begin_call(out_result, out_error) {
        return false;
    }
    let g1 = group1.to_vec();
    let g2 = group2.to_vec();
    let opts = VarianceCheckOptions {
        center: options.center.into(),
        threshold: options.threshold,
    };
    match run_guarded("variance equality check", out_error, || {
        variance_equality_check_with(&g1, &g2, &opts)
    }) {
        Some(check) => {
            write_test_result(out_result, &check.result, check.equal_variance);
            true
        }
        None => false,
    }
}

/// Two-sample t-test (pooled when `var_equal`, Welch otherwise)
///
/// # Safety
/// - `group1` and `group2` must be valid DataArrays
/// - `out_result` must be a valid pointer
/// - `out_error` must be a valid pointer or NULL
#[no_mangle]
pub unsafe extern "C" fn inferstat_two_sample_t_test(
    group1: DataArray,
    group2: DataArray,
    options: TwoSampleTTestOptionsFFI,
    out_result: *mut TestResultFFI,
    out_error: *mut InferstatError,
) -> bool {
    if !begin_call(out_result, out_error) {
        return false;
    }
    let g1 = group1.to_vec();
    let g2 = group2.to_vec();
    let kind = TTestKind::from_equal_variance(options.var_equal);
    let opts = TTestOptions {
        alternative: options.alternative.into(),
    };
    match run_guarded("two-sample t-test", out_error, || {
        two_sample_t_test_with(&g1, &g2, kind, &opts)
    }) {
        Some(r) => {
            write_test_result(out_result, &r, options.var_equal);
            true
        }
        None => false,
    }
}

/// Paired t-test on `second - first`
///
/// # Safety
/// - `first` and `second` must be valid DataArrays
/// - `out_result` must be a valid pointer
/// - `out_error` must be a valid pointer or NULL
#[no_mangle]
pub unsafe extern "C" fn inferstat_paired_t_test(
    first: DataArray,
    second: DataArray,
    options: TTestOptionsFFI,
    out_result: *mut TestResultFFI,
    out_error: *mut InferstatError,
) -> bool {
    if !begin_call(out_result, out_error) {
        return false;
    }
    let before = first.to_vec();
    let after = second.to_vec();
    let opts = TTestOptions {
        alternative: options.alternative.into(),
    };
    match run_guarded("paired t-test", out_error, || {
        let pairs = PairedSample::new(before, after)?;
        paired_t_test_with(&pairs, &opts)
    }) {
        Some(r) => {
            write_test_result(out_result, &r, false);
            true
        }
        None => false,
    }
}

/// Fisher's exact test (2x2 tables only)
///
/// # Safety
/// - `a`, `b`, `c`, `d` are the four cells of the 2x2 table
/// - `out_result` must be a valid pointer
/// - `out_error` must be a valid pointer or NULL
#[no_mangle]
pub unsafe extern "C" fn inferstat_fisher_exact(
    a: u64,
    b: u64,
    c: u64,
    d: u64,
    options: FisherExactOptionsFFI,
    out_result: *mut FisherExactResultFFI,
    out_error: *mut InferstatError,
) -> bool {
    if !begin_call(out_result, out_error) {
        return false;
    }
    let table = ContingencyTable::new([[a, b], [c, d]]);
    let opts = FisherExactOptions {
        alternative: options.alternative.into(),
    };
    match run_guarded("Fisher exact", out_error, || fishers_exact_test_with(&table, &opts)) {
        Some(r) => {
            let (odds_ratio, odds_ratio_kind) = OddsRatioKindFFI::split(r.odds_ratio);
            *out_result = FisherExactResultFFI {
                p_value: r.p_value,
                odds_ratio,
                odds_ratio_kind,
                n: r.n,
                alternative: r.alternative.into(),
            };
            true
        }
        None => false,
    }
}

/// Free memory allocated by test result functions
///
/// # Safety
/// - `result` must be NULL or a valid pointer to a TestResultFFI
#[no_mangle]
pub unsafe extern "C" fn inferstat_free_test_result(result: *mut TestResultFFI) {
    if result.is_null() {
        return;
    }
    if !(*result).method.is_null() {
        libc::free((*result).method as *mut libc::c_void);
        (*result).method = std::ptr::null_mut();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::ffi::CStr;

    fn array(values: &[f64]) -> DataArray {
        DataArray {
            data: values.as_ptr(),
            validity: std::ptr::null(),
            len: values.len(),
        }
    }

    #[test]
    fn test_point_estimate_with_validity_mask() {
        let values = [1.0, 100.0, 3.0];
        // bit 1 cleared: second value is NULL
        let mask = [0b101u8];
        let data = DataArray {
            data: values.as_ptr(),
            validity: mask.as_ptr(),
            len: values.len(),
        };
        let mut out = f64::NAN;
        let mut err = InferstatError::success();

        let ok = unsafe { inferstat_point_estimate(data, &mut out, &mut err) };
        assert!(ok);
        assert_relative_eq!(out, 2.0);
        assert_eq!(err.code, ErrorCode::Success);
    }

    #[test]
    fn test_error_codes_cross_boundary() {
        let values = [1.0];
        let mut out = f64::NAN;
        let mut err = InferstatError::success();

        let ok = unsafe { inferstat_sample_std_dev(array(&values), &mut out, &mut err) };
        assert!(!ok);
        assert_eq!(err.code, ErrorCode::InsufficientSampleSize);

        let ok = unsafe { inferstat_point_estimate(array(&[]), &mut out, &mut err) };
        assert!(!ok);
        assert_eq!(err.code, ErrorCode::EmptySample);
    }

    #[test]
    fn test_null_out_pointer() {
        let values = [1.0, 2.0];
        let mut err = InferstatError::success();
        let ok = unsafe {
            inferstat_point_estimate(array(&values), std::ptr::null_mut(), &mut err)
        };
        assert!(!ok);
        assert_eq!(err.code, ErrorCode::InvalidArgument);
    }

    #[test]
    fn test_confidence_interval() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let mut out = ConfidenceIntervalFFI::default();
        let mut err = InferstatError::success();

        let ok = unsafe {
            inferstat_confidence_interval(
                array(&values),
                IntervalOptionsFFI::default(),
                &mut out,
                &mut err,
            )
        };
        assert!(ok);
        assert_relative_eq!(out.estimate, 3.0, epsilon = 1e-12);
        assert!(out.lower < 3.0 && out.upper > 3.0);

        let bad = IntervalOptionsFFI {
            confidence_level: 1.0,
            ..Default::default()
        };
        let ok = unsafe { inferstat_confidence_interval(array(&values), bad, &mut out, &mut err) };
        assert!(!ok);
        assert_eq!(err.code, ErrorCode::InvalidConfidenceLevel);
    }

    #[test]
    fn test_one_sample_t_test() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let mut out = TestResultFFI::default();
        let mut err = InferstatError::success();

        let ok = unsafe {
            inferstat_one_sample_t_test(
                array(&values),
                3.0,
                TTestOptionsFFI::default(),
                &mut out,
                &mut err,
            )
        };
        assert!(ok);
        assert_eq!(out.statistic, 0.0);
        assert_eq!(out.p_value, 1.0);
        assert_eq!(out.df, 4.0);
        let method = unsafe { CStr::from_ptr(out.method) };
        assert_eq!(method.to_str().unwrap(), "One-sample t-test");

        unsafe { inferstat_free_test_result(&mut out) };
        assert!(out.method.is_null());
    }

    #[test]
    fn test_variance_check_then_t_test() {
        let g1 = [4.5, 4.8, 5.0, 5.2, 5.5];
        let g2 = [0.0, 2.0, 5.0, 8.0, 10.0];
        let mut check = TestResultFFI::default();
        let mut err = InferstatError::success();

        let ok = unsafe {
            inferstat_variance_equality_check(
                array(&g1),
                array(&g2),
                VarianceCheckOptionsFFI::default(),
                &mut check,
                &mut err,
            )
        };
        assert!(ok);
        assert!(!check.equal_variance);

        let mut out = TestResultFFI::default();
        let opts = TwoSampleTTestOptionsFFI {
            var_equal: check.equal_variance,
            ..Default::default()
        };
        let ok = unsafe {
            inferstat_two_sample_t_test(array(&g1), array(&g2), opts, &mut out, &mut err)
        };
        assert!(ok);
        assert!(out.df < 8.0);
        assert!(!out.equal_variance);

        unsafe {
            inferstat_free_test_result(&mut check);
            inferstat_free_test_result(&mut out);
        }
    }

    #[test]
    fn test_paired_mismatched_lengths() {
        let first = [1.0, 2.0, 3.0];
        let second = [1.0, 2.0];
        let mut out = TestResultFFI::default();
        let mut err = InferstatError::success();

        let ok = unsafe {
            inferstat_paired_t_test(
                array(&first),
                array(&second),
                TTestOptionsFFI::default(),
                &mut out,
                &mut err,
            )
        };
        assert!(!ok);
        assert_eq!(err.code, ErrorCode::MismatchedPairLength);
    }

    #[test]
    fn test_fisher_exact() {
        let mut out = FisherExactResultFFI::default();
        let mut err = InferstatError::success();

        let ok = unsafe {
            inferstat_fisher_exact(30, 70, 45, 55, FisherExactOptionsFFI::default(), &mut out, &mut err)
        };
        assert!(ok);
        assert_eq!(out.odds_ratio_kind, OddsRatioKindFFI::Finite);
        assert_relative_eq!(out.odds_ratio, 0.523810, epsilon = 1e-5);
        assert_relative_eq!(out.p_value, 0.040534, epsilon = 1e-5);

        let ok = unsafe {
            inferstat_fisher_exact(5, 0, 1, 4, FisherExactOptionsFFI::default(), &mut out, &mut err)
        };
        assert!(ok);
        assert_eq!(out.odds_ratio_kind, OddsRatioKindFFI::Infinite);
    }

    #[test]
    fn test_critical_values() {
        assert_relative_eq!(inferstat_z_critical(0.95), 1.959964, epsilon = 1e-5);
        assert_relative_eq!(inferstat_t_critical(0.95, 4), 2.776445, epsilon = 1e-4);
        assert!(inferstat_z_critical(1.0).is_nan());
        assert!(inferstat_z_critical(f64::NAN).is_nan());
        assert!(inferstat_t_critical(0.95, 0).is_nan());
        assert!(inferstat_t_critical(0.0, 4).is_nan());

        // same quantiles as the confidence interval uses
        assert_eq!(
            inferstat_t_critical(0.99, 7),
            critical_value(0.99, CriticalValue::StudentT, 7.0).unwrap()
        );
    }
}
