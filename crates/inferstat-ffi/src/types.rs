//! C-compatible types for FFI boundary

use inferstat_core::{
    Alternative, ConfidenceInterval, CriticalValue, LeveneCenter, OddsRatio, ReasonCode,
    StatsError,
};
use libc::c_char;

/// Error codes for FFI boundary
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,
    EmptySample = 1,
    InsufficientSampleSize = 2,
    MismatchedPairLength = 3,
    InvalidConfidenceLevel = 4,
    MalformedContingencyTable = 5,
    DegenerateOddsRatio = 6,
    /// Null out-pointer or other misuse of the C API
    InvalidArgument = 90,
    InternalError = 99,
}

impl From<ReasonCode> for ErrorCode {
    fn from(reason: ReasonCode) -> Self {
        match reason {
            ReasonCode::EmptySample => ErrorCode::EmptySample,
            ReasonCode::InsufficientSampleSize => ErrorCode::InsufficientSampleSize,
            ReasonCode::MismatchedPairLength => ErrorCode::MismatchedPairLength,
            ReasonCode::InvalidConfidenceLevel => ErrorCode::InvalidConfidenceLevel,
            ReasonCode::MalformedContingencyTable => ErrorCode::MalformedContingencyTable,
            ReasonCode::DegenerateOddsRatio => ErrorCode::DegenerateOddsRatio,
        }
    }
}

/// Error information for FFI
#[repr(C)]
pub struct InferstatError {
    pub code: ErrorCode,
    pub message: [c_char; 256],
}

impl InferstatError {
    pub fn success() -> Self {
        Self {
            code: ErrorCode::Success,
            message: [0; 256],
        }
    }

    pub fn set(&mut self, code: ErrorCode, msg: &str) {
        self.code = code;
        let bytes = msg.as_bytes();
        let len = bytes.len().min(255);
        for (i, &b) in bytes[..len].iter().enumerate() {
            self.message[i] = b as c_char;
        }
        self.message[len] = 0;
    }

    pub fn set_stats_error(&mut self, err: &StatsError) {
        self.set(err.reason().into(), &err.to_string());
    }
}

/// Array of f64 values with validity mask for NULL handling
#[repr(C)]
pub struct DataArray {
    /// Pointer to data values
    pub data: *const f64,
    /// Validity bitmask: bit i is 1 if data[i] is valid, 0 if NULL
    /// Can be NULL if all values are valid
    pub validity: *const u8,
    /// Number of elements
    pub len: usize,
}

impl DataArray {
    /// Check if index i is valid (not NULL)
    ///
    /// # Safety
    /// Caller must ensure index is within bounds
    pub unsafe fn is_valid(&self, i: usize) -> bool {
        if self.validity.is_null() {
            return true;
        }
        ((*self.validity.add(i / 8)) >> (i % 8)) & 1 == 1
    }

    /// Convert to Vec<f64>, replacing NULL with NaN
    ///
    /// NaN marks a missing observation for the core routines, which drop it.
    ///
    /// # Safety
    /// Caller must ensure pointers are valid and len is correct
    pub unsafe fn to_vec(&self) -> Vec<f64> {
        if self.data.is_null() || self.len == 0 {
            return Vec::new();
        }
        (0..self.len)
            .map(|i| {
                if self.is_valid(i) {
                    *self.data.add(i)
                } else {
                    f64::NAN
                }
            })
            .collect()
    }
}

/// Alternative hypothesis codes for FFI
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlternativeFFI {
    TwoSided = 0,
    Less = 1,
    Greater = 2,
}

impl From<AlternativeFFI> for Alternative {
    fn from(alt: AlternativeFFI) -> Self {
        match alt {
            AlternativeFFI::TwoSided => Alternative::TwoSided,
            AlternativeFFI::Less => Alternative::Less,
            AlternativeFFI::Greater => Alternative::Greater,
        }
    }
}

impl From<Alternative> for AlternativeFFI {
    fn from(alt: Alternative) -> Self {
        match alt {
            Alternative::TwoSided => AlternativeFFI::TwoSided,
            Alternative::Less => AlternativeFFI::Less,
            Alternative::Greater => AlternativeFFI::Greater,
        }
    }
}

/// Critical value source for FFI
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriticalValueFFI {
    Normal = 0,
    StudentT = 1,
}

impl From<CriticalValueFFI> for CriticalValue {
    fn from(method: CriticalValueFFI) -> Self {
        match method {
            CriticalValueFFI::Normal => CriticalValue::Normal,
            CriticalValueFFI::StudentT => CriticalValue::StudentT,
        }
    }
}

impl From<CriticalValue> for CriticalValueFFI {
    fn from(method: CriticalValue) -> Self {
        match method {
            CriticalValue::Normal => CriticalValueFFI::Normal,
            CriticalValue::StudentT => CriticalValueFFI::StudentT,
        }
    }
}

/// Levene centre for FFI
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeveneCenterFFI {
    Mean = 0,
    Median = 1,
}

impl From<LeveneCenterFFI> for LeveneCenter {
    fn from(center: LeveneCenterFFI) -> Self {
        match center {
            LeveneCenterFFI::Mean => LeveneCenter::Mean,
            LeveneCenterFFI::Median => LeveneCenter::Median,
        }
    }
}

/// t-test options for FFI
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct TTestOptionsFFI {
    /// Alternative hypothesis
    pub alternative: AlternativeFFI,
}

impl Default for TTestOptionsFFI {
    fn default() -> Self {
        Self {
            alternative: AlternativeFFI::TwoSided,
        }
    }
}

/// Two-sample t-test options for FFI
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct TwoSampleTTestOptionsFFI {
    /// Alternative hypothesis
    pub alternative: AlternativeFFI,
    /// Assumed equal variance (Student's t) vs Welch
    pub var_equal: bool,
}

impl Default for TwoSampleTTestOptionsFFI {
    fn default() -> Self {
        Self {
            alternative: AlternativeFFI::TwoSided,
            var_equal: false,
        }
    }
}

/// Variance check options for FFI
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct VarianceCheckOptionsFFI {
    /// Group centre
    pub center: LeveneCenterFFI,
    /// Equal-variance threshold on the p-value
    pub threshold: f64,
}

impl Default for VarianceCheckOptionsFFI {
    fn default() -> Self {
        Self {
            center: LeveneCenterFFI::Median,
            threshold: 0.05,
        }
    }
}

/// Confidence interval options for FFI
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct IntervalOptionsFFI {
    /// Confidence level in (0, 1)
    pub confidence_level: f64,
    /// Critical value source
    pub method: CriticalValueFFI,
}

impl Default for IntervalOptionsFFI {
    fn default() -> Self {
        Self {
            confidence_level: 0.95,
            method: CriticalValueFFI::Normal,
        }
    }
}

/// Fisher's exact test options for FFI
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FisherExactOptionsFFI {
    /// Alternative hypothesis
    pub alternative: AlternativeFFI,
}

impl Default for FisherExactOptionsFFI {
    fn default() -> Self {
        Self {
            alternative: AlternativeFFI::TwoSided,
        }
    }
}

/// Test result for FFI
#[repr(C)]
pub struct TestResultFFI {
    /// Test statistic (t, F)
    pub statistic: f64,
    /// p-value
    pub p_value: f64,
    /// Degrees of freedom (NaN if not applicable)
    pub df: f64,
    /// Total sample size
    pub n: usize,
    /// Group 1 sample size (for two-sample tests)
    pub n1: usize,
    /// Group 2 sample size (for two-sample tests)
    pub n2: usize,
    /// Alternative hypothesis
    pub alternative: AlternativeFFI,
    /// Equal-variance decision of a variance check, or the assumption a
    /// two-sample t-test ran under; false for every other test
    pub equal_variance: bool,
    /// Test method/name (must be freed)
    pub method: *mut c_char,
}

impl Default for TestResultFFI {
    fn default() -> Self {
        Self {
            statistic: f64::NAN,
            p_value: f64::NAN,
            df: f64::NAN,
            n: 0,
            n1: 0,
            n2: 0,
            alternative: AlternativeFFI::TwoSided,
            equal_variance: false,
            method: std::ptr::null_mut(),
        }
    }
}

/// Confidence interval for FFI
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceIntervalFFI {
    pub lower: f64,
    pub upper: f64,
    pub estimate: f64,
    pub margin: f64,
    pub confidence_level: f64,
    pub method: CriticalValueFFI,
}

impl Default for ConfidenceIntervalFFI {
    fn default() -> Self {
        Self {
            lower: f64::NAN,
            upper: f64::NAN,
            estimate: f64::NAN,
            margin: f64::NAN,
            confidence_level: 0.95,
            method: CriticalValueFFI::Normal,
        }
    }
}

impl From<&ConfidenceInterval> for ConfidenceIntervalFFI {
    fn from(ci: &ConfidenceInterval) -> Self {
        Self {
            lower: ci.lower,
            upper: ci.upper,
            estimate: ci.estimate,
            margin: ci.margin,
            confidence_level: ci.confidence_level,
            method: ci.method.into(),
        }
    }
}

/// Odds ratio kind for FFI
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OddsRatioKindFFI {
    Finite = 0,
    Infinite = 1,
    Undefined = 2,
}

/// Fisher's exact test result for FFI
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FisherExactResultFFI {
    /// p-value
    pub p_value: f64,
    /// Odds ratio (INFINITY or NaN when not finite, see `odds_ratio_kind`)
    pub odds_ratio: f64,
    pub odds_ratio_kind: OddsRatioKindFFI,
    /// Table total
    pub n: u64,
    /// Alternative hypothesis
    pub alternative: AlternativeFFI,
}

impl Default for FisherExactResultFFI {
    fn default() -> Self {
        Self {
            p_value: f64::NAN,
            odds_ratio: f64::NAN,
            odds_ratio_kind: OddsRatioKindFFI::Undefined,
            n: 0,
            alternative: AlternativeFFI::TwoSided,
        }
    }
}

impl OddsRatioKindFFI {
    /// Split an odds ratio into its C value and kind
    pub fn split(odds: OddsRatio) -> (f64, Self) {
        match odds {
            OddsRatio::Finite(v) => (v, OddsRatioKindFFI::Finite),
            OddsRatio::Infinite => (f64::INFINITY, OddsRatioKindFFI::Infinite),
            OddsRatio::Undefined => (f64::NAN, OddsRatioKindFFI::Undefined),
        }
    }
}
