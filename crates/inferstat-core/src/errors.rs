use thiserror::Error;

/// Errors that can occur during statistical computations
///
/// Every variant is an invalid-input condition detected before or during the
/// computation. Nothing is transient; retrying with the same input fails the
/// same way.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    #[error("Empty sample: {field} contains no observations")]
    EmptySample { field: &'static str },

    #[error("Insufficient sample size: {field} has {actual} observations (need at least {required})")]
    InsufficientSampleSize {
        field: &'static str,
        required: usize,
        actual: usize,
    },

    #[error("Mismatched pair length: first has {first} elements, second has {second}")]
    MismatchedPairLength { first: usize, second: usize },

    #[error("Invalid {parameter}: {value} (must be strictly between 0 and 1)")]
    InvalidConfidenceLevel { parameter: &'static str, value: f64 },

    #[error("Malformed contingency table: {0}")]
    MalformedContingencyTable(String),

    #[error("Degenerate odds ratio: {0}")]
    DegenerateOddsRatio(&'static str),
}

/// Closed set of reason codes carried by [`StatsError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReasonCode {
    EmptySample,
    InsufficientSampleSize,
    MismatchedPairLength,
    InvalidConfidenceLevel,
    MalformedContingencyTable,
    DegenerateOddsRatio,
}

impl ReasonCode {
    /// Upper snake case name of the code, stable across releases
    pub fn as_str(self) -> &'static str {
        match self {
            ReasonCode::EmptySample => "EMPTY_SAMPLE",
            ReasonCode::InsufficientSampleSize => "INSUFFICIENT_SAMPLE_SIZE",
            ReasonCode::MismatchedPairLength => "MISMATCHED_PAIR_LENGTH",
            ReasonCode::InvalidConfidenceLevel => "INVALID_CONFIDENCE_LEVEL",
            ReasonCode::MalformedContingencyTable => "MALFORMED_CONTINGENCY_TABLE",
            ReasonCode::DegenerateOddsRatio => "DEGENERATE_ODDS_RATIO",
        }
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StatsError {
    /// Reason code of this error
    pub fn reason(&self) -> ReasonCode {
        match self {
            StatsError::EmptySample { .. } => ReasonCode::EmptySample,
            StatsError::InsufficientSampleSize { .. } => ReasonCode::InsufficientSampleSize,
            StatsError::MismatchedPairLength { .. } => ReasonCode::MismatchedPairLength,
            StatsError::InvalidConfidenceLevel { .. } => ReasonCode::InvalidConfidenceLevel,
            StatsError::MalformedContingencyTable(_) => ReasonCode::MalformedContingencyTable,
            StatsError::DegenerateOddsRatio(_) => ReasonCode::DegenerateOddsRatio,
        }
    }
}

/// Result type for statistical operations
pub type StatsResult<T> = Result<T, StatsError>;

/// Validate that `value` lies in the open interval (0, 1)
pub(crate) fn check_unit_interval(parameter: &'static str, value: f64) -> StatsResult<()> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(StatsError::InvalidConfidenceLevel { parameter, value })
    }
}

/// Validate that a sample has at least `required` observations
pub(crate) fn check_len(field: &'static str, actual: usize, required: usize) -> StatsResult<()> {
    if actual == 0 {
        return Err(StatsError::EmptySample { field });
    }
    if actual < required {
        return Err(StatsError::InsufficientSampleSize {
            field,
            required,
            actual,
        });
    }
    Ok(())
}
