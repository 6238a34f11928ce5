//! Error type shared by every measurement, section, and pattern operation.
//!
//! Failures are raised at the point of detection: measurement errors while a
//! resolver or section is being constructed, continuity errors while a whole
//! pattern is being validated. Nothing is retried or silently defaulted.

use thiserror::Error;

use crate::section::SectionKind;

/// Convenience alias for results carrying a [`PatternError`].
pub type Result<T> = std::result::Result<T, PatternError>;

/// Errors produced while resolving measurements or assembling a pattern.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PatternError {
    /// A vital measurement was absent when the set was constructed.
    #[error("measurement set is missing vital measurements: {missing:?}")]
    IncompleteMeasurement {
        /// Names of the vital measurements that were not supplied.
        missing: Vec<String>,
    },

    /// Neither vital measurements nor values were supplied.
    #[error("empty measurement set: no vital measurements and no values supplied")]
    EmptyMeasurement,

    /// Fewer than two of `end_stitches`, `n_rows`, `increase_rate` were known.
    #[error(
        "need two of end_stitches, n_rows, increase_rate alongside start_stitches; \
         have: {present:?}"
    )]
    UnderdeterminedMeasurement {
        /// Names of the optional quantities that were present.
        present: Vec<&'static str>,
    },

    /// Row count requested from a zero net increase rate.
    #[error(
        "cannot derive n_rows from a zero increase rate (start_stitches {start}, \
         end_stitches {end})"
    )]
    DivisionByZero {
        /// Start stitch count.
        start: f64,
        /// End stitch count.
        end: f64,
    },

    /// All four quantities were supplied but do not satisfy
    /// `end = start + rate * n_rows`.
    #[error(
        "inconsistent increase: {start} stitches + {per_row} per row over {n_rows} rows \
         gives {expected_end}, but end_stitches is {end}"
    )]
    InconsistentMeasurement {
        /// Start stitch count.
        start: f64,
        /// Supplied end stitch count.
        end: f64,
        /// Supplied row count.
        n_rows: f64,
        /// Net stitches gained per row.
        per_row: f64,
        /// End stitch count implied by the other three quantities.
        expected_end: f64,
    },

    /// A section's mandatory input was absent.
    #[error("{section} is missing mandatory measurement `{key}`")]
    MissingMeasurement {
        /// Section whose defaulting logic needed the value.
        section: SectionKind,
        /// Name of the missing measurement.
        key: &'static str,
    },

    /// A measurement value is outside its valid range.
    #[error("measurement `{name}` has invalid value {value}: {reason}")]
    InvalidMeasurement {
        /// Measurement name.
        name: String,
        /// Offending value.
        value: f64,
        /// Constraint that was violated.
        reason: &'static str,
    },

    /// A measurement name was empty.
    #[error("measurement names must be non-empty")]
    InvalidMeasureName,

    /// A named measurement was read but never set.
    #[error("unknown measurement `{name}`")]
    UnknownMeasurement {
        /// Name that was looked up.
        name: String,
    },

    /// A measurement held a value of a different kind than requested.
    #[error("measurement `{name}` is not a {expected}")]
    MeasurementKindMismatch {
        /// Measurement name.
        name: String,
        /// Kind the caller asked for.
        expected: &'static str,
    },

    /// Adjacent sections do not meet with the same stitch count.
    #[error("{before} and {after} won't meet: {before} ends with {end} stitches, {after} begins with {start}")]
    PatternDiscontinuity {
        /// Label of the earlier section.
        before: String,
        /// Label of the later section.
        after: String,
        /// Stitches at the end of the earlier section.
        end: f64,
        /// Stitches at the start of the later section.
        start: f64,
    },

    /// The heel turn does not finish on half the stitches around the foot.
    #[error("heel turn finishes with {actual} stitches; it should have {expected}")]
    HeelMismatch {
        /// Expected heel terminal stitch count.
        expected: f64,
        /// Actual heel terminal stitch count.
        actual: f64,
    },

    /// A unit string other than `in` or `cm`.
    #[error("invalid units `{0}`: valid units are 'in' or 'cm'")]
    InvalidUnits(String),

    /// Gauge and foot measurement were taken in different units.
    #[error("gauge is measured in {gauge} but the foot is measured in {foot}")]
    UnitMismatch {
        /// Gauge units.
        gauge: &'static str,
        /// Foot measurement units.
        foot: &'static str,
    },

    /// A pattern request file could not be parsed.
    #[error("invalid pattern request: {0}")]
    ConfigParse(String),
}

impl PatternError {
    pub(crate) fn invalid(name: impl Into<String>, value: f64, reason: &'static str) -> Self {
        Self::InvalidMeasurement {
            name: name.into(),
            value,
            reason,
        }
    }
}
