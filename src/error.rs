//! Typed errors for line parsing and configuration.
//!
//! [`LineError`] is never fatal: a line that fails to parse is kept as a zero-cell row
//! and the error is only logged. [`ConfigError`] aborts a run before any input is read.

use thiserror::Error;

/// Why a raw line was excluded from grouping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum LineError {
    /// The field is not a decorated numeric literal (or an empty decorated field).
    #[error("column {column}: field {field:?} is not a quoted numeric literal")]
    FieldShape { column: usize, field: String },

    /// The integer part carries more digits than the configured maximum.
    #[error("column {column}: {digits} integer digits exceed the maximum of {max}")]
    TooManyIntegerDigits {
        column: usize,
        digits: usize,
        max: usize,
    },

    /// The literal has the right shape but holds no number (e.g. a lone `.`).
    #[error("column {column}: literal {literal:?} is not a number")]
    Unparseable { column: usize, literal: String },

    /// A non-zero fractional part was found while grouping integral values.
    #[error("column {column}: literal {literal:?} has a fractional part in integral mode")]
    FractionInIntegralMode { column: usize, literal: String },
}

/// Invalid [`GroupingConfig`](crate::config::GroupingConfig) values.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("delimiter and quote must differ (both are {0:?})")]
    SameDelimiterAndQuote(char),

    #[error("{role} {ch:?} cannot be a digit, the decimal point or a line break")]
    ReservedCharacter { role: &'static str, ch: char },

    #[error("precision {precision} exceeds the supported maximum of {max}")]
    PrecisionTooLarge { precision: usize, max: usize },

    #[error("epsilon {0} must be finite and non-negative")]
    InvalidEpsilon(f64),

    #[error("max_integer_digits {digits} must be between 1 and {max}")]
    IntegerDigits { digits: usize, max: usize },
}
