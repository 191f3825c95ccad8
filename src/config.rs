//! Run configuration.
//!
//! [`GroupingConfig`] is plain data with serde support so it can be loaded from a JSON
//! file; every field has a default, so a config file only needs the keys it changes:
//!
//! ```json
//! { "delimiter": ",", "mode": "integral" }
//! ```
//!
//! The CLI applies its own flags on top of the loaded (or default) value and calls
//! [`GroupingConfig::validate`] before anything is read.

use crate::domain::{DEFAULT_EPSILON, DEFAULT_PRECISION, Fractional};
use crate::error::ConfigError;
use crate::report::ReportLabels;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Largest supported fractional precision (`f64` carries ~15-17 significant digits).
pub const MAX_PRECISION: usize = 15;

/// Largest supported integer digit count (fits an `i64`).
pub const MAX_INTEGER_DIGITS: usize = 18;

/// Which numeric domain cells are parsed into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericMode {
    /// `f64` cells, quantized keys plus tolerance check.
    #[default]
    Fractional,
    /// `i64` cells, exact comparison.
    Integral,
}

/// Configuration of the parser, the equality policy and the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupingConfig {
    /// Field separator.
    pub delimiter: char,
    /// Decoration around every present value.
    pub quote: char,
    /// Maximum number of integer digits in a literal.
    pub max_integer_digits: usize,
    /// Fractional digits used for bucket keys and rendering.
    pub precision: usize,
    /// Absolute tolerance for fractional equality (strict `<`).
    pub epsilon: f64,
    pub mode: NumericMode,
    pub labels: ReportLabels,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            delimiter: ';',
            quote: '"',
            max_integer_digits: 13,
            precision: DEFAULT_PRECISION,
            epsilon: DEFAULT_EPSILON,
            mode: NumericMode::Fractional,
            labels: ReportLabels::default(),
        }
    }
}

impl GroupingConfig {
    /// Load and validate a JSON config file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, is not valid JSON for this type, or
    /// fails [`validate`](Self::validate).
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).with_context(|| format!("open {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parse config {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Check that the values describe a parseable format.
    ///
    /// # Errors
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.delimiter == self.quote {
            return Err(ConfigError::SameDelimiterAndQuote(self.delimiter));
        }
        for (role, ch) in [("delimiter", self.delimiter), ("quote", self.quote)] {
            if ch.is_ascii_digit() || ch == '.' || ch == '\n' || ch == '\r' {
                return Err(ConfigError::ReservedCharacter { role, ch });
            }
        }
        if self.precision > MAX_PRECISION {
            return Err(ConfigError::PrecisionTooLarge {
                precision: self.precision,
                max: MAX_PRECISION,
            });
        }
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(ConfigError::InvalidEpsilon(self.epsilon));
        }
        if self.max_integer_digits == 0 || self.max_integer_digits > MAX_INTEGER_DIGITS {
            return Err(ConfigError::IntegerDigits {
                digits: self.max_integer_digits,
                max: MAX_INTEGER_DIGITS,
            });
        }
        Ok(())
    }

    /// The fractional domain described by `precision` and `epsilon`.
    #[must_use]
    pub fn fractional_domain(&self) -> Fractional {
        Fractional {
            precision: self.precision,
            epsilon: self.epsilon,
        }
    }
}
