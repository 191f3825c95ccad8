//! Numeric cell domains: how literals become values, how values are bucketed and when
//! two values count as equal.
//!
//! The grouping engine is generic over [`NumericDomain`]; a run picks one domain up front
//! ([`Fractional`] or [`Integral`]) and every component shares it.
//!
//! # Quantized keys
//!
//! A domain maps each value to a [`Key`](NumericDomain::Key). Values with the same key are
//! *candidates* for equality and land in the same column index bucket; the domain's
//! [`equals`](NumericDomain::equals) then confirms the match. For [`Fractional`] the key is
//! the value rendered with a fixed number of fractional digits, and confirmation is an
//! absolute-difference check against `epsilon`. For [`Integral`] the key is the value
//! itself and key equality already implies value equality.

use crate::error::LineError;
use crate::format::format_decimal;
use ordered_float::OrderedFloat;
use std::fmt::Debug;
use std::hash::Hash;

/// Default number of fractional digits used for quantized keys and rendering.
pub const DEFAULT_PRECISION: usize = 5;

/// Default absolute tolerance of the fractional comparator.
pub const DEFAULT_EPSILON: f64 = 1e-5;

/// A numeric cell type together with its equality and quantization policy.
pub trait NumericDomain {
    /// Parsed cell value.
    type Value: Copy + PartialEq + Debug;

    /// Bucket key for a value. Equal values must produce equal keys.
    type Key: Eq + Hash + Clone + Debug;

    /// Short human-readable name, used in logs.
    fn name(&self) -> &'static str;

    /// Convert a literal that already matched the numeric shape (`digits[.digits]`).
    ///
    /// `column` is only used to annotate the error.
    ///
    /// # Errors
    /// Returns a [`LineError`] when the literal holds no number or does not belong to
    /// this domain.
    fn parse_literal(&self, column: usize, literal: &str) -> Result<Self::Value, LineError>;

    /// Quantized key of `value`.
    fn key(&self, value: &Self::Value) -> Self::Key;

    /// Whether two values sharing a key are truly equal.
    fn equals(&self, a: &Self::Value, b: &Self::Value) -> bool;

    /// Text written to the report for `value` (without decoration).
    fn render(&self, value: &Self::Value) -> String;
}

/// Floating point cells compared with an absolute tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fractional {
    pub precision: usize,
    pub epsilon: f64,
}

impl Default for Fractional {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl NumericDomain for Fractional {
    type Value = OrderedFloat<f64>;
    type Key = String;

    fn name(&self) -> &'static str {
        "fractional"
    }

    fn parse_literal(&self, column: usize, literal: &str) -> Result<Self::Value, LineError> {
        literal
            .parse::<f64>()
            .map(OrderedFloat)
            .map_err(|_| LineError::Unparseable {
                column,
                literal: literal.to_string(),
            })
    }

    fn key(&self, value: &Self::Value) -> Self::Key {
        format_decimal(value.0, self.precision)
    }

    fn equals(&self, a: &Self::Value, b: &Self::Value) -> bool {
        (a.0 - b.0).abs() < self.epsilon
    }

    fn render(&self, value: &Self::Value) -> String {
        format_decimal(value.0, self.precision)
    }
}

/// Whole-number cells compared exactly.
///
/// Literals may carry a fractional part only if it is all zeros (`"12.00"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Integral;

impl NumericDomain for Integral {
    type Value = i64;
    type Key = i64;

    fn name(&self) -> &'static str {
        "integral"
    }

    fn parse_literal(&self, column: usize, literal: &str) -> Result<Self::Value, LineError> {
        let (whole, fraction) = literal.split_once('.').unwrap_or((literal, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(LineError::Unparseable {
                column,
                literal: literal.to_string(),
            });
        }
        if fraction.bytes().any(|b| b != b'0') {
            return Err(LineError::FractionInIntegralMode {
                column,
                literal: literal.to_string(),
            });
        }
        if whole.is_empty() {
            return Ok(0);
        }
        whole.parse::<i64>().map_err(|_| LineError::Unparseable {
            column,
            literal: literal.to_string(),
        })
    }

    fn key(&self, value: &Self::Value) -> Self::Key {
        *value
    }

    fn equals(&self, a: &Self::Value, b: &Self::Value) -> bool {
        a == b
    }

    fn render(&self, value: &Self::Value) -> String {
        value.to_string()
    }
}
