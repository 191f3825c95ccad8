//! Row parser: one raw line in, one row of nullable numeric cells out.
//!
//! A line is split on the configured delimiter and every field must be either
//!
//! * blank (no characters, or whitespace only) → absent cell,
//! * a decorated blank (`""` or `"  "`) → absent cell,
//! * a decorated literal of up to `max_integer_digits` integer digits, optionally
//!   followed by `.` and any number of fractional digits → value cell.
//!
//! Any other field rejects the whole line. Rejected, blank and duplicate lines are not
//! dropped: they become zero-cell rows so every input line keeps its row index and its
//! own singleton group.

use crate::config::GroupingConfig;
use crate::domain::NumericDomain;
use crate::error::LineError;
use anyhow::{Context, Result};
use log::debug;
use regex::Regex;
use std::collections::HashSet;

/// One parsed record: an ordered sequence of nullable cells.
///
/// A row with zero cells is *excluded*: it never connects to any other row.
#[derive(Debug, Clone, PartialEq)]
pub struct Row<V> {
    cells: Vec<Option<V>>,
}

impl<V> Row<V> {
    pub fn new(cells: Vec<Option<V>>) -> Self {
        Self { cells }
    }

    /// A zero-cell row.
    pub fn excluded() -> Self {
        Self { cells: Vec::new() }
    }

    pub fn cells(&self) -> &[Option<V>] {
        &self.cells
    }

    /// Value at `column`, if the row is long enough and the cell is present.
    pub fn get(&self, column: usize) -> Option<&V> {
        self.cells.get(column).and_then(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Same as [`is_empty`](Self::is_empty): a zero-cell row never connects.
    pub fn is_excluded(&self) -> bool {
        self.is_empty()
    }

    /// Iterate `(column, value)` over present cells.
    pub fn values(&self) -> impl Iterator<Item = (usize, &V)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(column, cell)| cell.as_ref().map(|v| (column, v)))
    }
}

/// Result of parsing a single line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome<V> {
    Parsed(Row<V>),
    /// Empty or whitespace-only line.
    Blank,
    /// Exact repeat of an earlier accepted line that contains at least one digit.
    Duplicate,
    Malformed(LineError),
}

impl<V> LineOutcome<V> {
    /// The row this outcome contributes to the table.
    pub fn into_row(self) -> Row<V> {
        match self {
            LineOutcome::Parsed(row) => row,
            LineOutcome::Blank | LineOutcome::Duplicate | LineOutcome::Malformed(_) => {
                Row::excluded()
            }
        }
    }
}

/// Stateful line parser; remembers accepted lines for duplicate suppression.
pub struct LineParser<'d, D: NumericDomain> {
    domain: &'d D,
    shape: Regex,
    delimiter: char,
    quote: char,
    max_integer_digits: usize,
    seen: HashSet<String>,
}

impl<'d, D: NumericDomain> LineParser<'d, D> {
    /// Build a parser for the delimiter, quote and digit limit of `config`.
    ///
    /// # Errors
    /// Returns an error if the field shape pattern cannot be compiled.
    pub fn new(domain: &'d D, config: &GroupingConfig) -> Result<Self> {
        let quote = regex::escape(&config.quote.to_string());
        let shape = Regex::new(&format!(r"^{quote}([0-9]*)(\.[0-9]*)?{quote}$"))
            .context("compile numeric field pattern")?;
        Ok(Self {
            domain,
            shape,
            delimiter: config.delimiter,
            quote: config.quote,
            max_integer_digits: config.max_integer_digits,
            seen: HashSet::new(),
        })
    }

    /// Parse one raw line (without its line terminator).
    pub fn parse_line(&mut self, line: &str) -> LineOutcome<D::Value> {
        if line.trim().is_empty() {
            debug!("excluding blank line");
            return LineOutcome::Blank;
        }
        if self.seen.contains(line) && line.bytes().any(|b| b.is_ascii_digit()) {
            debug!("excluding duplicate line {line:?}");
            return LineOutcome::Duplicate;
        }
        match self.parse_fields(line) {
            Ok(row) => {
                self.seen.insert(line.to_string());
                LineOutcome::Parsed(row)
            }
            Err(e) => {
                debug!("excluding malformed line {line:?}: {e}");
                LineOutcome::Malformed(e)
            }
        }
    }

    fn parse_fields(&self, line: &str) -> Result<Row<D::Value>, LineError> {
        let mut cells = Vec::new();
        for (column, field) in line.split(self.delimiter).enumerate() {
            if field.trim().is_empty() || self.is_decorated_blank(field) {
                cells.push(None);
                continue;
            }
            let caps = self
                .shape
                .captures(field)
                .ok_or_else(|| LineError::FieldShape {
                    column,
                    field: field.to_string(),
                })?;
            let whole = caps.get(1).map_or("", |m| m.as_str());
            if whole.len() > self.max_integer_digits {
                return Err(LineError::TooManyIntegerDigits {
                    column,
                    digits: whole.len(),
                    max: self.max_integer_digits,
                });
            }
            let literal = &field[self.quote.len_utf8()..field.len() - self.quote.len_utf8()];
            let value = self.domain.parse_literal(column, literal)?;
            cells.push(Some(value));
        }
        Ok(Row::new(cells))
    }

    fn is_decorated_blank(&self, field: &str) -> bool {
        field
            .strip_prefix(self.quote)
            .and_then(|rest| rest.strip_suffix(self.quote))
            .is_some_and(|inner| inner.trim().is_empty())
    }
}
