//! The row table: every input line as a row, in input order.
//!
//! Built once by feeding [`SourceLine`]s through a [`LineParser`]; read-only afterwards.
//! Alongside each row it keeps the byte offset of the source line so a report can
//! re-read the original text.

use crate::domain::NumericDomain;
use crate::io::lines::SourceLine;
use crate::parser::{LineOutcome, LineParser, Row};
use serde::Serialize;

/// Counts of lines that were turned into zero-cell rows, by cause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExclusionTally {
    pub blank: usize,
    pub malformed: usize,
    pub duplicate: usize,
}

impl ExclusionTally {
    pub fn total(&self) -> usize {
        self.blank + self.malformed + self.duplicate
    }
}

#[derive(Debug, Clone)]
pub struct RowTable<V> {
    rows: Vec<Row<V>>,
    offsets: Vec<u64>,
    columns: usize,
    tally: ExclusionTally,
}

impl<V> Default for RowTable<V> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            offsets: Vec::new(),
            columns: 0,
            tally: ExclusionTally::default(),
        }
    }
}

impl<V> RowTable<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `lines` in order into a new table.
    pub fn parse_lines<D, I>(parser: &mut LineParser<'_, D>, lines: I) -> Self
    where
        D: NumericDomain<Value = V>,
        I: IntoIterator<Item = SourceLine>,
    {
        let mut table = Self::new();
        for line in lines {
            let outcome = parser.parse_line(&line.text);
            table.push_outcome(outcome, line.offset);
        }
        table
    }

    /// Append the row produced by `outcome`; returns its row index.
    pub fn push_outcome(&mut self, outcome: LineOutcome<V>, offset: u64) -> usize {
        match &outcome {
            LineOutcome::Parsed(_) => {}
            LineOutcome::Blank => self.tally.blank += 1,
            LineOutcome::Duplicate => self.tally.duplicate += 1,
            LineOutcome::Malformed(_) => self.tally.malformed += 1,
        }
        let row = outcome.into_row();
        self.columns = self.columns.max(row.len());
        self.rows.push(row);
        self.offsets.push(offset);
        self.rows.len() - 1
    }

    pub fn rows(&self) -> &[Row<V>] {
        &self.rows
    }

    /// Row at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn row(&self, index: usize) -> &Row<V> {
        &self.rows[index]
    }

    /// Byte offset of the source line of row `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn offset(&self, index: usize) -> u64 {
        self.offsets[index]
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Widest row length seen.
    pub fn column_count(&self) -> usize {
        self.columns
    }

    pub fn tally(&self) -> ExclusionTally {
        self.tally
    }
}
