//! Report rendering.
//!
//! Layout:
//!
//! ```text
//! Groups with more than one element: 1      <- omitted when every group is a singleton
//! Group 1
//! "1";"2"
//! "1";"3"
//! "9";"3"
//! Group 2
//! "7"
//! ```
//!
//! Groups come largest first (see [`RankedGroups`]); members are listed in row order.
//! In [`RenderMode::Normalized`] each row is rebuilt from its cells: present values go
//! through the domain's fixed-precision rendering and are re-quoted, absent cells are
//! written as empty text. [`RenderMode::Verbatim`] copies the original source line.

use crate::config::GroupingConfig;
use crate::domain::NumericDomain;
use crate::io::lines::LineSeeker;
use crate::ordering::RankedGroups;
use crate::parser::Row;
use crate::table::RowTable;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Header texts. `{count}` and `{rank}` are substituted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportLabels {
    pub summary: String,
    pub group: String,
}

impl Default for ReportLabels {
    fn default() -> Self {
        Self {
            summary: "Groups with more than one element: {count}".to_string(),
            group: "Group {rank}".to_string(),
        }
    }
}

impl ReportLabels {
    pub fn summary_line(&self, count: usize) -> String {
        self.summary.replace("{count}", &count.to_string())
    }

    pub fn group_line(&self, rank: usize) -> String {
        self.group.replace("{rank}", &rank.to_string())
    }
}

/// How member rows are written.
pub enum RenderMode {
    /// Rebuild each row from its parsed cells.
    Normalized,
    /// Copy each row's original line from the source file.
    Verbatim(LineSeeker),
}

pub struct ReportWriter<'a, D: NumericDomain> {
    domain: &'a D,
    delimiter: char,
    quote: char,
    labels: &'a ReportLabels,
    mode: RenderMode,
}

impl<'a, D: NumericDomain> ReportWriter<'a, D> {
    pub fn new(domain: &'a D, config: &'a GroupingConfig, mode: RenderMode) -> Self {
        Self {
            domain,
            delimiter: config.delimiter,
            quote: config.quote,
            labels: &config.labels,
            mode,
        }
    }

    /// Render one row from its cells.
    pub fn render_row(&self, row: &Row<D::Value>) -> String {
        render_cells(self.domain, self.delimiter, self.quote, row)
    }

    /// Write the whole report for `groups` over `table`.
    ///
    /// # Errors
    /// Returns an error if writing fails or, in verbatim mode, a source line cannot be
    /// re-read.
    pub fn write<W: Write + ?Sized>(
        &mut self,
        out: &mut W,
        table: &RowTable<D::Value>,
        groups: &RankedGroups,
    ) -> Result<()> {
        let multi = groups.multi_member_count();
        if multi > 0 {
            writeln!(out, "{}", self.labels.summary_line(multi)).context("write summary")?;
        }
        for group in groups.iter() {
            writeln!(out, "{}", self.labels.group_line(group.rank))
                .with_context(|| format!("write header of group {}", group.rank))?;
            for &row in group.members {
                let line = match &mut self.mode {
                    RenderMode::Normalized => {
                        render_cells(self.domain, self.delimiter, self.quote, table.row(row))
                    }
                    RenderMode::Verbatim(seeker) => seeker
                        .read_line_at(table.offset(row))
                        .with_context(|| format!("re-read source of row {row}"))?,
                };
                writeln!(out, "{line}").with_context(|| format!("write row {row}"))?;
            }
        }
        Ok(())
    }
}

fn render_cells<D: NumericDomain>(
    domain: &D,
    delimiter: char,
    quote: char,
    row: &Row<D::Value>,
) -> String {
    let mut line = String::new();
    for (column, cell) in row.cells().iter().enumerate() {
        if column > 0 {
            line.push(delimiter);
        }
        if let Some(value) = cell {
            line.push(quote);
            line.push_str(&domain.render(value));
            line.push(quote);
        }
    }
    line
}
