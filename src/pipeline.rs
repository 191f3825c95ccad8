//! End-to-end runs: read → parse → index → group → order → write.

use crate::config::{GroupingConfig, NumericMode};
use crate::domain::{Integral, NumericDomain};
use crate::engine::group_rows;
use crate::io::lines::{LineSeeker, SourceLine, lines_from_reader, read_source_lines};
use crate::io::output::write_atomic;
use crate::ordering::RankedGroups;
use crate::parser::LineParser;
use crate::report::{RenderMode, ReportWriter};
use crate::stats::RunStats;
use crate::table::RowTable;
use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;
use std::time::Instant;

/// Where a run reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Copy member lines from the input instead of re-rendering them.
    pub verbatim: bool,
}

impl RunOptions {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            verbatim: false,
        }
    }

    #[must_use]
    pub fn verbatim(mut self, verbatim: bool) -> Self {
        self.verbatim = verbatim;
        self
    }
}

/// A parsed table together with its ordered groups.
#[derive(Debug, Clone)]
pub struct GroupedTable<V> {
    pub table: RowTable<V>,
    pub groups: RankedGroups,
}

/// Parse and group `lines` in memory.
///
/// # Errors
/// Returns an error if the parser cannot be built from `config`.
pub fn group_lines<D, I>(
    domain: &D,
    config: &GroupingConfig,
    lines: I,
) -> Result<GroupedTable<D::Value>>
where
    D: NumericDomain,
    I: IntoIterator<Item = SourceLine>,
{
    let mut parser = LineParser::new(domain, config)?;
    let table = RowTable::parse_lines(&mut parser, lines);
    let groups = RankedGroups::from_grouping(group_rows(domain, &table));
    Ok(GroupedTable { table, groups })
}

/// Group the lines of `text` and render the report as a string.
///
/// # Errors
/// Returns an error if `config` is invalid.
pub fn render_report(config: &GroupingConfig, text: &str) -> Result<String> {
    config.validate()?;
    match config.mode {
        NumericMode::Fractional => render_with(&config.fractional_domain(), config, text),
        NumericMode::Integral => render_with(&Integral, config, text),
    }
}

fn render_with<D: NumericDomain>(
    domain: &D,
    config: &GroupingConfig,
    text: &str,
) -> Result<String> {
    let lines = lines_from_reader(text.as_bytes())?;
    let grouped = group_lines(domain, config, lines)?;
    let mut out = Vec::new();
    ReportWriter::new(domain, config, RenderMode::Normalized).write(
        &mut out,
        &grouped.table,
        &grouped.groups,
    )?;
    String::from_utf8(out).context("report is not valid UTF-8")
}

/// Run the whole pipeline on files.
///
/// The report is written atomically: `options.output` is only replaced once grouping and
/// rendering have both succeeded.
///
/// # Errors
/// Returns an error if `config` is invalid or any read or write fails.
pub fn run(config: &GroupingConfig, options: &RunOptions) -> Result<RunStats> {
    config.validate()?;
    match config.mode {
        NumericMode::Fractional => run_with(&config.fractional_domain(), config, options),
        NumericMode::Integral => run_with(&Integral, config, options),
    }
}

fn run_with<D: NumericDomain>(
    domain: &D,
    config: &GroupingConfig,
    options: &RunOptions,
) -> Result<RunStats> {
    let started = Instant::now();

    let lines = read_source_lines(&options.input)?;
    let lines_read = lines.len();
    info!(
        "read {} lines from {} ({} domain)",
        lines_read,
        options.input.display(),
        domain.name()
    );

    let phase = Instant::now();
    let grouped = group_lines(domain, config, lines)?;
    info!(
        "grouped {} rows into {} groups in {} ms",
        grouped.table.len(),
        grouped.groups.len(),
        phase.elapsed().as_millis()
    );

    let mode = if options.verbatim {
        RenderMode::Verbatim(LineSeeker::open(&options.input)?)
    } else {
        RenderMode::Normalized
    };
    let mut writer = ReportWriter::new(domain, config, mode);
    write_atomic(&options.output, |out| {
        writer.write(out, &grouped.table, &grouped.groups)
    })?;
    info!("report written to {}", options.output.display());

    let tally = grouped.table.tally();
    Ok(RunStats {
        lines_read,
        rows_parsed: lines_read - tally.total(),
        blank_lines: tally.blank,
        malformed_lines: tally.malformed,
        duplicate_lines: tally.duplicate,
        columns: grouped.table.column_count(),
        groups: grouped.groups.len(),
        multi_member_groups: grouped.groups.multi_member_count(),
        largest_group: grouped.groups.largest_size(),
        elapsed_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
    })
}
