//! # rowgroup
//!
//! Partition delimited numeric records into **groups of connected rows**.
//!
//! Two rows are connected when they hold an equal value in the same column, directly or
//! through a chain of other rows. Each input line becomes one row; the output lists the
//! groups largest first, preceded by the number of groups with more than one row.
//!
//! ## Quick Start
//!
//! ```
//! use rowgroup::config::GroupingConfig;
//! use rowgroup::pipeline::render_report;
//! # use anyhow::Result;
//!
//! # fn main() -> Result<()> {
//! let input = "\"1\";\"2\"\n\"1\";\"3\"\n\"9\";\"3\"\n\"7\"\n";
//! let report = render_report(&GroupingConfig::default(), input)?;
//!
//! assert_eq!(
//!     report,
//!     "Groups with more than one element: 1\n\
//!      Group 1\n\"1\";\"2\"\n\"1\";\"3\"\n\"9\";\"3\"\n\
//!      Group 2\n\"7\"\n"
//! );
//! # Ok(())
//! # }
//! ```
//!
//! Rows 0 and 1 share `1` in column 0, rows 1 and 2 share `3` in column 1, so all three
//! end up together even though rows 0 and 2 have nothing in common.
//!
//! ## Input Format
//!
//! One record per line, fields separated by `;`. A present value is quoted and holds up
//! to 13 integer digits, optionally followed by `.` and fractional digits (`"12.5"`). An
//! absent value is an empty field or an empty quoted field. Rows may differ in length.
//!
//! Lines that are blank, malformed (any field breaking the rules above), or exact repeats
//! of an earlier line containing a digit are kept as rows without cells. They connect to
//! nothing and each forms its own group.
//!
//! ## Core Concepts
//!
//! ### Numeric domains
//!
//! A [`NumericDomain`] decides how literals parse, which *quantized key* a value is
//! bucketed under, and when two values are equal:
//! - [`Fractional`] - `f64` values, keys rendered with 5 fractional digits, equality
//!   within an absolute tolerance of `1e-5`
//! - [`Integral`] - `i64` values compared exactly
//!
//! ### Column index and connectivity engine
//!
//! The [`index::ColumnIndex`] maps each `(column, key)` to the rows holding it that are
//! not grouped yet. [`group_rows`] walks the implicit row graph breadth-first through
//! the index, pruning buckets as rows are absorbed, so total work stays proportional to
//! the number of present cells.
//!
//! ### Ordering and reporting
//!
//! [`RankedGroups`] sorts groups by size (stable) and reads them back largest first with
//! 1-based ranks; [`report::ReportWriter`] renders them.
//!
//! ## Feature Flags
//!
//! - `compression-gzip`, `compression-zstd`, `compression-bzip2`, `compression-xz` -
//!   transparently read compressed input and write compressed reports (all on by default)
//!
//! ## Module Overview
//!
//! - [`parser`] - raw line to row of nullable cells
//! - [`table`] - the row table with source offsets and exclusion counts
//! - [`domain`] - numeric domains and the equality policy
//! - [`index`] - per-column value buckets with pruning
//! - [`engine`] - breadth-first grouping
//! - [`ordering`] - size ordering, ranks and the summary count
//! - [`report`] - report rendering
//! - [`pipeline`] - end-to-end runs over files or in-memory text
//! - [`io`] - line reading with offsets, compression, atomic writes
//! - [`config`] - run configuration
//! - [`stats`] - run statistics
//! - [`testing`] - fixtures and invariant assertions for tests

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod format;
pub mod index;
pub mod io;
pub mod ordering;
pub mod parser;
pub mod pipeline;
pub mod report;
pub mod stats;
pub mod table;
pub mod testing;

pub use config::{GroupingConfig, NumericMode};
pub use domain::{Fractional, Integral, NumericDomain};
pub use engine::{GroupId, Grouping, group_rows};
pub use error::{ConfigError, LineError};
pub use ordering::{RankedGroup, RankedGroups};
pub use parser::{LineOutcome, LineParser, Row};
pub use pipeline::{RunOptions, group_lines, render_report, run};
pub use stats::RunStats;
pub use table::RowTable;
