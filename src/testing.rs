//! Testing utilities: fixtures and invariant assertions for grouping results.
//!
//! ```
//! use rowgroup::config::GroupingConfig;
//! use rowgroup::domain::Fractional;
//! use rowgroup::pipeline::group_lines;
//! use rowgroup::testing::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let lines = fixture_lines(&[r#""1";"2""#, r#""1";"3""#, r#""9";"3""#]);
//! let grouped = group_lines(&Fractional::default(), &GroupingConfig::default(), lines)?;
//! assert_partition(&grouped.groups, 3);
//! assert_ranks_non_increasing(&grouped.groups);
//! # Ok(())
//! # }
//! ```

use crate::io::lines::SourceLine;
use crate::ordering::RankedGroups;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Build [`SourceLine`]s for `lines` as if they were stored `\n`-terminated in a file.
#[must_use]
pub fn fixture_lines(lines: &[&str]) -> Vec<SourceLine> {
    let mut offset = 0u64;
    lines
        .iter()
        .map(|text| {
            let line = SourceLine::new(*text, offset);
            offset += text.len() as u64 + 1;
            line
        })
        .collect()
}

/// Write `lines` (`\n`-terminated) to `dir/name` and return the path.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_fixture(dir: impl AsRef<Path>, name: &str, lines: &[&str]) -> Result<PathBuf> {
    let path = dir.as_ref().join(name);
    let mut text = lines.join("\n");
    text.push('\n');
    fs::write(&path, text).with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}

/// `n` distinct two-column rows where only consecutive rows share a value (row `i` and
/// row `i + 1` on column `(i + 1) % 2`), so all rows join one group only transitively.
#[must_use]
pub fn chain_lines(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            let first = i.div_ceil(2);
            let second = i / 2 + 1_000_000;
            format!("\"{first}\";\"{second}\"")
        })
        .collect()
}

/// Assert the groups partition `0..row_count`: disjoint, non-empty, and complete.
///
/// # Panics
/// Panics on any violation.
pub fn assert_partition(groups: &RankedGroups, row_count: usize) {
    let mut seen = vec![false; row_count];
    for group in groups.ascending() {
        assert!(!group.is_empty(), "empty group in {groups:?}");
        for &row in group {
            assert!(row < row_count, "row {row} out of range 0..{row_count}");
            assert!(!seen[row], "row {row} appears in more than one group");
            seen[row] = true;
        }
    }
    if let Some(missing) = seen.iter().position(|s| !s) {
        panic!("row {missing} is not in any group");
    }
}

/// Assert group sizes never increase with rank and ranks count up from 1.
///
/// # Panics
/// Panics on any violation.
pub fn assert_ranks_non_increasing(groups: &RankedGroups) {
    let mut previous = usize::MAX;
    for (i, group) in groups.iter().enumerate() {
        assert_eq!(group.rank, i + 1, "ranks must be consecutive from 1");
        assert!(
            group.size() <= previous,
            "group at rank {} has {} members, more than the previous {}",
            group.rank,
            group.size(),
            previous
        );
        previous = group.size();
    }
}

/// Sorted member lists of all groups, for order-independent comparisons.
#[must_use]
pub fn sorted_groups(groups: &RankedGroups) -> Vec<Vec<usize>> {
    let mut out: Vec<Vec<usize>> = groups.ascending().to_vec();
    out.sort();
    out
}
