//! Run statistics.
//!
//! A finished run returns a [`RunStats`]; the CLI logs it and can save it as JSON.

use anyhow::{Context, Result};
use log::{info, warn};
use serde::Serialize;
use serde_json::Value;
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Lines in the input, including blank ones.
    pub lines_read: usize,
    /// Lines that produced a row with cells.
    pub rows_parsed: usize,
    pub blank_lines: usize,
    pub malformed_lines: usize,
    pub duplicate_lines: usize,
    /// Widest row seen.
    pub columns: usize,
    pub groups: usize,
    pub multi_member_groups: usize,
    pub largest_group: usize,
    /// Wall-clock time of the whole run in milliseconds.
    pub elapsed_ms: u64,
}

impl RunStats {
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Log a one-line summary, warning when most of the input was excluded.
    pub fn log_summary(&self) {
        info!(
            "{} lines, {} rows parsed, {} groups ({} with more than one row, largest {}) in {} ms",
            self.lines_read,
            self.rows_parsed,
            self.groups,
            self.multi_member_groups,
            self.largest_group,
            self.elapsed_ms
        );
        let excluded = self.blank_lines + self.malformed_lines + self.duplicate_lines;
        if excluded > 0 {
            info!(
                "excluded lines: {} blank, {} malformed, {} duplicate",
                self.blank_lines, self.malformed_lines, self.duplicate_lines
            );
        }
        if self.lines_read > 0 && self.malformed_lines * 2 > self.lines_read {
            warn!(
                "{} of {} lines were malformed; check the delimiter and quote settings",
                self.malformed_lines, self.lines_read
            );
        }
    }

    /// Save as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or written.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut file = File::create(path).with_context(|| format!("create {}", path.display()))?;
        let formatted = serde_json::to_string_pretty(self)?;
        file.write_all(formatted.as_bytes())
            .with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }
}
