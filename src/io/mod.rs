//! I/O plumbing around the grouping core: reading lines, compression, atomic output.

pub mod compression;
pub mod lines;
pub mod output;

pub use compression::{Codec, ReportSink, open_reader};
pub use lines::{LineSeeker, SourceLine, read_line_at, read_source_lines};
pub use output::write_atomic;
