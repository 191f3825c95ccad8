//! All-or-nothing file output.

use crate::io::compression::ReportSink;
use anyhow::{Context, Result};
use std::fs::create_dir_all;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Write `path` through `body`, replacing the file only if everything succeeds.
///
/// Output goes to a temporary file in the destination directory (compressed according
/// to the extension of `path`) and is renamed over `path` once `body` returns `Ok` and
/// the stream is finished. On error the temporary file is removed and any existing
/// `path` is left untouched. Parent directories are created as needed.
///
/// # Errors
/// Returns the first error from `body`, from creating or finishing the stream, or from
/// the final rename.
pub fn write_atomic<F>(path: impl AsRef<Path>, body: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            create_dir_all(parent).with_context(|| format!("mkdir -p {}", parent.display()))?;
            parent
        }
        _ => Path::new("."),
    };
    let tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("create temporary file in {}", dir.display()))?;
    let file = tmp
        .reopen()
        .with_context(|| format!("open {}", tmp.path().display()))?;
    let mut sink = ReportSink::new(file, path)?;
    body(&mut sink)?;
    sink.finish()
        .with_context(|| format!("write {}", path.display()))?;
    tmp.persist(path)
        .with_context(|| format!("replace {}", path.display()))?;
    Ok(())
}
