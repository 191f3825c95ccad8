//! Line source with byte offsets, and random-access re-reading by offset.

use crate::io::compression::{Codec, open_reader};
use anyhow::{Context, Result, bail};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// One raw input line and the byte offset where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub text: String,
    pub offset: u64,
}

impl SourceLine {
    pub fn new(text: impl Into<String>, offset: u64) -> Self {
        Self {
            text: text.into(),
            offset,
        }
    }
}

/// Read every line of `path` (decompressing if needed).
///
/// # Errors
/// Returns an error if the file cannot be opened or read.
pub fn read_source_lines(path: impl AsRef<Path>) -> Result<Vec<SourceLine>> {
    let path = path.as_ref();
    let reader = open_reader(path)?;
    lines_from_reader(reader).with_context(|| format!("read {}", path.display()))
}

/// Split a buffered stream into lines terminated by `\n`, `\r\n` or a lone `\r`.
///
/// A final line without terminator is kept; offsets count bytes of the (decompressed)
/// stream. Invalid UTF-8 is replaced, which can never form a numeric field anyway.
///
/// # Errors
/// Returns an error if reading fails.
pub fn lines_from_reader<R: BufRead>(mut reader: R) -> Result<Vec<SourceLine>> {
    let mut out = Vec::new();
    let mut buf = Vec::new();
    let mut offset = 0u64;
    while let Some(consumed) = read_raw_line(&mut reader, &mut buf)
        .with_context(|| format!("read line {}", out.len() + 1))?
    {
        out.push(SourceLine::new(String::from_utf8_lossy(&buf), offset));
        offset += consumed;
    }
    Ok(out)
}

/// Read one line into `buf` without its terminator.
///
/// Returns the number of bytes consumed including the terminator, or `None` at the end
/// of the stream.
fn read_raw_line<R: BufRead + ?Sized>(
    reader: &mut R,
    buf: &mut Vec<u8>,
) -> io::Result<Option<u64>> {
    buf.clear();
    let mut consumed = 0u64;
    loop {
        let available = reader.fill_buf()?;
        if available.is_empty() {
            return Ok((consumed > 0).then_some(consumed));
        }
        match available.iter().position(|&b| b == b'\n' || b == b'\r') {
            Some(end) => {
                let terminator = available[end];
                buf.extend_from_slice(&available[..end]);
                reader.consume(end + 1);
                consumed += end as u64 + 1;
                if terminator == b'\r' && reader.fill_buf()?.first() == Some(&b'\n') {
                    reader.consume(1);
                    consumed += 1;
                }
                return Ok(Some(consumed));
            }
            None => {
                let len = available.len();
                buf.extend_from_slice(available);
                reader.consume(len);
                consumed += len as u64;
            }
        }
    }
}

/// Seekable handle for re-reading lines of an uncompressed file by offset.
pub struct LineSeeker {
    path: PathBuf,
    reader: BufReader<File>,
    buf: Vec<u8>,
}

impl LineSeeker {
    /// Open `path` for random access.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or is compressed (compressed streams
    /// cannot seek).
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).with_context(|| format!("open {}", path.display()))?;
        let mut reader = BufReader::new(file);
        let codec = match Codec::from_path(&path) {
            Some(codec) => Some(codec),
            None => Codec::sniff(
                reader
                    .fill_buf()
                    .with_context(|| format!("read {}", path.display()))?,
            ),
        };
        if let Some(codec) = codec {
            bail!(
                "{} is {}-compressed; lines can only be re-read from uncompressed input",
                path.display(),
                codec.name()
            );
        }
        Ok(Self {
            path,
            reader,
            buf: Vec::new(),
        })
    }

    /// Read the line starting at byte `offset`, without its terminator.
    ///
    /// # Errors
    /// Returns an error if seeking or reading fails, or `offset` is past the end.
    pub fn read_line_at(&mut self, offset: u64) -> Result<String> {
        self.reader
            .seek(SeekFrom::Start(offset))
            .with_context(|| format!("seek to {offset} in {}", self.path.display()))?;
        let found = read_raw_line(&mut self.reader, &mut self.buf)
            .with_context(|| format!("read at {offset} in {}", self.path.display()))?;
        if found.is_none() {
            bail!("offset {offset} is past the end of {}", self.path.display());
        }
        Ok(String::from_utf8_lossy(&self.buf).into_owned())
    }
}

/// Re-read a single line of `path` at byte `offset`.
///
/// # Errors
/// See [`LineSeeker::open`] and [`LineSeeker::read_line_at`].
pub fn read_line_at(path: impl AsRef<Path>, offset: u64) -> Result<String> {
    LineSeeker::open(path)?.read_line_at(offset)
}
