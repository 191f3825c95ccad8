//! Transparent compression for input and report files.
//!
//! Codecs are chosen per path: first by file extension, then (for reads only) by the
//! magic bytes at the start of the stream. Each codec sits behind its own cargo feature:
//!
//! | codec | extensions | feature |
//! |---|---|---|
//! | gzip | `.gz`, `.gzip` | `compression-gzip` |
//! | zstd | `.zst`, `.zstd` | `compression-zstd` |
//! | bzip2 | `.bz2`, `.bzip2` | `compression-bzip2` |
//! | xz | `.xz` | `compression-xz` |
//!
//! Writers must be closed with [`ReportSink::finish`] so compressed trailers are written
//! and errors surface instead of being swallowed on drop.
//!
//! ```no_run
//! use rowgroup::io::compression::{open_reader, ReportSink};
//! use std::fs::File;
//! use std::io::Write;
//! # fn main() -> anyhow::Result<()> {
//! let mut input = open_reader("records.csv.gz")?;
//! let mut sink = ReportSink::new(File::create("report.txt.zst")?, "report.txt.zst")?;
//! std::io::copy(&mut input, &mut sink)?;
//! sink.finish()?;
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// A compression format known to this build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    #[cfg(feature = "compression-gzip")]
    Gzip,
    #[cfg(feature = "compression-zstd")]
    Zstd,
    #[cfg(feature = "compression-bzip2")]
    Bzip2,
    #[cfg(feature = "compression-xz")]
    Xz,
}

impl Codec {
    /// Every codec compiled into this build, in detection order.
    pub const ALL: &'static [Codec] = &[
        #[cfg(feature = "compression-gzip")]
        Codec::Gzip,
        #[cfg(feature = "compression-zstd")]
        Codec::Zstd,
        #[cfg(feature = "compression-bzip2")]
        Codec::Bzip2,
        #[cfg(feature = "compression-xz")]
        Codec::Xz,
    ];

    pub fn name(self) -> &'static str {
        match self {
            #[cfg(feature = "compression-gzip")]
            Codec::Gzip => "gzip",
            #[cfg(feature = "compression-zstd")]
            Codec::Zstd => "zstd",
            #[cfg(feature = "compression-bzip2")]
            Codec::Bzip2 => "bzip2",
            #[cfg(feature = "compression-xz")]
            Codec::Xz => "xz",
        }
    }

    /// Lowercase extensions, leading dot included.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            #[cfg(feature = "compression-gzip")]
            Codec::Gzip => &[".gz", ".gzip"],
            #[cfg(feature = "compression-zstd")]
            Codec::Zstd => &[".zst", ".zstd"],
            #[cfg(feature = "compression-bzip2")]
            Codec::Bzip2 => &[".bz2", ".bzip2"],
            #[cfg(feature = "compression-xz")]
            Codec::Xz => &[".xz"],
        }
    }

    fn magic(self) -> &'static [u8] {
        match self {
            #[cfg(feature = "compression-gzip")]
            Codec::Gzip => &[0x1f, 0x8b],
            #[cfg(feature = "compression-zstd")]
            Codec::Zstd => &[0x28, 0xb5, 0x2f, 0xfd],
            #[cfg(feature = "compression-bzip2")]
            Codec::Bzip2 => b"BZh",
            #[cfg(feature = "compression-xz")]
            Codec::Xz => &[0xfd, 0x37, 0x7a, 0x58, 0x5a, 0x00],
        }
    }

    /// Codec whose extension ends `path` (case-insensitive).
    pub fn from_path(path: impl AsRef<Path>) -> Option<Codec> {
        let name = path.as_ref().to_string_lossy().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|codec| codec.extensions().iter().any(|ext| name.ends_with(ext)))
    }

    /// Codec whose signature starts `head`.
    pub fn sniff(head: &[u8]) -> Option<Codec> {
        Self::ALL
            .iter()
            .copied()
            .find(|codec| head.starts_with(codec.magic()))
    }

    fn wrap_reader(self, reader: Box<dyn Read>) -> io::Result<Box<dyn Read>> {
        match self {
            #[cfg(feature = "compression-gzip")]
            Codec::Gzip => Ok(Box::new(flate2::read::MultiGzDecoder::new(reader))),
            #[cfg(feature = "compression-zstd")]
            Codec::Zstd => Ok(Box::new(zstd::stream::read::Decoder::new(reader)?)),
            #[cfg(feature = "compression-bzip2")]
            Codec::Bzip2 => Ok(Box::new(bzip2::read::MultiBzDecoder::new(reader))),
            #[cfg(feature = "compression-xz")]
            Codec::Xz => Ok(Box::new(xz2::read::XzDecoder::new_multi_decoder(reader))),
        }
    }
}

/// Open `path` for buffered reading, decompressing when a codec is detected.
///
/// # Errors
/// Returns an error if the file cannot be opened or the decoder cannot be set up.
pub fn open_reader(path: impl AsRef<Path>) -> Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut raw = BufReader::new(file);
    let codec = match Codec::from_path(path) {
        Some(codec) => Some(codec),
        None => {
            let head = raw
                .fill_buf()
                .with_context(|| format!("read {}", path.display()))?;
            Codec::sniff(head)
        }
    };
    match codec {
        Some(codec) => {
            let decoded = codec.wrap_reader(Box::new(raw)).with_context(|| {
                format!("set up {} decoder for {}", codec.name(), path.display())
            })?;
            Ok(Box::new(BufReader::new(decoded)))
        }
        None => Ok(Box::new(raw)),
    }
}

/// Buffered, optionally compressing writer for report output.
pub struct ReportSink {
    inner: SinkInner,
}

enum SinkInner {
    Plain(BufWriter<File>),
    #[cfg(feature = "compression-gzip")]
    Gzip(flate2::write::GzEncoder<BufWriter<File>>),
    #[cfg(feature = "compression-zstd")]
    Zstd(zstd::stream::write::Encoder<'static, BufWriter<File>>),
    #[cfg(feature = "compression-bzip2")]
    Bzip2(bzip2::write::BzEncoder<BufWriter<File>>),
    #[cfg(feature = "compression-xz")]
    Xz(xz2::write::XzEncoder<BufWriter<File>>),
}

impl ReportSink {
    /// Wrap `file`, compressing when the extension of `path_hint` names a codec.
    ///
    /// # Errors
    /// Returns an error if the encoder cannot be set up.
    pub fn new(file: File, path_hint: impl AsRef<Path>) -> Result<Self> {
        let out = BufWriter::new(file);
        let inner = match Codec::from_path(&path_hint) {
            None => SinkInner::Plain(out),
            #[cfg(feature = "compression-gzip")]
            Some(Codec::Gzip) => SinkInner::Gzip(flate2::write::GzEncoder::new(
                out,
                flate2::Compression::default(),
            )),
            #[cfg(feature = "compression-zstd")]
            Some(Codec::Zstd) => SinkInner::Zstd(
                zstd::stream::write::Encoder::new(out, 3).context("set up zstd encoder")?,
            ),
            #[cfg(feature = "compression-bzip2")]
            Some(Codec::Bzip2) => SinkInner::Bzip2(bzip2::write::BzEncoder::new(
                out,
                bzip2::Compression::default(),
            )),
            #[cfg(feature = "compression-xz")]
            Some(Codec::Xz) => SinkInner::Xz(xz2::write::XzEncoder::new(out, 6)),
        };
        Ok(Self { inner })
    }

    /// Write any codec trailer and flush everything down to the file.
    ///
    /// # Errors
    /// Returns an error if finishing the stream or flushing fails.
    pub fn finish(self) -> Result<File> {
        let out = match self.inner {
            SinkInner::Plain(out) => out,
            #[cfg(feature = "compression-gzip")]
            SinkInner::Gzip(enc) => enc.finish().context("finish gzip stream")?,
            #[cfg(feature = "compression-zstd")]
            SinkInner::Zstd(enc) => enc.finish().context("finish zstd stream")?,
            #[cfg(feature = "compression-bzip2")]
            SinkInner::Bzip2(enc) => enc.finish().context("finish bzip2 stream")?,
            #[cfg(feature = "compression-xz")]
            SinkInner::Xz(enc) => enc.finish().context("finish xz stream")?,
        };
        out.into_inner()
            .map_err(|e| e.into_error())
            .context("flush report")
    }

    fn writer(&mut self) -> &mut dyn Write {
        match &mut self.inner {
            SinkInner::Plain(w) => w,
            #[cfg(feature = "compression-gzip")]
            SinkInner::Gzip(w) => w,
            #[cfg(feature = "compression-zstd")]
            SinkInner::Zstd(w) => w,
            #[cfg(feature = "compression-bzip2")]
            SinkInner::Bzip2(w) => w,
            #[cfg(feature = "compression-xz")]
            SinkInner::Xz(w) => w,
        }
    }
}

impl Write for ReportSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer().flush()
    }
}
