use rowgroup::io::lines::lines_from_reader;
use rowgroup::io::{LineSeeker, SourceLine, read_line_at, read_source_lines};
use std::fs;
use tempfile::tempdir;

#[test]
fn crlf_and_lf_terminators_are_stripped() -> anyhow::Result<()> {
    let lines = lines_from_reader(&b"\"1\"\r\n\"2\"\n\n\"3\""[..])?;

    assert_eq!(
        lines,
        vec![
            SourceLine::new("\"1\"", 0),
            SourceLine::new("\"2\"", 5),
            SourceLine::new("", 9),
            SourceLine::new("\"3\"", 10),
        ]
    );
    Ok(())
}

#[test]
fn lone_carriage_return_ends_a_line() -> anyhow::Result<()> {
    let lines = lines_from_reader(&b"\"1\"\r\"1\"\n"[..])?;

    assert_eq!(
        lines,
        vec![SourceLine::new("\"1\"", 0), SourceLine::new("\"1\"", 4)]
    );
    Ok(())
}

#[test]
fn mixed_terminators_and_trailing_carriage_return() -> anyhow::Result<()> {
    let lines = lines_from_reader(&b"\"1\"\r\r\n\"2\"\n\r\"3\"\r"[..])?;

    assert_eq!(
        lines,
        vec![
            SourceLine::new("\"1\"", 0),
            SourceLine::new("", 4),
            SourceLine::new("\"2\"", 6),
            SourceLine::new("", 10),
            SourceLine::new("\"3\"", 11),
        ]
    );
    Ok(())
}

#[test]
fn invalid_utf8_is_replaced() -> anyhow::Result<()> {
    let lines = lines_from_reader(&b"\"1\"\xff\n"[..])?;

    assert_eq!(lines[0].text, "\"1\"\u{fffd}");
    Ok(())
}

#[test]
fn empty_file_has_no_lines() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("empty.csv");
    fs::write(&path, "")?;

    assert!(read_source_lines(&path)?.is_empty());
    Ok(())
}

#[test]
fn lines_are_re_read_by_offset() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("input.csv");
    fs::write(&path, "\"1\";\"2\"\r\n\"3\"\nlast")?;

    let lines = read_source_lines(&path)?;
    let mut seeker = LineSeeker::open(&path)?;
    // Out of order on purpose.
    for line in lines.iter().rev() {
        assert_eq!(seeker.read_line_at(line.offset)?, line.text);
    }
    assert_eq!(read_line_at(&path, lines[1].offset)?, "\"3\"");
    Ok(())
}

#[test]
fn carriage_return_only_file_is_re_read_by_offset() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("classic-mac.csv");
    fs::write(&path, "\"1\";\"2\"\r\"3\"\r\r\"4\"")?;

    let lines = read_source_lines(&path)?;
    let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, ["\"1\";\"2\"", "\"3\"", "", "\"4\""]);

    let mut seeker = LineSeeker::open(&path)?;
    for line in &lines {
        assert_eq!(seeker.read_line_at(line.offset)?, line.text);
    }
    Ok(())
}

#[test]
fn offset_past_the_end_is_an_error() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("input.csv");
    fs::write(&path, "\"1\"\n")?;

    let mut seeker = LineSeeker::open(&path)?;
    assert!(seeker.read_line_at(4).is_err());
    assert!(seeker.read_line_at(400).is_err());
    Ok(())
}

#[test]
fn missing_file_error_names_the_path() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("nowhere.csv");

    let err = read_source_lines(&path).expect_err("file does not exist");
    assert!(format!("{err:#}").contains("nowhere.csv"));
    assert!(LineSeeker::open(&path).is_err());
    Ok(())
}

#[cfg(feature = "compression-gzip")]
#[test]
fn seeker_rejects_compressed_files() -> anyhow::Result<()> {
    let dir = tempdir()?;

    let by_name = dir.path().join("input.csv.gz");
    fs::write(&by_name, "\"1\"\n")?;
    assert!(LineSeeker::open(&by_name).is_err());

    let by_magic = dir.path().join("input.csv");
    fs::write(&by_magic, [0x1f, 0x8b, 0x08, 0x00])?;
    assert!(LineSeeker::open(&by_magic).is_err());
    Ok(())
}
