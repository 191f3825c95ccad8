use log::{Level, LevelFilter, Log, Metadata, Record};
use rowgroup::*;
use std::sync::Mutex;

struct Capture(Mutex<Vec<(Level, String)>>);

impl Log for Capture {
    fn enabled(&self, _: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        if let Ok(mut records) = self.0.lock() {
            records.push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static CAPTURE: Capture = Capture(Mutex::new(Vec::new()));

// The logger is process-wide, so this binary holds a single test.
#[test]
fn every_excluded_line_is_logged_at_debug() -> anyhow::Result<()> {
    log::set_logger(&CAPTURE).map_err(|e| anyhow::anyhow!("{e}"))?;
    log::set_max_level(LevelFilter::Debug);

    let domain = Fractional::default();
    let config = GroupingConfig::default();
    let mut parser = LineParser::new(&domain, &config)?;
    for line in [r#""1";"2""#, "   ", r#""1";"2""#, r#""1";"x""#, r#""3""#] {
        parser.parse_line(line);
    }

    let records = CAPTURE
        .0
        .lock()
        .map_err(|e| anyhow::anyhow!("{e}"))?
        .clone();
    let excluded: Vec<&str> = records
        .iter()
        .filter(|(level, _)| *level == Level::Debug)
        .map(|(_, message)| message.as_str())
        .filter(|message| message.starts_with("excluding "))
        .collect();

    assert_eq!(excluded.len(), 3, "{records:?}");
    assert!(excluded[0].starts_with("excluding blank line"));
    assert!(excluded[1].starts_with("excluding duplicate line"));
    assert!(excluded[2].starts_with("excluding malformed line"));
    Ok(())
}
