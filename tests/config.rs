use rowgroup::config::{MAX_INTEGER_DIGITS, MAX_PRECISION};
use rowgroup::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn defaults_match_the_record_format() {
    let config = GroupingConfig::default();

    assert_eq!(config.delimiter, ';');
    assert_eq!(config.quote, '"');
    assert_eq!(config.max_integer_digits, 13);
    assert_eq!(config.precision, 5);
    assert_eq!(config.epsilon, 1e-5);
    assert_eq!(config.mode, NumericMode::Fractional);
    assert_eq!(config.validate(), Ok(()));
    assert_eq!(config.fractional_domain(), Fractional::default());
}

#[test]
fn partial_json_keeps_other_defaults() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{ "delimiter": ",", "mode": "integral", "labels": { "group": "G{rank}" } }"#,
    )?;

    let config = GroupingConfig::from_json_file(&path)?;

    assert_eq!(config.delimiter, ',');
    assert_eq!(config.mode, NumericMode::Integral);
    assert_eq!(config.quote, '"');
    assert_eq!(config.precision, 5);
    assert_eq!(config.labels.group_line(3), "G3");
    assert_eq!(
        config.labels.summary_line(2),
        "Groups with more than one element: 2"
    );
    Ok(())
}

#[test]
fn validation_rejects_unusable_values() {
    let base = GroupingConfig::default();
    let cases = [
        (
            GroupingConfig {
                quote: ';',
                ..base.clone()
            },
            ConfigError::SameDelimiterAndQuote(';'),
        ),
        (
            GroupingConfig {
                delimiter: '.',
                ..base.clone()
            },
            ConfigError::ReservedCharacter {
                role: "delimiter",
                ch: '.',
            },
        ),
        (
            GroupingConfig {
                quote: '7',
                ..base.clone()
            },
            ConfigError::ReservedCharacter {
                role: "quote",
                ch: '7',
            },
        ),
        (
            GroupingConfig {
                precision: MAX_PRECISION + 1,
                ..base.clone()
            },
            ConfigError::PrecisionTooLarge {
                precision: MAX_PRECISION + 1,
                max: MAX_PRECISION,
            },
        ),
        (
            GroupingConfig {
                epsilon: -0.5,
                ..base.clone()
            },
            ConfigError::InvalidEpsilon(-0.5),
        ),
        (
            GroupingConfig {
                max_integer_digits: 0,
                ..base.clone()
            },
            ConfigError::IntegerDigits {
                digits: 0,
                max: MAX_INTEGER_DIGITS,
            },
        ),
    ];

    for (config, expected) in cases {
        assert_eq!(config.validate(), Err(expected));
    }
}

#[test]
fn infinite_epsilon_is_rejected() {
    let config = GroupingConfig {
        epsilon: f64::INFINITY,
        ..GroupingConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidEpsilon(_))
    ));
}

#[test]
fn zero_epsilon_is_allowed() {
    let config = GroupingConfig {
        epsilon: 0.0,
        ..GroupingConfig::default()
    };
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn invalid_file_values_are_reported_with_path() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{ "precision": 99 }"#)?;

    let err = GroupingConfig::from_json_file(&path).expect_err("precision 99 is too large");
    let message = format!("{err:#}");

    assert!(message.contains("bad.json"));
    assert!(message.contains("precision 99"));
    Ok(())
}

#[test]
fn malformed_json_is_an_error() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ delimiter: ")?;

    assert!(GroupingConfig::from_json_file(&path).is_err());
    assert!(GroupingConfig::from_json_file(dir.path().join("missing.json")).is_err());
    Ok(())
}

#[test]
fn config_round_trips_through_json() -> anyhow::Result<()> {
    let config = GroupingConfig {
        delimiter: '|',
        mode: NumericMode::Integral,
        ..GroupingConfig::default()
    };

    let text = serde_json::to_string(&config)?;
    assert!(text.contains(r#""mode":"integral""#));
    let back: GroupingConfig = serde_json::from_str(&text)?;
    assert_eq!(back, config);
    Ok(())
}
