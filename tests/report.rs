use rowgroup::report::{RenderMode, ReportLabels, ReportWriter};
use rowgroup::testing::fixture_lines;
use rowgroup::*;

#[test]
fn chained_rows_render_as_one_group() -> anyhow::Result<()> {
    let report = render_report(
        &GroupingConfig::default(),
        "\"1\";\"2\"\n\"1\";\"3\"\n\"9\";\"3\"\n",
    )?;

    assert_eq!(
        report,
        "Groups with more than one element: 1\n\
         Group 1\n\
         \"1\";\"2\"\n\
         \"1\";\"3\"\n\
         \"9\";\"3\"\n"
    );
    Ok(())
}

#[test]
fn summary_is_omitted_when_every_group_is_a_singleton() -> anyhow::Result<()> {
    let report = render_report(&GroupingConfig::default(), "\"1\"\n\"2\"\n")?;

    assert_eq!(report, "Group 1\n\"2\"\nGroup 2\n\"1\"\n");
    Ok(())
}

#[test]
fn absent_cells_render_as_empty_fields() -> anyhow::Result<()> {
    let report = render_report(&GroupingConfig::default(), "\"1\";\"\";\"2\"\n\"1\"\n")?;

    assert_eq!(
        report,
        "Groups with more than one element: 1\nGroup 1\n\"1\";;\"2\"\n\"1\"\n"
    );
    Ok(())
}

#[test]
fn values_are_normalized_on_output() -> anyhow::Result<()> {
    let report = render_report(
        &GroupingConfig::default(),
        "\"007\";\"1.500000\";\"2.1234567\"\n",
    )?;

    assert_eq!(report, "Group 1\n\"7\";\"1.5\";\"2.12346\"\n");
    Ok(())
}

#[test]
fn large_fractional_values_keep_their_digits() -> anyhow::Result<()> {
    let report = render_report(
        &GroupingConfig::default(),
        "\"472258133803.6\";\"1\"\n\"7609839961096.07\";\"1\"\n\"605133674493.4170\"\n",
    )?;

    assert_eq!(
        report,
        "Groups with more than one element: 1\n\
         Group 1\n\"472258133803.6\";\"1\"\n\"7609839961096.07\";\"1\"\n\
         Group 2\n\"605133674493.417\"\n"
    );
    Ok(())
}

#[test]
fn duplicate_appears_once_and_malformed_loses_its_content() -> anyhow::Result<()> {
    let report = render_report(
        &GroupingConfig::default(),
        "\"5\";\"5\"\n\"5\";\"5\"\n\"abc\"\n",
    )?;

    assert_eq!(report.matches("\"5\";\"5\"").count(), 1);
    assert!(!report.contains("abc"));
    assert_eq!(report.lines().filter(|l| l.starts_with("Group ")).count(), 3);
    Ok(())
}

#[test]
fn custom_labels_and_delimiter() -> anyhow::Result<()> {
    let config = GroupingConfig {
        delimiter: ',',
        labels: ReportLabels {
            summary: "{count} linked groups".to_string(),
            group: "== #{rank} ==".to_string(),
        },
        ..GroupingConfig::default()
    };
    let report = render_report(&config, "\"1\",\"2\"\n\"3\",\"2\"\n")?;

    assert_eq!(
        report,
        "1 linked groups\n== #1 ==\n\"1\",\"2\"\n\"3\",\"2\"\n"
    );
    Ok(())
}

#[test]
fn integral_mode_renders_integers() -> anyhow::Result<()> {
    let config = GroupingConfig {
        mode: NumericMode::Integral,
        ..GroupingConfig::default()
    };
    let report = render_report(&config, "\"10.00\";\"1\"\n\"10\";\"2\"\n")?;

    assert_eq!(
        report,
        "Groups with more than one element: 1\nGroup 1\n\"10\";\"1\"\n\"10\";\"2\"\n"
    );
    Ok(())
}

#[test]
fn invalid_config_is_rejected_before_grouping() {
    let config = GroupingConfig {
        delimiter: '"',
        ..GroupingConfig::default()
    };
    assert!(render_report(&config, "\"1\"\n").is_err());
}

#[test]
fn writer_renders_rows_from_cells() -> anyhow::Result<()> {
    let domain = Fractional::default();
    let config = GroupingConfig::default();
    let grouped = group_lines(
        &domain,
        &config,
        fixture_lines(&[r#""3";"";"4.10""#, "", r#""3""#]),
    )?;
    let writer = ReportWriter::new(&domain, &config, RenderMode::Normalized);

    assert_eq!(writer.render_row(grouped.table.row(0)), r#""3";;"4.1""#);
    assert_eq!(writer.render_row(grouped.table.row(1)), "");

    let mut writer = writer;
    let mut out = Vec::new();
    writer.write(&mut out, &grouped.table, &grouped.groups)?;
    assert_eq!(
        String::from_utf8(out)?,
        "Groups with more than one element: 1\nGroup 1\n\"3\";;\"4.1\"\n\"3\"\nGroup 2\n\n"
    );
    Ok(())
}
