use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use rowgroup::config::{GroupingConfig, NumericMode};
use rowgroup::pipeline::{RunOptions, run};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "rowgroup")]
#[command(about = "Group delimited numeric records that share values in the same column")]
#[command(version)]
struct Cli {
    #[arg(help = "Path to the input file (may be .gz/.zst/.bz2/.xz compressed)")]
    input: Option<PathBuf>,
    #[arg(long, short, default_value = "output.txt", help = "Report path")]
    output: PathBuf,
    #[arg(long, value_name = "FILE", help = "JSON config file")]
    config: Option<PathBuf>,
    #[arg(long, help = "Compare values as exact integers")]
    integral: bool,
    #[arg(long, help = "Field separator")]
    delimiter: Option<char>,
    #[arg(long, help = "Value decoration character")]
    quote: Option<char>,
    #[arg(long, help = "Fractional digits used for matching and output")]
    precision: Option<usize>,
    #[arg(long, help = "Absolute tolerance for fractional matches")]
    epsilon: Option<f64>,
    #[arg(long, help = "Copy member lines from the input instead of re-rendering them")]
    verbatim: bool,
    #[arg(long, value_name = "PATH", help = "Write run statistics JSON to this path")]
    stats_json: Option<PathBuf>,
    #[arg(long, short, conflicts_with = "quiet", help = "Log per-line details")]
    verbose: bool,
    #[arg(long, short, help = "Only log warnings and errors")]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    let Some(input) = cli.input.clone() else {
        eprintln!("No input file given. Usage: rowgroup <INPUT> [-o OUTPUT]");
        return ExitCode::from(2);
    };

    match execute(&cli, input) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) {
    let level = if cli.verbose {
        LevelFilter::Debug
    } else if cli.quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.as_str()))
        .init();
}

fn execute(cli: &Cli, input: PathBuf) -> Result<()> {
    let config = load_config(cli)?;
    let options = RunOptions::new(input, cli.output.clone()).verbatim(cli.verbatim);
    let stats = run(&config, &options)?;
    stats.log_summary();
    if let Some(path) = &cli.stats_json {
        stats
            .save_to_file(path)
            .with_context(|| format!("save statistics to {}", path.display()))?;
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<GroupingConfig> {
    let mut config = match &cli.config {
        Some(path) => GroupingConfig::from_json_file(path)?,
        None => GroupingConfig::default(),
    };
    if cli.integral {
        config.mode = NumericMode::Integral;
    }
    if let Some(delimiter) = cli.delimiter {
        config.delimiter = delimiter;
    }
    if let Some(quote) = cli.quote {
        config.quote = quote;
    }
    if let Some(precision) = cli.precision {
        config.precision = precision;
    }
    if let Some(epsilon) = cli.epsilon {
        config.epsilon = epsilon;
    }
    config.validate()?;
    Ok(config)
}
