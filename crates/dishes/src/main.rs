use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use dishes::{
    report, PreferenceIndex, Preferences, Solver, SolverConfig, SolverStatistics, WorkerCount,
};

#[derive(Parser)]
#[command(name = "dishes")]
#[command(about = "Find the fairest ways to share dishes between people")]
#[command(version)]
pub struct Cli {
    #[arg(long, short, value_name = "PATH", help = "Preference file (JSON: person -> dish -> rating)")]
    preferences: PathBuf,
    #[arg(long = "top", short = 'k', value_name = "K", help = "Number of best distributions to print [default: 10]")]
    top: Option<usize>,
    #[arg(long, help = "Normalize each person's ratings to sum to one")]
    normalize: bool,
    #[arg(long, value_name = "PATH", help = "Solver configuration file (.toml, .yaml or .yml)")]
    config: Option<PathBuf>,
    #[arg(long, value_name = "N", help = "Scorer worker threads (0 = score on the main thread)")]
    workers: Option<usize>,
    #[arg(
        long,
        value_name = "SECONDS",
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Abort if solving takes longer than this (at least 1)"
    )]
    time_limit: Option<u64>,
    #[arg(long, short, value_enum, default_value = "text", help = "Output format")]
    format: OutputFormat,
    #[arg(long, value_name = "PATH", help = "Write run statistics JSON to this path")]
    stats_json: Option<PathBuf>,
    #[arg(long, short, help = "Quiet mode: no progress logging on stderr")]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = build_config(&cli)?;
    if config.top_k == 0 {
        return Ok(());
    }

    if !cli.quiet {
        dishes::console::init();
    }

    let prefs = Preferences::from_json_file(&cli.preferences).context("load preferences")?;
    let index = PreferenceIndex::build(&prefs).context("build preference index")?;
    let result = Solver::new(config).solve(&index).context("solve")?;

    if let Some(path) = &cli.stats_json {
        write_statistics(path, &result.statistics)
            .with_context(|| format!("write statistics to {}", path.display()))?;
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    match cli.format {
        OutputFormat::Text => report::write_text(&mut out, &index, &result.solutions)?,
        OutputFormat::Json => report::write_json(&mut out, &index, &result.solutions)?,
    }
    out.flush()?;
    Ok(())
}

/// Loads the config file, if any, then applies command-line overrides.
fn build_config(cli: &Cli) -> Result<SolverConfig> {
    let mut config = match &cli.config {
        Some(path) => SolverConfig::from_file(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => SolverConfig::new(),
    };

    if let Some(top) = cli.top {
        config = config.with_top_k(top);
    }
    if cli.normalize {
        config = config.with_normalize(true);
    }
    if let Some(workers) = cli.workers {
        let count = match workers {
            0 => WorkerCount::None,
            n => WorkerCount::Count(n),
        };
        config = config.with_worker_count(count);
    }
    if let Some(seconds) = cli.time_limit {
        config = config.with_termination_seconds(seconds);
    }
    Ok(config)
}

fn write_statistics(path: &Path, stats: &SolverStatistics) -> Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut file, stats)?;
    writeln!(file)?;
    file.flush()?;
    Ok(())
}
