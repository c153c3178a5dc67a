use anyhow::Context;
use clap::Parser;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use portcheck::{
    config::ScanConfig,
    input::read_targets_path,
    network::PortState,
    output::{open_sink, ResultWriter},
    scanner::engine::ScanEngine,
};

/// Check TCP reachability of every target listed in a CSV file
#[derive(Debug, Parser)]
#[command(name = "portcheck", version, about)]
struct Cli {
    /// CSV file of targets ("host,port" or "name,host,port"), or - for stdin
    targets_file: String,

    /// Maximum number of connection attempts in flight at once
    #[arg(short, long)]
    concurrency: Option<usize>,

    /// Per-attempt connection timeout in milliseconds
    #[arg(short, long, value_name = "MS")]
    timeout: Option<u64>,

    /// Write result rows to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Disable the progress bar
    #[arg(long)]
    no_progress: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("{} {:#}", "error:".bright_red().bold(), err);
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = build_config(&cli);

    let input = read_targets_path(&cli.targets_file)
        .with_context(|| format!("reading targets from {}", cli.targets_file))?;

    let engine = ScanEngine::new(config)?;

    let sink = open_sink(cli.output.as_deref()).context("opening output sink")?;
    let mut writer = ResultWriter::new(sink, input.schema);
    writer.write_header()?;

    let total = input.targets.len();
    let progress = make_progress(total as u64, cli.no_progress)?;
    let start = Instant::now();

    let mut open = 0usize;
    let mut closed = 0usize;
    let mut faulted = 0usize;

    let mut records = engine.scan(input.targets);
    while let Some(record) = records.recv().await {
        match record.state {
            PortState::Open => open += 1,
            PortState::Closed => closed += 1,
            PortState::Error => faulted += 1,
        }
        writer.write_record(&record)?;
        progress.inc(1);
    }
    progress.finish_and_clear();

    log::info!(
        "scanned {} targets in {:.2}s: {} open, {} closed, {} error",
        total,
        start.elapsed().as_secs_f64(),
        open,
        closed,
        faulted
    );

    Ok(())
}

fn build_config(cli: &Cli) -> ScanConfig {
    let mut config = ScanConfig::load_default_config();

    if let Some(concurrency) = cli.concurrency {
        config.concurrency = concurrency;
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_ms = timeout;
    }

    config
}

fn make_progress(total: u64, disabled: bool) -> anyhow::Result<ProgressBar> {
    if disabled {
        return Ok(ProgressBar::hidden());
    }

    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}")?
            .progress_chars("#>-"),
    );
    Ok(bar)
}
