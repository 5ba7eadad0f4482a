//! Lexgrove main entry point
//!
//! Command-line interface for scraping Justia state codes and
//! regulations into per-jurisdiction JSONL record logs.

use clap::Parser;
use lexgrove::config::{load_config_with_hash, lookup_jurisdiction, Config, DatasetKind, JobSpec};
use lexgrove::crawler::{build_http_client, run_job, CrawlJob};
use lexgrove::output::FailureRecorder;
use lexgrove::progress::Aggregator;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

/// Scrape a jurisdiction's legal code hierarchy into JSONL records
///
/// Walks the codes (or regulations) tree for each requested jurisdiction
/// depth-first and appends one record per section to
/// `<dir>/<ABBR>.jsonl`. With `--resume`, an interrupted run picks up
/// from the last recorded section without re-fetching completed
/// subtrees.
#[derive(Parser, Debug)]
#[command(name = "lexgrove")]
#[command(version = "1.0.0")]
#[command(about = "Scrape Justia state codes and regulations", long_about = None)]
struct Cli {
    /// Jurisdiction abbreviations to scrape (e.g. TX VT WY)
    #[arg(value_name = "JURISDICTION", required = true)]
    jurisdictions: Vec<String>,

    /// Edition year for state codes
    #[arg(long, default_value_t = 2023)]
    year: u16,

    /// Scrape the regulations hierarchy instead of the codes
    #[arg(short = 'r', long)]
    regulations: bool,

    /// Resume interrupted scrapes instead of starting over
    #[arg(short = 'c', long)]
    resume: bool,

    /// Number of worker tasks per jurisdiction
    #[arg(short = 't', long, default_value_t = 4)]
    workers: usize,

    /// Path to an optional TOML configuration file
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    if cli.workers == 0 {
        anyhow::bail!("--workers must be at least 1");
    }

    let config = match &cli.config {
        Some(path) => {
            let (config, hash) = load_config_with_hash(path)?;
            tracing::info!(
                "Configuration loaded from {} (hash: {})",
                path.display(),
                hash
            );
            config
        }
        None => Config::default(),
    };

    let dataset = if cli.regulations {
        DatasetKind::Regulations
    } else {
        DatasetKind::Codes
    };

    // Resolve every jurisdiction up front so a typo fails before any
    // fetching starts.
    let mut specs = Vec::new();
    for abbr in &cli.jurisdictions {
        specs.push(JobSpec::new(lookup_jurisdiction(abbr)?, dataset, cli.year));
    }

    run_jobs(specs, &config, cli.resume, cli.workers).await
}

/// Runs all jobs concurrently against one shared client, failure log,
/// and progress aggregator.
async fn run_jobs(
    specs: Vec<JobSpec>,
    config: &Config,
    resume: bool,
    workers: usize,
) -> anyhow::Result<()> {
    let client = build_http_client(&config.fetch)?;
    let failures = FailureRecorder::open(Path::new(&config.output.failure_log))?;

    let (events, receiver) = mpsc::unbounded_channel();
    let aggregator = tokio::spawn(Aggregator::new(receiver).run());

    let mut handles = Vec::new();
    for spec in specs {
        let job = CrawlJob::from_spec(spec, &config.output, resume, workers)?;
        let client = client.clone();
        let failures = failures.clone();
        let events = events.clone();

        handles.push(tokio::spawn(async move {
            let job_id = job.spec.job_id();
            // A fatal error here (root discovery, unusable log) aborts
            // this job only; the other jobs keep running.
            if let Err(e) = run_job(&client, job, failures, events).await {
                tracing::error!("{}: job aborted: {}", job_id, e);
            }
        }));
    }

    // The aggregator's loop ends once every job task has dropped its
    // sender clone and the channel is drained.
    drop(events);

    for handle in handles {
        if let Err(e) = handle.await {
            tracing::error!("job task panicked: {}", e);
        }
    }

    let summary = aggregator.await?;
    let completed: u64 = summary.values().map(|p| p.completed).sum();
    let failed: u64 = summary.values().map(|p| p.failed).sum();
    tracing::info!(
        "All jobs finished: {} leaves recorded, {} failures logged",
        completed,
        failed
    );

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("lexgrove=info,warn"),
            1 => EnvFilter::new("lexgrove=debug,info"),
            2 => EnvFilter::new("lexgrove=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
