//! `asset-fetch`: download daily price history to CSV.
//!
//! With no arguments, fetches TSLA, BND and SPY into `data/raw/` and stops at the
//! first failure.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use asset_fetch::{
    AssetFetcher, BatchConfig, FailurePolicy, FetchError, SeriesSource, YfClient, run_batch,
};
use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "asset-fetch",
    about = "Download daily Yahoo Finance price history to CSV files"
)]
struct Cli {
    /// TOML batch file listing `[[assets]]` with `ticker` and `output`.
    /// Defaults to TSLA, BND and SPY under data/raw/.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start date (YYYY-MM-DD), inclusive. Overrides the config.
    #[arg(long)]
    start: Option<NaiveDate>,

    /// End date (YYYY-MM-DD), exclusive. Overrides the config.
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Keep going after a ticker fails and report all failures at the end.
    #[arg(long, default_value_t = false)]
    keep_going: bool,

    /// Scale Open/High/Low/Close by the provider's adjustment factor.
    #[arg(long, default_value_t = false)]
    auto_adjust: bool,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "asset_fetch=debug",
        _ => "asset_fetch=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A second init (e.g. under a test harness) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(cli: &Cli) -> Result<BatchConfig, FetchError> {
    let mut cfg = match &cli.config {
        Some(path) => BatchConfig::load(path)?,
        None => BatchConfig::default(),
    };
    if let Some(start) = cli.start {
        cfg.start = start;
    }
    if let Some(end) = cli.end {
        cfg.end = end;
    }
    Ok(cfg)
}

fn build_client(cli: &Cli) -> Result<YfClient, FetchError> {
    YfClient::builder().auto_adjust(cli.auto_adjust).build()
}

/// Runs the batch, writing one progress line per ticker to `out`.
///
/// `Ok(false)` means the batch finished with isolated failures.
async fn run<S: SeriesSource>(
    cli: &Cli,
    fetcher: &AssetFetcher<S>,
    out: &mut impl Write,
) -> Result<bool, FetchError> {
    let cfg = load_config(cli)?;
    let policy = if cli.keep_going {
        FailurePolicy::Isolate
    } else {
        FailurePolicy::Abort
    };

    let report = run_batch(fetcher, &cfg, policy, |entry| {
        let _ = writeln!(out, "Fetching {} data...", entry.ticker);
    })
    .await?;

    for saved in &report.saved {
        tracing::info!(
            ticker = %saved.ticker,
            path = %saved.output.display(),
            rows = saved.rows,
            "saved"
        );
    }
    for failed in &report.failed {
        eprintln!("{}: {}", failed.ticker, failed.error);
    }
    if !report.is_success() {
        eprintln!(
            "{} of {} tickers failed",
            report.failed.len(),
            cfg.assets.len()
        );
    }
    Ok(report.is_success())
}

fn exit_code(outcome: Result<bool, FetchError>) -> ExitCode {
    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let outcome = match build_client(&cli) {
        Ok(client) => run(&cli, &AssetFetcher::new(client), &mut io::stdout()).await,
        Err(e) => Err(e),
    };
    exit_code(outcome)
}
