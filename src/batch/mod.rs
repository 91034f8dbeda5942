//! Batch driver: fetch a list of `{ticker, output}` pairs in order.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::{FetchError, FetchWindow, SeriesSource};
use crate::fetch::AssetFetcher;

/// One ticker and the CSV file it is written to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchEntry {
    pub ticker: String,
    pub output: PathBuf,
}

impl BatchEntry {
    pub fn new(ticker: impl Into<String>, output: impl Into<PathBuf>) -> Self {
        Self {
            ticker: ticker.into(),
            output: output.into(),
        }
    }
}

fn default_start() -> NaiveDate {
    FetchWindow::default().start
}

fn default_end() -> NaiveDate {
    FetchWindow::default().end
}

/// What to download and where to put it.
///
/// TOML form (dates are quoted `YYYY-MM-DD` strings, both optional):
///
/// ```toml
/// start = "2015-07-01"
/// end = "2025-07-31"
///
/// [[assets]]
/// ticker = "TSLA"
/// output = "data/raw/tsla.csv"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    #[serde(default = "default_start")]
    pub start: NaiveDate,
    #[serde(default = "default_end")]
    pub end: NaiveDate,
    pub assets: Vec<BatchEntry>,
}

impl Default for BatchConfig {
    /// TSLA, BND and SPY into `data/raw/`, over the default window.
    fn default() -> Self {
        let FetchWindow { start, end } = FetchWindow::default();
        Self {
            start,
            end,
            assets: vec![
                BatchEntry::new("TSLA", "data/raw/tsla.csv"),
                BatchEntry::new("BND", "data/raw/bnd.csv"),
                BatchEntry::new("SPY", "data/raw/spy.csv"),
            ],
        }
    }
}

impl BatchConfig {
    pub fn window(&self) -> FetchWindow {
        FetchWindow::new(self.start, self.end)
    }

    /// Parses a TOML document and checks it with [`BatchConfig::validate`].
    pub fn from_toml_str(content: &str) -> Result<Self, FetchError> {
        let cfg: Self = toml::from_str(content)
            .map_err(|e| FetchError::Config(format!("parse batch TOML: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reads and parses a TOML batch file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FetchError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| FetchError::io(path, e))?;
        Self::from_toml_str(&content)
    }

    /// Rejects an empty asset list and empty tickers. Symbols are otherwise
    /// left for the provider to judge, and the date order is not checked.
    pub fn validate(&self) -> Result<(), FetchError> {
        if self.assets.is_empty() {
            return Err(FetchError::Config("no assets configured".into()));
        }
        if let Some(pos) = self.assets.iter().position(|a| a.ticker.is_empty()) {
            return Err(FetchError::Config(format!("asset #{} has an empty ticker", pos + 1)));
        }
        Ok(())
    }
}

/// How a batch reacts to a failed ticker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop at the first failure and return its error.
    #[default]
    Abort,
    /// Record the failure and continue with the next ticker.
    Isolate,
}

/// A ticker that was fetched and saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Saved {
    pub ticker: String,
    pub output: PathBuf,
    pub rows: usize,
}

/// A ticker that failed under [`FailurePolicy::Isolate`].
#[derive(Debug)]
pub struct Failed {
    pub ticker: String,
    pub error: FetchError,
}

/// Outcome of a batch run, in configuration order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub saved: Vec<Saved>,
    pub failed: Vec<Failed>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Fetches every configured asset in order, one at a time.
///
/// `on_start` is invoked before each ticker is requested; the CLI uses it to print
/// progress. Under [`FailurePolicy::Abort`] the first error is returned and the
/// remaining assets are not attempted.
pub async fn run_batch<S, F>(
    fetcher: &AssetFetcher<S>,
    config: &BatchConfig,
    policy: FailurePolicy,
    mut on_start: F,
) -> Result<BatchReport, FetchError>
where
    S: SeriesSource,
    F: FnMut(&BatchEntry),
{
    let window = config.window();
    let mut report = BatchReport::default();

    for entry in &config.assets {
        on_start(entry);
        match fetcher
            .fetch(&entry.ticker, window, Some(entry.output.as_path()))
            .await
        {
            Ok(table) => report.saved.push(Saved {
                ticker: entry.ticker.clone(),
                output: entry.output.clone(),
                rows: table.len(),
            }),
            Err(error) => match policy {
                FailurePolicy::Abort => return Err(error),
                FailurePolicy::Isolate => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(ticker = %entry.ticker, %error, "fetch failed, continuing");

                    report.failed.push(Failed {
                        ticker: entry.ticker.clone(),
                        error,
                    });
                }
            },
        }
    }

    Ok(report)
}
