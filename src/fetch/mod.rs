//! Fetch-and-persist: one series per call, optionally written to CSV.

use std::path::Path;

use crate::core::{FetchError, FetchWindow, SeriesSource, TimeSeriesTable, YfClient};

/// Downloads a daily series for a ticker and optionally saves it as CSV.
///
/// Every call goes to the source; nothing is cached, and an existing file at the
/// save path is overwritten.
///
/// ```no_run
/// # async fn run() -> Result<(), asset_fetch::FetchError> {
/// use std::path::Path;
/// use asset_fetch::{AssetFetcher, FetchWindow, YfClient};
///
/// let fetcher = AssetFetcher::new(YfClient::builder().build()?);
/// let table = fetcher
///     .fetch("SPY", FetchWindow::default(), Some(Path::new("data/raw/spy.csv")))
///     .await?;
/// println!("{} rows", table.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AssetFetcher<S = YfClient> {
    source: S,
}

impl<S: SeriesSource> AssetFetcher<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetches `ticker` over `window` and, when `save_path` is given, writes the table
    /// there (creating parent directories). The table is returned either way.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self), err, fields(start = %window.start, end = %window.end))
    )]
    pub async fn fetch(
        &self,
        ticker: &str,
        window: FetchWindow,
        save_path: Option<&Path>,
    ) -> Result<TimeSeriesTable, FetchError> {
        let table = self
            .source
            .fetch_series(ticker, window.start, window.end)
            .await?;

        if let Some(path) = save_path {
            table.write_csv(path)?;

            #[cfg(feature = "tracing")]
            tracing::debug!(path = %path.display(), rows = table.len(), "saved csv");
        }

        Ok(table)
    }
}

/// One-shot convenience over the default Yahoo client.
///
/// Equivalent to building a [`YfClient`] and calling [`AssetFetcher::fetch`].
pub async fn fetch_asset_data(
    ticker: &str,
    window: FetchWindow,
    save_path: Option<&Path>,
) -> Result<TimeSeriesTable, FetchError> {
    let client = YfClient::builder().build()?;
    AssetFetcher::new(client)
        .fetch(ticker, window, save_path)
        .await
}
