//! # asset-fetch
//!
//! Download daily price history for financial tickers from Yahoo Finance and
//! persist each series as CSV.
//!
//! The crate is built around one operation, [`AssetFetcher::fetch`]: request a
//! date-bounded daily series, hold it as a [`TimeSeriesTable`] whose `Date` is an
//! explicit column, and optionally write it to a CSV file (parent directories are
//! created, existing files are replaced). The provider sits behind the
//! [`SeriesSource`] trait, implemented by [`YfClient`].
//!
//! ## Quick start
//!
//! ```no_run
//! use std::path::Path;
//! use asset_fetch::{FetchWindow, fetch_asset_data};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), asset_fetch::FetchError> {
//!     let table = fetch_asset_data(
//!         "TSLA",
//!         FetchWindow::default(),
//!         Some(Path::new("data/raw/tsla.csv")),
//!     )
//!     .await?;
//!     println!("{} rows, span {:?}", table.len(), table.date_span());
//!     Ok(())
//! }
//! ```
//!
//! ## Batches
//!
//! [`run_batch`] walks a [`BatchConfig`] (by default TSLA, BND and SPY into
//! `data/raw/`) sequentially. With [`FailurePolicy::Abort`] the first error ends the
//! run; [`FailurePolicy::Isolate`] records failures per ticker and keeps going.
//!
//! ## Features
//!
//! - `cli` (default): the `asset-fetch` binary.
//! - `dataframe`: `TimeSeriesTable::to_dataframe` via Polars.
//! - `tracing`: spans and debug events on the fetch path.

/// Batch driver over a list of `{ticker, output}` pairs.
pub mod batch;
/// Core client, error type, models and CSV persistence.
pub mod core;
/// The fetch-and-persist operation.
pub mod fetch;
/// Daily history from the Yahoo chart endpoint.
pub mod history;

pub use batch::{BatchConfig, BatchEntry, BatchReport, FailurePolicy, run_batch};
pub use crate::core::{
    ErrorKind, FetchError, FetchWindow, PriceRow, SeriesFuture, SeriesSource, TimeSeriesTable,
    YfClient, YfClientBuilder,
};
pub use fetch::{AssetFetcher, fetch_asset_data};
pub use history::HistoryBuilder;
