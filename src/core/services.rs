use core::future::Future;
use core::pin::Pin;

use chrono::NaiveDate;

use crate::core::{FetchError, TimeSeriesTable};

/// Boxed future returned by [`SeriesSource::fetch_series`].
pub type SeriesFuture<'a> =
    Pin<Box<dyn Future<Output = Result<TimeSeriesTable, FetchError>> + Send + 'a>>;

/// A source of daily price history.
///
/// This is the seam between [`AssetFetcher`](crate::AssetFetcher) and the market-data
/// provider. It is implemented by [`YfClient`](crate::YfClient); tests substitute
/// in-memory fakes.
pub trait SeriesSource: Send + Sync {
    /// Fetches the daily series for `ticker` covering `[start, end)`.
    ///
    /// The returned table must hold its rows in ascending date order with the
    /// date materialized as a column. An inverted range is not rejected here;
    /// the provider decides what it means.
    fn fetch_series<'a>(
        &'a self,
        ticker: &'a str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> SeriesFuture<'a>;
}

impl<S: SeriesSource + ?Sized> SeriesSource for &S {
    fn fetch_series<'a>(
        &'a self,
        ticker: &'a str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> SeriesFuture<'a> {
        (**self).fetch_series(ticker, start, end)
    }
}

impl<S: SeriesSource + ?Sized> SeriesSource for std::sync::Arc<S> {
    fn fetch_series<'a>(
        &'a self,
        ticker: &'a str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> SeriesFuture<'a> {
        (**self).fetch_series(ticker, start, end)
    }
}
