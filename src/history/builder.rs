mod adjust;
mod assemble;
mod dates;
mod fetch;

use chrono::NaiveDate;

use crate::core::{FetchError, FetchWindow, TimeSeriesTable, YfClient};

use adjust::{cumulative_split_after, split_ratios};
use assemble::{AssembleOpts, assemble_rows};
use dates::{ExchangeCalendar, request_period};
use fetch::fetch_chart;

/// A builder for fetching daily price history for a single symbol.
///
/// Defaults: the [`FetchWindow::default`] date range, plus the client's
/// `auto_adjust` and `keepna` settings (unadjusted OHLC alongside the provider's
/// adjusted close, rows with missing OHLC dropped, unless the client says otherwise).
#[derive(Debug, Clone)]
pub struct HistoryBuilder {
    client: YfClient,
    symbol: String,
    window: FetchWindow,
    auto_adjust: bool,
    keepna: bool,
}

impl HistoryBuilder {
    /// Creates a new `HistoryBuilder` for a given symbol.
    pub fn new(client: &YfClient, symbol: impl Into<String>) -> Self {
        Self {
            client: client.clone(),
            symbol: symbol.into(),
            window: FetchWindow::default(),
            auto_adjust: client.auto_adjust(),
            keepna: client.keepna(),
        }
    }

    /// Sets the half-open `[start, end)` date window.
    ///
    /// An inverted window is not rejected; it is sent to Yahoo as-is.
    pub fn between_dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.window = FetchWindow::new(start, end);
        self
    }

    /// Same as [`between_dates`](Self::between_dates) with a prebuilt window.
    pub fn window(mut self, window: FetchWindow) -> Self {
        self.window = window;
        self
    }

    /// Scale OHLC by the provider's adjustment factor. (Default: the client's setting)
    ///
    /// When enabled `Close` equals `Adj Close` and volume is split-adjusted.
    pub fn auto_adjust(mut self, yes: bool) -> Self {
        self.auto_adjust = yes;
        self
    }

    /// Sets whether to keep data rows that have missing OHLC values. (Default: the client's setting)
    ///
    /// If `true`, missing values are represented as `f64::NAN`. If `false`, rows with any missing
    /// OHLC values are dropped.
    pub fn keepna(mut self, yes: bool) -> Self {
        self.keepna = yes;
        self
    }

    /// Executes the request and returns the series as a table.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self), err, fields(symbol = %self.symbol))
    )]
    pub async fn fetch(self) -> Result<TimeSeriesTable, FetchError> {
        let FetchWindow { start, end } = self.window;

        // 1) Fetch and parse the /chart payload into owned blocks
        let fetched = fetch_chart(
            &self.client,
            &self.symbol,
            request_period(start, end),
            self.auto_adjust,
        )
        .await?;

        // 2) Split factors are only needed when adjusting without an adjclose series
        let cum_split_after = if self.auto_adjust {
            cumulative_split_after(&fetched.ts, &split_ratios(fetched.events.as_ref()))
        } else {
            Vec::new()
        };

        // 3) Rows keyed by exchange-local date
        let rows = assemble_rows(
            &fetched.ts,
            &fetched.quote,
            &fetched.adjclose,
            ExchangeCalendar::from_meta(fetched.meta.as_ref()),
            &cum_split_after,
            &AssembleOpts {
                auto_adjust: self.auto_adjust,
                keepna: self.keepna,
                window: (start, end),
            },
        );

        #[cfg(feature = "tracing")]
        tracing::debug!(rows = rows.len(), "assembled daily rows");

        Ok(TimeSeriesTable::new(self.symbol, rows))
    }
}
