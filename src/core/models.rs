use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading day of price and volume data.
///
/// Prices the provider reported as missing are `f64::NAN`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRow {
    /// Trading date in the exchange's local calendar.
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// Close adjusted for splits and dividends, as supplied by the provider.
    pub adj_close: f64,
    pub volume: Option<u64>,
}

/// A daily time series for one ticker, with the date held as an explicit column.
///
/// Rows are ordered by ascending date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesTable {
    ticker: String,
    rows: Vec<PriceRow>,
}

impl TimeSeriesTable {
    /// Column headers, in the order they are written to CSV.
    pub const COLUMNS: [&'static str; 7] =
        ["Date", "Open", "High", "Low", "Close", "Adj Close", "Volume"];

    /// Builds a table, sorting rows by date if they are not already ordered.
    pub fn new(ticker: impl Into<String>, mut rows: Vec<PriceRow>) -> Self {
        if !rows.is_sorted_by_key(|r| r.date) {
            rows.sort_by_key(|r| r.date);
        }
        Self {
            ticker: ticker.into(),
            rows,
        }
    }

    /// An empty table for `ticker`.
    pub fn empty(ticker: impl Into<String>) -> Self {
        Self::new(ticker, Vec::new())
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn rows(&self) -> &[PriceRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<PriceRow> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The `Date` column.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.rows.iter().map(|r| r.date)
    }

    /// First and last date, if any rows are present.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.rows.first()?.date, self.rows.last()?.date))
    }
}

/// A half-open `[start, end)` range of calendar dates.
///
/// Defaults to 2015-07-01 .. 2025-07-31. An inverted window is allowed and is
/// forwarded unchanged to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl FetchWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Number of calendar days covered; zero for an empty or inverted window.
    pub fn calendar_days(&self) -> u64 {
        u64::try_from((self.end - self.start).num_days()).unwrap_or(0)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }
}

impl Default for FetchWindow {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2015, 7, 1).unwrap_or(NaiveDate::MIN),
            end: NaiveDate::from_ymd_opt(2025, 7, 31).unwrap_or(NaiveDate::MAX),
        }
    }
}
