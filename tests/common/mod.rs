#![allow(dead_code)]

use std::sync::Mutex;
use std::{fs, path::Path};

use asset_fetch::{
    FetchError, PriceRow, SeriesFuture, SeriesSource, TimeSeriesTable, YfClient, YfClientBuilder,
};
use chrono::NaiveDate;
use httpmock::{Method::GET, Mock, MockServer};
use url::Url;

pub fn setup_server() -> MockServer {
    MockServer::start()
}

pub fn client_builder_for(server: &MockServer) -> YfClientBuilder {
    YfClient::builder()
        .base_chart(Url::parse(&format!("{}/v8/finance/chart/", server.base_url())).unwrap())
}

pub fn client_for(server: &MockServer) -> YfClient {
    client_builder_for(server).build().unwrap()
}

pub fn fixture(endpoint: &str, symbol: &str, ext: &str) -> String {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let filename = format!("{}_{}.{}", endpoint, symbol, ext);
    let path = dir.join(&filename);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {}", path.display(), e))
}

pub fn mock_history_chart<'a>(server: &'a MockServer, symbol: &'a str) -> Mock<'a> {
    server.mock(|when, then| {
        when.method(GET).path(format!("/v8/finance/chart/{}", symbol));
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("history_chart", symbol, "json"));
    })
}

pub fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

/// Midnight UTC of `s` in epoch seconds, as sent in `period1`/`period2`.
pub fn period(s: &str) -> String {
    date(s)
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc()
        .timestamp()
        .to_string()
}

pub fn row(d: &str, close: f64, volume: u64) -> PriceRow {
    PriceRow {
        date: date(d),
        open: close - 1.0,
        high: close + 1.0,
        low: close - 2.0,
        close,
        adj_close: close * 0.9,
        volume: Some(volume),
    }
}

fn same_price(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

/// Row-by-row equality where a missing price (`NaN`) matches another missing price.
pub fn assert_same_rows(actual: &TimeSeriesTable, expected: &TimeSeriesTable) {
    assert_eq!(actual.ticker(), expected.ticker());
    assert_eq!(actual.len(), expected.len(), "row count");
    for (a, e) in actual.rows().iter().zip(expected.rows()) {
        assert_eq!(a.date, e.date);
        for (col, x, y) in [
            ("Open", a.open, e.open),
            ("High", a.high, e.high),
            ("Low", a.low, e.low),
            ("Close", a.close, e.close),
            ("Adj Close", a.adj_close, e.adj_close),
        ] {
            assert!(same_price(x, y), "{} {col}: {x} != {y}", a.date);
        }
        assert_eq!(a.volume, e.volume, "{} Volume", a.date);
    }
}

/// In-memory [`SeriesSource`] that records every request.
///
/// Tickers listed in `failing` answer with a provider error; every other ticker
/// gets a small two-row series.
#[derive(Default)]
pub struct FakeSource {
    pub failing: Vec<String>,
    pub calls: Mutex<Vec<(String, NaiveDate, NaiveDate)>>,
}

impl FakeSource {
    pub fn failing(tickers: &[&str]) -> Self {
        Self {
            failing: tickers.iter().map(|t| t.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<(String, NaiveDate, NaiveDate)> {
        self.calls.lock().unwrap().clone()
    }
}

impl SeriesSource for FakeSource {
    fn fetch_series<'a>(
        &'a self,
        ticker: &'a str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> SeriesFuture<'a> {
        Box::pin(async move {
            self.calls
                .lock()
                .unwrap()
                .push((ticker.to_string(), start, end));
            if self.failing.iter().any(|t| t == ticker) {
                return Err(FetchError::Provider {
                    code: "Not Found".into(),
                    description: format!("No data found, symbol may be delisted: {ticker}"),
                });
            }
            Ok(TimeSeriesTable::new(
                ticker,
                vec![
                    row("2020-01-02", 100.0, 1_000),
                    row("2020-01-03", 101.0, 1_100),
                ],
            ))
        })
    }
}
