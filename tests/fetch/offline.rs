use crate::common::{client_for, date, fixture, period, setup_server};
use asset_fetch::{AssetFetcher, FetchWindow};

#[tokio::test]
async fn spy_first_january_week_has_one_row_per_trading_day() {
    let server = setup_server();

    let mock = server.mock(|when, then| {
        when.method(httpmock::Method::GET)
            .path("/v8/finance/chart/SPY")
            .query_param("period1", period("2019-12-31"))
            .query_param("period2", period("2020-01-11"))
            .query_param("interval", "1d")
            .query_param("includePrePost", "false");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("history_chart", "SPY", "json"));
    });

    let window = FetchWindow::new(date("2020-01-01"), date("2020-01-10"));
    let table = AssetFetcher::new(client_for(&server))
        .fetch("SPY", window, None)
        .await
        .unwrap();

    mock.assert();
    assert_eq!(table.ticker(), "SPY");
    assert!(table.len() <= 7, "weekends and the holiday are excluded");
    assert!(table.len() as u64 <= window.calendar_days());

    let dates: Vec<_> = table.dates().collect();
    assert_eq!(dates.first(), Some(&date("2020-01-02")));
    assert!(dates.windows(2).all(|w| w[0] < w[1]), "dates ascend: {dates:?}");
    assert!(dates.iter().all(|d| window.contains(*d)));

    let first = &table.rows()[0];
    assert!((first.close - 324.87).abs() < 1e-3);
    assert!(first.adj_close < first.close);
    assert_eq!(first.volume, Some(59_151_200));
}

#[tokio::test]
async fn every_call_goes_to_the_network() {
    let server = setup_server();
    let mock = crate::common::mock_history_chart(&server, "SPY");

    let fetcher = AssetFetcher::new(client_for(&server));
    let window = FetchWindow::new(date("2020-01-01"), date("2020-01-10"));
    let a = fetcher.fetch("SPY", window, None).await.unwrap();
    let b = fetcher.fetch("SPY", window, None).await.unwrap();

    mock.assert_hits(2);
    assert_eq!(a, b);
}

#[tokio::test]
async fn narrower_window_trims_bars_the_provider_sent_anyway() {
    let server = setup_server();
    // The mock ignores the period and always serves the whole week.
    let mock = crate::common::mock_history_chart(&server, "SPY");

    let window = FetchWindow::new(date("2020-01-06"), date("2020-01-08"));
    let table = AssetFetcher::new(client_for(&server))
        .fetch("SPY", window, None)
        .await
        .unwrap();

    mock.assert();
    let dates: Vec<_> = table.dates().collect();
    assert_eq!(dates, vec![date("2020-01-06"), date("2020-01-07")]);
}

#[tokio::test]
async fn range_without_trading_days_is_an_empty_table() {
    let server = setup_server();

    let body = r#"{"chart":{"result":[{"meta":{"exchangeTimezoneName":"America/New_York","gmtoffset":-18000},
        "indicators":{"quote":[{}],"adjclose":[{}]}}],"error":null}}"#;
    let mock = server.mock(|when, then| {
        when.method(httpmock::Method::GET).path("/v8/finance/chart/SPY");
        then.status(200)
            .header("content-type", "application/json")
            .body(body);
    });

    let table = AssetFetcher::new(client_for(&server))
        .fetch(
            "SPY",
            FetchWindow::new(date("2020-01-04"), date("2020-01-06")),
            None,
        )
        .await
        .unwrap();

    mock.assert();
    assert!(table.is_empty());
}

#[tokio::test]
async fn inverted_range_is_forwarded_to_the_provider() {
    let server = setup_server();

    let mock = server.mock(|when, then| {
        when.method(httpmock::Method::GET)
            .path("/v8/finance/chart/SPY")
            .query_param("period1", period("2020-01-09"))
            .query_param("period2", period("2020-01-02"));
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"chart":{"result":[{"meta":{},"indicators":{"quote":[{}]}}],"error":null}}"#);
    });

    let table = AssetFetcher::new(client_for(&server))
        .fetch(
            "SPY",
            FetchWindow::new(date("2020-01-10"), date("2020-01-01")),
            None,
        )
        .await
        .unwrap();

    mock.assert();
    assert!(table.is_empty());
}

#[tokio::test]
async fn first_session_east_of_utc_is_requested_and_kept() {
    let server = setup_server();

    // Sydney sessions open at 10:00 local, which is 23:00 UTC on the previous day.
    let body = r#"{"chart":{"result":[{
        "meta":{"exchangeTimezoneName":"Australia/Sydney","timezone":"AEDT","gmtoffset":39600},
        "timestamp":[1577833200,1577919600,1578006000],
        "indicators":{
          "quote":[{
            "open":[33.0,33.5,34.0],
            "high":[33.8,34.1,34.4],
            "low":[32.9,33.2,33.7],
            "close":[33.6,34.0,34.2],
            "volume":[4000000,5000000,6000000]
          }],
          "adjclose":[{"adjclose":[30.1,30.5,30.7]}]
        }}],"error":null}}"#;
    let mock = server.mock(|when, then| {
        when.method(httpmock::Method::GET)
            .path("/v8/finance/chart/BHP.AX")
            .query_param("period1", period("2020-01-01"))
            .query_param("period2", period("2020-01-11"));
        then.status(200)
            .header("content-type", "application/json")
            .body(body);
    });

    let window = FetchWindow::new(date("2020-01-02"), date("2020-01-10"));
    let table = AssetFetcher::new(client_for(&server))
        .fetch("BHP.AX", window, None)
        .await
        .unwrap();

    mock.assert();
    let dates: Vec<_> = table.dates().collect();
    // The Jan 1 bar comes back because of the padding and is trimmed locally.
    assert_eq!(dates, vec![date("2020-01-02"), date("2020-01-03")]);
    assert_eq!(table.rows()[0].close, 34.0);
}
