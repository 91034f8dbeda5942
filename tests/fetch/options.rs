use crate::common::{client_builder_for, client_for, date, setup_server};
use asset_fetch::{AssetFetcher, FetchWindow, HistoryBuilder};
use httpmock::Method::GET;

const SPLIT_BODY: &str = r#"{
  "chart":{"result":[{
    "meta":{"exchangeTimezoneName":"America/New_York","gmtoffset":-18000},
    "timestamp":[1577975400,1578061800,1578321000],
    "events":{"splits":{"1578061800":{"date":1578061800,"numerator":2,"denominator":1,"splitRatio":"2:1"}}},
    "indicators":{"quote":[{
      "open":[200.0,null,102.0],
      "high":[202.0,103.0,103.0],
      "low":[198.0,100.0,101.0],
      "close":[200.0,101.0,102.0],
      "volume":[1000,2000,3000]
    }]}}],"error":null}
}"#;

fn mock_split<'a>(server: &'a httpmock::MockServer) -> httpmock::Mock<'a> {
    server.mock(|when, then| {
        when.method(GET).path("/v8/finance/chart/XYZ");
        then.status(200)
            .header("content-type", "application/json")
            .body(SPLIT_BODY);
    })
}

#[tokio::test]
async fn raw_rows_keep_provider_prices_and_missing_adjclose_is_nan() {
    let server = setup_server();
    let mock = mock_split(&server);
    let client = client_for(&server);

    let table = HistoryBuilder::new(&client, "XYZ")
        .between_dates(date("2020-01-01"), date("2020-01-10"))
        .fetch()
        .await
        .unwrap();

    mock.assert();
    assert_eq!(table.len(), 2, "bar with null open is dropped");
    assert_eq!(table.rows()[0].close, 200.0);
    assert!(table.rows()[0].adj_close.is_nan());
}

#[tokio::test]
async fn keepna_retains_incomplete_bars() {
    let server = setup_server();
    let _mock = mock_split(&server);
    let client = client_for(&server);

    let table = HistoryBuilder::new(&client, "XYZ")
        .between_dates(date("2020-01-01"), date("2020-01-10"))
        .keepna(true)
        .fetch()
        .await
        .unwrap();

    assert_eq!(table.len(), 3);
    assert!(table.rows()[1].open.is_nan());
    assert_eq!(table.rows()[1].date, date("2020-01-03"));
}

#[tokio::test]
async fn auto_adjust_undoes_later_splits_without_adjclose() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v8/finance/chart/XYZ")
            .query_param_exists("events");
        then.status(200)
            .header("content-type", "application/json")
            .body(SPLIT_BODY);
    });
    let client = client_for(&server);

    let table = HistoryBuilder::new(&client, "XYZ")
        .between_dates(date("2020-01-01"), date("2020-01-10"))
        .auto_adjust(true)
        .fetch()
        .await
        .unwrap();

    mock.assert();
    let first = &table.rows()[0];
    // The 2:1 split on Jan 3 halves the Jan 2 prices and doubles its volume.
    assert_eq!(first.open, 100.0);
    assert_eq!(first.close, 100.0);
    assert_eq!(first.volume, Some(2000));
    let last = &table.rows()[1];
    assert_eq!(last.close, 102.0);
    assert_eq!(last.volume, Some(3000));
}

#[tokio::test]
async fn client_level_auto_adjust_reaches_asset_fetcher() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v8/finance/chart/XYZ")
            .query_param_exists("events");
        then.status(200)
            .header("content-type", "application/json")
            .body(SPLIT_BODY);
    });
    let client = client_builder_for(&server).auto_adjust(true).build().unwrap();

    let table = AssetFetcher::new(client)
        .fetch(
            "XYZ",
            FetchWindow::new(date("2020-01-01"), date("2020-01-10")),
            None,
        )
        .await
        .unwrap();

    mock.assert();
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows()[0].close, 100.0);
    assert_eq!(table.rows()[0].volume, Some(2000));
}

#[tokio::test]
async fn builder_setting_overrides_client_default() {
    let server = setup_server();
    let _mock = mock_split(&server);
    let client = client_builder_for(&server).auto_adjust(true).build().unwrap();

    let table = HistoryBuilder::new(&client, "XYZ")
        .between_dates(date("2020-01-01"), date("2020-01-10"))
        .auto_adjust(false)
        .fetch()
        .await
        .unwrap();

    assert_eq!(table.rows()[0].close, 200.0);
    assert_eq!(table.rows()[0].volume, Some(1000));
}
