use klinefetch::{error::ErrorKind, services::binance::BinanceKlineService};
use serde_json::json;
use std::time::Duration;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

async fn setup() -> (MockServer, BinanceKlineService) {
    let mock_server = MockServer::start().await;
    let svc = BinanceKlineService::with_base_url(mock_server.uri());
    (mock_server, svc)
}

fn three_klines_json() -> serde_json::Value {
    json!([
        [1499040000000_i64,"0.01634790","0.80000000","0.01575800","0.01577100","148976.11427815",1499644799999_i64,"2434.19055334",308,"1756.87402397","28.46694368","0"],
        [1499644800000_i64,"0.01577100","0.01590000","0.01573000","0.01580000","100000.00000000",1500249599999_i64,"1500.00000000",200,"0.50000000","1.00000000","0"],
        [1500249600000_i64,"0.01580000","0.01600000","0.01560000","0.01599990","98765.43210000",1500854399999_i64,"1570.12345678",150,"0.25000000","0.75000000","0"]
    ])
}

#[tokio::test]
async fn fetch_returns_rows_in_order() {
    let (mock_server, svc) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/klines"))
        .and(query_param("symbol", "BTCUSDT"))
        .and(query_param("interval", "1d"))
        .respond_with(ResponseTemplate::new(200).set_body_json(three_klines_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let candles = svc.fetch_klines("BTCUSDT", "1d").await.unwrap();

    assert_eq!(candles.len(), 3);
    assert_eq!(candles[0].open_time, 1499040000000);
    assert_eq!(candles[1].open_time, 1499644800000);
    assert_eq!(candles[2].open_time, 1500249600000);

    let first = &candles[0];
    assert_eq!(first.open_price, "0.01634790");
    assert_eq!(first.volume, "148976.11427815");
    assert_eq!(first.close_time, 1499644799999);
    assert_eq!(first.number_of_trades, 308);
    assert_eq!(first.unused_field, "0");

    // trailing zeros survive untouched
    assert_eq!(candles[1].volume, "100000.00000000");
    assert_eq!(candles[2].close_price, "0.01599990");
}

#[tokio::test]
async fn empty_array_yields_no_candles() {
    let (mock_server, svc) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/klines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let candles = svc.fetch_klines("BTCUSDT", "1d").await.unwrap();
    assert!(candles.is_empty());
}

#[tokio::test]
async fn non_success_status_is_fetch_failed() {
    let (mock_server, svc) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/klines"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"code": -1121, "msg": "Invalid symbol."})),
        )
        .mount(&mock_server)
        .await;

    let err = svc.fetch_klines("NOPE", "1d").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FetchFailed);
    let msg = err.to_string();
    assert!(msg.contains("400"), "{msg}");
    assert!(msg.contains("Invalid symbol."), "{msg}");
}

#[tokio::test]
async fn server_error_with_plain_body_is_fetch_failed() {
    let (mock_server, svc) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/klines"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&mock_server)
        .await;

    let err = svc.fetch_klines("BTCUSDT", "1d").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FetchFailed);
    assert!(err.to_string().contains("maintenance"));
}

#[tokio::test]
async fn short_row_is_parse_failed() {
    let (mock_server, svc) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/klines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            [1499040000000_i64,"0.01634790","0.80000000","0.01575800","0.01577100","148976.11427815",1499644799999_i64,"2434.19055334",308,"1756.87402397","28.46694368","0"],
            [1499644800000_i64,"0.01577100","0.01590000","0.01573000"]
        ])))
        .mount(&mock_server)
        .await;

    let err = svc.fetch_klines("BTCUSDT", "1d").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ParseFailed);
}

#[tokio::test]
async fn non_integer_open_time_is_parse_failed() {
    let (mock_server, svc) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/klines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            ["soon","0.01634790","0.80000000","0.01575800","0.01577100","148976.11427815",1499644799999_i64,"2434.19055334",308,"1756.87402397","28.46694368","0"]
        ])))
        .mount(&mock_server)
        .await;

    let err = svc.fetch_klines("BTCUSDT", "1d").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ParseFailed);
    assert!(err.to_string().contains("open_time"));
}

#[tokio::test]
async fn malformed_json_is_parse_failed() {
    let (mock_server, svc) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/klines"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[[1499040000000,"))
        .mount(&mock_server)
        .await;

    let err = svc.fetch_klines("BTCUSDT", "1d").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ParseFailed);
}

#[tokio::test]
async fn unreachable_host_is_fetch_failed() {
    // port 9 (discard) on localhost is expected to refuse connections
    let svc = BinanceKlineService::with_base_url("http://127.0.0.1:9")
        .with_timeout(Duration::from_secs(2));
    let err = svc.fetch_klines("BTCUSDT", "1d").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FetchFailed);
}

#[test]
fn klines_url_encodes_query() {
    let svc = BinanceKlineService::with_base_url("https://api.binance.com/");
    let url = svc.klines_url("BTCUSDT", "1d").unwrap();
    assert_eq!(url.as_str(), "https://api.binance.com/api/v3/klines?symbol=BTCUSDT&interval=1d");

    let url = svc.klines_url("BTC USDT", "1d").unwrap();
    assert_eq!(url.query(), Some("symbol=BTC+USDT&interval=1d"));
}

#[test]
fn bad_base_url_is_fetch_failed() {
    let svc = BinanceKlineService::with_base_url("not a url");
    let err = svc.klines_url("BTCUSDT", "1d").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FetchFailed);
}
