use quidax_price_alert::config::Config;
use quidax_price_alert::dto::{TickerFetch, UnavailableReason};
use quidax_price_alert::{PriceAlertError, QuidaxClient, TickerSource};

fn client_for(url: &str) -> QuidaxClient {
    let mut config = Config::default();
    config.quidax.api_url = url.to_string();
    config.quidax.timeout_secs = Some(2);
    QuidaxClient::new(&config).unwrap()
}

#[test]
fn test_ticker_url() {
    let client = client_for("https://app.quidax.com/");
    assert_eq!(client.base_url(), "https://app.quidax.com");
    assert_eq!(
        client.ticker_url("btcngn"),
        "https://app.quidax.com/api/v1/markets/tickers/btcngn"
    );
}

#[tokio::test]
async fn test_get_ticker_success() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/markets/tickers/btcngn")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"status":"success","data":{"at":1718000000,"market":"btcngn","ticker":{"price":"200000000","vol":"1.5"}}}"#,
        )
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let fetch = client.get_ticker("btcngn").await.unwrap();

    let ticker = fetch.into_option().unwrap();
    assert_eq!(ticker.price.as_deref(), Some("200000000"));
    assert_eq!(ticker.vol.as_deref(), Some("1.5"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_market_data_keeps_envelope() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/v1/markets/tickers/ethngn")
        .with_status(200)
        .with_body(r#"{"status":"success","data":{"at":1,"market":"ethngn","ticker":{}}}"#)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let response = client.get_market_data("ethngn").await.unwrap();

    assert!(response.is_success());
    assert_eq!(
        response.data.unwrap().market.as_deref(),
        Some("ethngn")
    );
}

#[tokio::test]
async fn test_get_ticker_error_status_in_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/v1/markets/tickers/btcngn")
        .with_status(200)
        .with_body(r#"{"status":"error","message":"market not found"}"#)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let fetch = client.get_ticker("btcngn").await.unwrap();

    assert_eq!(
        fetch,
        TickerFetch::Unavailable(UnavailableReason::Status("error".to_string()))
    );
}

#[tokio::test]
async fn test_get_ticker_http_error_status() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/v1/markets/tickers/btcngn")
        .with_status(503)
        .with_body("service unavailable")
        .create_async()
        .await;

    let client = client_for(&server.url());
    let err = client.get_ticker("btcngn").await.unwrap_err();

    match err {
        PriceAlertError::Status { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "service unavailable");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_get_ticker_malformed_json() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/v1/markets/tickers/btcngn")
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let client = client_for(&server.url());
    let err = client.get_ticker("btcngn").await.unwrap_err();

    assert!(matches!(err, PriceAlertError::Decode(_)));
}

#[tokio::test]
async fn test_get_ticker_connection_refused() {
    let client = client_for("http://127.0.0.1:1");
    let err = client.get_ticker("btcngn").await.unwrap_err();

    assert!(matches!(err, PriceAlertError::Http(_)));
}
