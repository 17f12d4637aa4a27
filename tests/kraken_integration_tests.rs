mod common;

use common::{
    config_for, fixed_nonce, read_only_config_for, setup_mock_server, KRAKEN_TEST_SECRET,
};
use cryptex::core::kernel::NonceGenerator;
use cryptex::exchanges::kraken::{
    KrakenConnector, KrakenOrderRequest, OrderSide, TradesHistoryQuery,
};
use cryptex::ExchangeError;
use rust_decimal_macros::dec;
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;
use wiremock::matchers::{body_string, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FORM: &str = "application/x-www-form-urlencoded";

fn connector(server: &MockServer, nonce: NonceGenerator) -> KrakenConnector {
    KrakenConnector::new(config_for(server, "", "K1", KRAKEN_TEST_SECRET))
        .unwrap()
        .with_nonce_generator(nonce)
}

fn ok_body(result: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "error": [], "result": result }))
}

#[tokio::test]
async fn test_server_time_is_public_post() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/0/public/Time"))
        .respond_with(ok_body(json!({
            "unixtime": 1_505_992_256,
            "rfc1123": "Thu, 21 Sep 17 11:10:56 +0000",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let connector = KrakenConnector::new(read_only_config_for(&server, "")).unwrap();
    let document = connector.get_server_time().await.unwrap();
    assert_eq!(document["result"]["unixtime"], 1_505_992_256);

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("API-Sign").is_none());
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn test_public_parameters_in_form_body() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/0/public/Ticker"))
        .and(header("content-type", FORM))
        .and(body_string("pair=XBTUSD%2CETHUSD"))
        .respond_with(ok_body(json!({"XXBTZUSD": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let connector = KrakenConnector::new(read_only_config_for(&server, "")).unwrap();
    connector.get_ticker(&["XBTUSD", "ETHUSD"]).await.unwrap();
}

#[tokio::test]
async fn test_balance_signature_and_headers() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/0/private/Balance"))
        .and(header("API-Key", "K1"))
        .and(header(
            "API-Sign",
            "FCESNX/7PDiEOi4Bt6sWT9fhFzq5diD01D9hvk/ig5ZRKBjC6oSzZejFAy5gE4BXLS9HZVWcYG4SR/JDrGTsbQ==",
        ))
        .and(header("content-type", FORM))
        .and(body_string("nonce=42"))
        .respond_with(ok_body(json!({"ZUSD": "171288.6158"})))
        .expect(1)
        .mount(&server)
        .await;

    let document = connector(&server, fixed_nonce(42))
        .get_account_balance(None)
        .await
        .unwrap();
    assert_eq!(document["result"]["ZUSD"], "171288.6158");
}

#[tokio::test]
async fn test_add_order_signature() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/0/private/AddOrder"))
        .and(header(
            "API-Sign",
            "fwRpBJXTU398ss8yVoC9KXPZ/UGeAa2XzRKsjF7NpRDC6mvEwfvw2pBVjORm9r0ky+Zv0Xu8ydfrpdvNxZXGCg==",
        ))
        .and(body_string(
            "nonce=1616492376594&pair=XBTUSD&type=buy&ordertype=limit&volume=1.25&price=37500",
        ))
        .respond_with(ok_body(json!({
            "descr": {"order": "buy 1.25 XBTUSD @ limit 37500.0"},
            "txid": ["OUF4EM-FRGI2-MQMWZD"],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let order = KrakenOrderRequest::limit("XBTUSD", OrderSide::Buy, dec!(1.25), dec!(37500));
    let document = connector(&server, fixed_nonce(1_616_492_376_594))
        .add_order(&order, None)
        .await
        .unwrap();
    assert_eq!(document["result"]["txid"][0], "OUF4EM-FRGI2-MQMWZD");
}

#[tokio::test]
async fn test_trades_history_sends_type() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/0/private/TradesHistory"))
        .and(body_string_contains("&type=no+position"))
        .respond_with(ok_body(json!({"trades": {}, "count": 0})))
        .expect(1)
        .mount(&server)
        .await;

    let query = TradesHistoryQuery {
        trade_type: Some("no position".to_string()),
        ..Default::default()
    };
    connector(&server, fixed_nonce(1))
        .get_trades_history(&query, None)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_missing_credentials_sends_nothing() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .respond_with(ok_body(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let connector = KrakenConnector::new(read_only_config_for(&server, "")).unwrap();
    let err = connector.cancel_order("OUF4EM-FRGI2-MQMWZD", None).await.unwrap_err();
    assert!(matches!(err, ExchangeError::MissingCredentials { .. }));
}

#[tokio::test]
async fn test_error_array_is_api_error() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/0/private/QueryOrders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": ["EGeneral:Invalid arguments", "EQuery:Unknown order"],
        })))
        .mount(&server)
        .await;

    let err = connector(&server, fixed_nonce(5))
        .query_orders(&["OUF4EM"], Some(true), None, None)
        .await
        .unwrap_err();
    match err {
        ExchangeError::ApiError { message, .. } => {
            assert_eq!(message, "EGeneral:Invalid arguments, EQuery:Unknown order");
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limit_payload_and_status() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/0/private/Balance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": ["EAPI:Rate limit exceeded"],
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/0/public/Depth"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let connector = connector(&server, fixed_nonce(9));
    let err = connector.get_account_balance(None).await.unwrap_err();
    assert!(err.is_rate_limited());

    let err = connector.get_order_book("XBTUSD", Some(10)).await.unwrap_err();
    assert!(matches!(err, ExchangeError::RateLimitExceeded { retry_after: None }));
}

#[tokio::test]
async fn test_server_error_keeps_body_text() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let connector = KrakenConnector::new(read_only_config_for(&server, "")).unwrap();
    let err = connector.get_server_time().await.unwrap_err();
    match err {
        ExchangeError::ApiError { status, message } => {
            assert_eq!(status, 502);
            assert!(message.contains("Bad Gateway"));
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_reports_kraken_error_text() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/0/private/Balance"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"error": ["EService:Unavailable"]})),
        )
        .mount(&server)
        .await;

    let err = connector(&server, fixed_nonce(3))
        .get_account_balance(None)
        .await
        .unwrap_err();
    match err {
        ExchangeError::ApiError { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "EService:Unavailable");
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_json_without_error_array_keeps_body() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/0/public/Time"))
        .respond_with(ResponseTemplate::new(503).set_body_string(r#"{"status":"maintenance"}"#))
        .mount(&server)
        .await;

    let connector = KrakenConnector::new(read_only_config_for(&server, "")).unwrap();
    let err = connector.get_server_time().await.unwrap_err();
    match err {
        ExchangeError::ApiError { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, r#"{"status":"maintenance"}"#);
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_concurrent_private_calls_use_distinct_nonces() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/0/private/Balance"))
        .respond_with(ok_body(json!({})))
        .expect(16)
        .mount(&server)
        .await;

    // Real clock: concurrent calls can land on the same tick
    let connector = Arc::new(
        KrakenConnector::new(config_for(&server, "", "K1", KRAKEN_TEST_SECRET)).unwrap(),
    );
    let handles: Vec<_> = (0..16)
        .map(|_| {
            let connector = Arc::clone(&connector);
            tokio::spawn(async move { connector.get_account_balance(None).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let nonces: HashSet<u64> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|request| {
            let body = String::from_utf8(request.body.clone()).unwrap();
            body.strip_prefix("nonce=").unwrap().parse().unwrap()
        })
        .collect();
    assert_eq!(nonces.len(), 16);
}
