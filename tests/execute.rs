use std::collections::HashMap;
use std::time::Duration;

use fluent_http::{Context, Error, HttpClient, Method, Phase, ReqwestTransport, TransportConfig};
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[tokio::test]
async fn test_round_trip_against_server() {
    init_logger();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/foo"))
        .and(header("content-type", "application/json"))
        .and(header("authorization", "Bearer token"))
        .and(body_json(json!({"x": 1})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = HttpClient::new();
    let map = client
        .with_host(server.uri())
        .with_url("foo/")
        .with_method(Method::GET)
        .with_content_type_json()
        .with_authorization("Bearer token")
        .with_body(&json!({"x": 1}))
        .execute(&Context::new())
        .await
        .resp_map()
        .unwrap();

    assert_eq!(Value::Object(map), json!({"ok": true}));
    assert!(client.error().is_none());
}

#[tokio::test]
async fn test_query_string_reaches_server() {
    init_logger();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .and(query_param("a", "1"))
        .and(query_param("q", "two words"))
        .respond_with(ResponseTemplate::new(200).set_body_string("done"))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = HttpClient::new();
    client
        .with_host(server.address().to_string())
        .with_url("/search")
        .with_method("post")
        .with_url_params(HashMap::from([("a".to_string(), "1".to_string())]))
        .add_url_param("q", "two words")
        .execute(&Context::new())
        .await;

    assert_eq!(client.resp_bytes().unwrap(), b"done");
}

#[tokio::test]
async fn test_not_found_is_an_error() {
    init_logger();
    let server = MockServer::start().await;
    Mock::given(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("nope"))
        .mount(&server)
        .await;

    let mut client = HttpClient::new();
    client
        .with_host(server.uri())
        .with_url("/missing")
        .with_method(Method::DELETE)
        .execute(&Context::new())
        .await;

    assert!(matches!(client.error(), Some(Error::Status(s)) if s.as_u16() == 404));
    assert!(client.resp_bytes().is_err());
    assert!(client.resp_map().is_err());
}

#[tokio::test]
async fn test_configured_transport_sends_user_agent() {
    init_logger();
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(header("user-agent", "fluent-http-test/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let transport = ReqwestTransport::with_config(TransportConfig {
        user_agent: "fluent-http-test/1.0".to_string(),
        ..TransportConfig::default()
    })
    .unwrap();

    let mut client = HttpClient::with_transport(transport);
    let map = client
        .with_host(server.uri())
        .with_url("/things/1")
        .with_method(Method::PUT)
        .execute(&Context::new())
        .await
        .resp_map()
        .unwrap();

    assert!(map.is_empty());
}

#[tokio::test]
async fn test_deadline_aborts_slow_response() {
    init_logger();
    let server = MockServer::start().await;
    Mock::given(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let mut client = HttpClient::new();
    client
        .with_host(server.uri())
        .with_url("/slow")
        .with_method(Method::GET)
        .execute(&Context::new().with_timeout(Duration::from_millis(100)))
        .await;

    assert!(matches!(client.error(), Some(Error::DeadlineExceeded)));
}

#[tokio::test]
async fn test_cancellation_aborts_slow_response() {
    init_logger();
    let server = MockServer::start().await;
    Mock::given(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        canceller.cancel();
    });

    let mut client = HttpClient::new();
    client
        .with_host(server.uri())
        .with_url("/slow")
        .with_method(Method::GET)
        .execute(&Context::new().with_cancellation(token))
        .await;

    assert!(matches!(client.error(), Some(Error::Cancelled)));
}

#[tokio::test]
async fn test_connection_failure_is_a_send_error() {
    init_logger();
    // Bind then drop a listener so the port is known to be closed.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let mut client = HttpClient::new();
    client
        .with_host(address.to_string())
        .with_url("/")
        .with_method(Method::GET)
        .execute(&Context::new())
        .await;

    assert!(matches!(
        client.error(),
        Some(Error::Transport { phase: Phase::Send, .. })
    ));
}
