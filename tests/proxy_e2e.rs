//! End-to-end tests: real server on an ephemeral port, fake Gemini upstream.

use std::sync::Arc;

use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use carinfo_proxy::proxy::config::ProxyConfig;
use carinfo_proxy::proxy::upstream::client::UpstreamClient;
use carinfo_proxy::proxy::AxumServer;

const MODEL: &str = "gemini-2.5-flash-preview-09-2025";

async fn start_proxy(upstream_base: &str, api_key: Option<&str>) -> (AxumServer, String) {
    let config = ProxyConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        model: MODEL.to_string(),
        api_key: api_key.map(str::to_string),
    };
    let upstream = Arc::new(UpstreamClient::with_base_url(upstream_base));
    let (server, _handle) = AxumServer::start(config, upstream)
        .await
        .expect("server should start");
    let base = format!("http://{}", server.local_addr());
    (server, base)
}

async fn post_query(base: &str, body: &Value) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{}/api/car-info", base))
        .json(body)
        .send()
        .await
        .expect("request should reach the proxy")
}

fn gemini_reply(text: &str) -> Value {
    json!({
        "candidates": [{ "content": { "parts": [{ "text": text }] } }]
    })
}

#[tokio::test]
async fn returns_car_info_from_fenced_reply() {
    let mock = MockServer::start().await;

    let fenced = "```json\n{\"price\":43990,\"range\":480,\"link\":\"https://www.tesla.com/nl_nl\",\"features\":{\"sunroof\":{\"available\":\"trim\",\"note\":\"Premium pack\"}}}\n```";
    Mock::given(method("POST"))
        .and(path(format!("/{}:generateContent", MODEL)))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply(fenced)))
        .expect(1)
        .mount(&mock)
        .await;

    let (server, base) = start_proxy(&mock.uri(), Some("test-key")).await;

    let resp = post_query(&base, &json!({ "userQuery": "Tesla Model 3" })).await;
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["price"], 43990);
    assert_eq!(body["range"], 480);
    assert_eq!(body["link"], "https://www.tesla.com/nl_nl");
    assert_eq!(body["features"]["sunroof"]["available"], "trim");

    server.stop();
}

#[tokio::test]
async fn unfenced_reply_is_relayed_verbatim() {
    let mock = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply("{\"price\":1}")))
        .mount(&mock)
        .await;

    let (server, base) = start_proxy(&mock.uri(), Some("test-key")).await;

    let resp = post_query(&base, &json!({ "userQuery": "Kia EV6" })).await;
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "price": 1 }));

    server.stop();
}

#[tokio::test]
async fn missing_api_key_short_circuits() {
    let mock = MockServer::start().await;

    // No outbound call may be made when the key is absent.
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock)
        .await;

    let (server, base) = start_proxy(&mock.uri(), None).await;

    let resp = post_query(&base, &json!({ "userQuery": "Tesla Model 3" })).await;
    assert_eq!(resp.status(), 500);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "error": "API key is not set up." }));

    server.stop();
}

#[tokio::test]
async fn upstream_error_status_maps_to_500() {
    let mock = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock)
        .await;

    let (server, base) = start_proxy(&mock.uri(), Some("test-key")).await;

    let resp = post_query(&base, &json!({ "userQuery": "Tesla Model 3" })).await;
    assert_eq!(resp.status(), 500);
    let body: Value = resp.json().await.unwrap();
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("Service Unavailable"), "got: {}", message);

    server.stop();
}

#[tokio::test]
async fn missing_candidate_text_is_reported() {
    let mock = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&mock)
        .await;

    let (server, base) = start_proxy(&mock.uri(), Some("test-key")).await;

    let resp = post_query(&base, &json!({ "userQuery": "Tesla Model 3" })).await;
    assert_eq!(resp.status(), 500);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "error": "No valid content returned from API." }));

    server.stop();
}

#[tokio::test]
async fn non_json_payload_is_an_error() {
    let mock = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply("not json")))
        .mount(&mock)
        .await;

    let (server, base) = start_proxy(&mock.uri(), Some("test-key")).await;

    let resp = post_query(&base, &json!({ "userQuery": "Tesla Model 3" })).await;
    assert_eq!(resp.status(), 500);
    let body: Value = resp.json().await.unwrap();
    let message = body["error"].as_str().unwrap();
    assert!(
        message.starts_with("Invalid JSON payload from model:"),
        "got: {}",
        message
    );

    server.stop();
}

#[tokio::test]
async fn malformed_request_body_is_a_500() {
    let mock = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock)
        .await;

    let (server, base) = start_proxy(&mock.uri(), Some("test-key")).await;

    let resp = reqwest::Client::new()
        .post(format!("{}/api/car-info", base))
        .header("content-type", "application/json")
        .body("not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request body:"));

    server.stop();
}

#[tokio::test]
async fn health_check_responds_ok() {
    let mock = MockServer::start().await;
    let (server, base) = start_proxy(&mock.uri(), Some("test-key")).await;

    let resp = reqwest::get(format!("{}/healthz", base)).await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "status": "ok" }));

    server.stop();
}
