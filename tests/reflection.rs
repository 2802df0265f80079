//! End-to-end reflection over a real socket.

use http_reflector::config::ReflectorConfig;
use reqwest::StatusCode;
use serde_json::{json, Value};

mod common;

fn keys(value: &Value) -> Vec<&str> {
    value.as_object().unwrap().keys().map(String::as_str).collect()
}

#[tokio::test]
async fn test_get_reflects_request() {
    let server = common::start_reflector(ReflectorConfig::default()).await;

    let res = common::client()
        .get(server.url("/get?x=1&x=2&y=two%20words"))
        .header("X-Custom", "alpha")
        .header("X-Custom", "beta")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-type"], "application/json");
    assert!(res.headers().contains_key("x-request-id"));

    let text = res.text().await.unwrap();
    // Pretty-printed with two-space indentation.
    assert!(text.contains("\n  \"args\": {"));

    let body: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(keys(&body), vec!["args", "headers", "origin", "url"]);
    assert_eq!(body["args"], json!({"x": "1", "y": "two words"}));
    assert_eq!(body["origin"], "127.0.0.1");
    assert_eq!(body["headers"]["X-Custom"], "alpha");
    assert_eq!(
        body["url"],
        format!("http://{}/get?x=1&x=2&y=two%20words", server.addr)
    );
}

#[tokio::test]
async fn test_ip_and_user_agent() {
    let server = common::start_reflector(ReflectorConfig::default()).await;
    let client = common::client();

    let body: Value = client.get(server.url("/ip")).send().await.unwrap().json().await.unwrap();
    assert_eq!(body, json!({"origin": "127.0.0.1"}));

    let body: Value = client
        .get(server.url("/user-agent"))
        .header("User-Agent", "reflector-test/1.0")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({"user-agent": "reflector-test/1.0"}));
}

#[tokio::test]
async fn test_body_endpoints_ignore_payload() {
    let server = common::start_reflector(ReflectorConfig::default()).await;

    let body: Value = common::client()
        .post(server.url("/post"))
        .json(&json!({"ignored": true}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"], "");
    assert_eq!(body["files"], json!({}));
    assert_eq!(body["form"], json!({}));
    assert_eq!(body["json"], Value::Null);
}

#[tokio::test]
async fn test_method_mismatch_and_unknown_path() {
    let server = common::start_reflector(ReflectorConfig::default()).await;
    let client = common::client();

    let res = client.put(server.url("/post")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(res.headers()["allow"], "POST");

    let res = client.get(server.url("/does-not-exist")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(res.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = common::start_reflector(ReflectorConfig::default()).await;

    let res = common::client()
        .get(server.url("/headers"))
        .header("X-Request-Id", "trace-123")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "trace-123");

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["headers"]["X-Request-Id"], "trace-123");
}

#[tokio::test]
async fn test_cookies_round_trip() {
    let server = common::start_reflector(ReflectorConfig::default()).await;
    let client = common::client();

    let res = client
        .get(server.url("/cookies/set?flavor=oat&size=large"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers()["location"], "/cookies");
    let set: Vec<&str> = res
        .headers()
        .get_all("set-cookie")
        .iter()
        .map(|v| v.to_str().unwrap())
        .collect();
    assert_eq!(set, vec!["flavor=oat; Path=/", "size=large; Path=/"]);

    let body: Value = client
        .get(server.url("/cookies"))
        .header("Cookie", "flavor=oat; size=large")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({"cookies": {"flavor": "oat", "size": "large"}}));

    let res = client
        .get(server.url("/cookies/delete?flavor"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FOUND);
    let deleted = res.headers()["set-cookie"].to_str().unwrap();
    assert!(deleted.starts_with("flavor=;"));
    assert!(deleted.contains("Max-Age=0"));
}
