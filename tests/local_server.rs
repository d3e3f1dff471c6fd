//! End-to-end tests of the local gateway emulator.

use std::time::Duration;

use gateway_router::config::RouterConfig;
use gateway_router::demo;

mod common;

#[tokio::test]
async fn test_demo_routes_over_http() {
    let server = common::start_server(demo::routes(false).unwrap(), RouterConfig::default()).await;
    let client = common::client();

    let res = client.get(server.url("/hello/grace")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["access-control-allow-origin"], "*");
    assert_eq!(res.text().await.unwrap(), "Hello, grace!");

    let res = client
        .post(server.url("/items"))
        .body(r#"{"name":"widget"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 201);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["item"]["name"], "widget");

    let res = client.get(server.url("/fail")).send().await.unwrap();
    assert_eq!(res.status(), 500);
    assert_eq!(res.text().await.unwrap(), "boom");

    let res = client.delete(server.url("/items/1")).send().await.unwrap();
    assert_eq!(res.status(), 404);

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_catch_all_options_over_http() {
    let mut config = RouterConfig::default();
    config.dispatch.catch_all_options = true;
    let server = common::start_server(demo::routes(true).unwrap(), config).await;

    let res = common::client()
        .request(reqwest::Method::OPTIONS, server.url("/not/a/route"))
        .header("Access-Control-Request-Headers", "x-api-key")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["access-control-allow-methods"], "GET,POST,PATCH,");
    assert_eq!(res.headers()["access-control-allow-headers"], "x-api-key");

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_graceful_shutdown() {
    let server = common::start_server(demo::routes(false).unwrap(), RouterConfig::default()).await;

    let res = common::client().get(server.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), 200);

    server.shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), server.handle)
        .await
        .expect("server did not stop")
        .expect("server task panicked");
    assert!(result.is_ok());
}
