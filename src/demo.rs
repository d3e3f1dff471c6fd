//! Sample route table served by the `gateway-router` binary.
//!
//! ```text
//! GET  /health          → {"status":"ok"}
//! GET  /hello/:name     → "Hello, <name>!"
//! POST /items           → 201 {"id":…, "item":<body>}, 400 on invalid JSON
//! GET  /items/:id       → {"id":<id>}
//! ANY  /echo/*rest      → method, path, params and query of the request
//!                         (methods without a table of their own, e.g. PUT)
//! GET  /fail            → handler failure, 500 "boom"
//! ```

use serde_json::json;

use crate::http::request::ApiGatewayRequest;
use crate::http::response::HandlerResponse;
use crate::routing::{Dispatcher, HandlerError, HandlerResult, PathParams, RouteError, ANY_METHOD};

/// Build the sample dispatcher.
pub fn routes(catch_all_options: bool) -> Result<Dispatcher, RouteError> {
    let mut dispatcher = Dispatcher::new();
    dispatcher
        .route("/health", health)?
        .route("/hello/:name", hello)?
        .route_method("POST", "/items", create_item)?
        .route("/items/:id", get_item)?
        .route_method(ANY_METHOD, "/echo/*rest", echo)?
        .route("/fail", fail)?
        .set_catch_all_options(catch_all_options);
    Ok(dispatcher)
}

async fn health(_req: ApiGatewayRequest, _params: PathParams) -> HandlerResult {
    Ok(HandlerResponse::json(200, json!({"status": "ok"})))
}

async fn hello(_req: ApiGatewayRequest, params: PathParams) -> HandlerResult {
    let name = params.get("name").map(String::as_str).unwrap_or("world");
    Ok(HandlerResponse::text(200, format!("Hello, {name}!")).with_header("Content-Type", "text/plain"))
}

async fn create_item(req: ApiGatewayRequest, _params: PathParams) -> HandlerResult {
    let item: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap_or(""))
        .map_err(|e| HandlerError::status(400, json!({"error": e.to_string()})))?;

    Ok(HandlerResponse::json(
        201,
        json!({"id": uuid::Uuid::new_v4().to_string(), "item": item}),
    ))
}

async fn get_item(_req: ApiGatewayRequest, params: PathParams) -> HandlerResult {
    Ok(HandlerResponse::json(200, json!({"id": params.get("id")})))
}

async fn echo(req: ApiGatewayRequest, params: PathParams) -> HandlerResult {
    Ok(HandlerResponse::json(
        200,
        json!({
            "method": req.http_method,
            "path": req.path,
            "params": params,
            "query": req.query_string_parameters,
        }),
    ))
}

async fn fail(_req: ApiGatewayRequest, _params: PathParams) -> HandlerResult {
    Err(HandlerError::message("boom"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_routes() {
        let dispatcher = routes(false).unwrap();
        assert_eq!(dispatcher.methods(), vec!["ANY", "GET", "POST"]);

        let resp = dispatcher.dispatch(ApiGatewayRequest::new("GET", "/hello/ada")).await;
        assert_eq!(resp.body.as_deref(), Some("Hello, ada!"));

        let resp = dispatcher
            .dispatch(ApiGatewayRequest::new("POST", "/items").with_body("{not json"))
            .await;
        assert_eq!(resp.status_code, 400);

        let resp = dispatcher
            .dispatch(ApiGatewayRequest::new("POST", "/items").with_body(r#"{"name":"widget"}"#))
            .await;
        assert_eq!(resp.status_code, 201);
        let body: serde_json::Value = serde_json::from_str(resp.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["item"]["name"], "widget");

        let resp = dispatcher.dispatch(ApiGatewayRequest::new("GET", "/fail")).await;
        assert_eq!(resp.status_code, 500);
        assert_eq!(resp.body.as_deref(), Some("boom"));
    }

    #[tokio::test]
    async fn test_echo_uses_any_table() {
        let dispatcher = routes(false).unwrap();
        let resp = dispatcher
            .dispatch(ApiGatewayRequest::new("DELETE", "/echo/a/b").with_query("x", "1"))
            .await;

        let body: serde_json::Value = serde_json::from_str(resp.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["method"], "DELETE");
        assert_eq!(body["params"]["rest"], "a/b");
        assert_eq!(body["query"]["x"], "1");
    }
}
