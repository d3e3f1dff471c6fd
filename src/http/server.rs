//! Local gateway emulator.
//!
//! # Responsibilities
//! - Create the Axum router that forwards every path to the dispatcher
//! - Translate HTTP requests into gateway events
//! - Translate gateway envelopes back into HTTP responses
//! - Wire up middleware (tracing, timeout, request ID)
//! - Record request metrics

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{request::Parts, HeaderName, HeaderValue, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::RouterConfig;
use crate::http::request::{ApiGatewayRequest, RequestContext};
use crate::http::response::GatewayResponse;
use crate::observability::metrics;
use crate::routing::Dispatcher;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Application state injected into the catch-all handler.
#[derive(Clone)]
struct AppState {
    dispatcher: Arc<Dispatcher>,
    stage: Option<String>,
    max_body_bytes: usize,
}

/// HTTP server that serves a [`Dispatcher`] the way the gateway would.
pub struct LocalServer {
    router: Router,
}

impl LocalServer {
    /// Create a server for `dispatcher` with the given configuration.
    pub fn new(dispatcher: Arc<Dispatcher>, config: &RouterConfig) -> Self {
        let state = AppState {
            dispatcher,
            stage: config.dispatch.stage.clone(),
            max_body_bytes: config.listener.max_body_bytes,
        };

        Self {
            router: Self::build_router(config, state),
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &RouterConfig, state: AppState) -> Router {
        Router::new()
            .route("/", any(gateway_handler))
            .route("/{*path}", any(gateway_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The underlying Axum router, for driving the emulator in-process.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Run the server on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Local gateway listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("Local gateway stopped");
        Ok(())
    }
}

/// Catch-all handler: HTTP request → gateway event → dispatcher → HTTP response.
async fn gateway_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let (parts, body) = request.into_parts();
    let method = parts.method.as_str().to_string();

    let body = match axum::body::to_bytes(body, state.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(method = %method, path = %parts.uri.path(), error = %e, "Rejecting request body");
            metrics::record_request(&method, 413, start_time);
            return (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large").into_response();
        }
    };

    let event = to_gateway_event(&parts, &body, state.stage.as_deref());
    let response = state.dispatcher.dispatch(event).await;

    metrics::record_request(&method, response.status_code, start_time);
    into_http_response(response)
}

/// Build the event the gateway would have delivered for this request.
pub fn to_gateway_event(parts: &Parts, body: &[u8], stage: Option<&str>) -> ApiGatewayRequest {
    let mut headers = HashMap::new();
    for (name, value) in &parts.headers {
        if let Ok(value) = value.to_str() {
            headers
                .entry(name.as_str().to_string())
                .or_insert_with(|| value.to_string());
        }
    }

    let mut query = HashMap::new();
    if let Some(raw) = parts.uri.query() {
        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            query
                .entry(key.into_owned())
                .or_insert_with(|| value.into_owned());
        }
    }

    let request_id = headers.get(REQUEST_ID_HEADER).cloned();
    let path = parts.uri.path().to_string();
    let method = parts.method.as_str().to_string();

    ApiGatewayRequest {
        http_method: method.clone(),
        path: path.clone(),
        resource: None,
        headers,
        query_string_parameters: query,
        path_parameters: HashMap::new(),
        stage_variables: HashMap::new(),
        request_context: RequestContext {
            request_id,
            http_method: Some(method),
            resource_path: Some(path),
            stage: stage.map(str::to_string),
            ..RequestContext::default()
        },
        body: (!body.is_empty()).then(|| String::from_utf8_lossy(body).into_owned()),
    }
}

/// Turn an envelope into an HTTP response. Headers that are not valid HTTP
/// are dropped with a warning; an invalid status becomes a 502.
pub fn into_http_response(envelope: GatewayResponse) -> Response {
    let Ok(status) = StatusCode::from_u16(envelope.status_code) else {
        tracing::error!(status = envelope.status_code, "Handler produced an invalid status code");
        return (StatusCode::BAD_GATEWAY, "Invalid status code from handler").into_response();
    };

    let mut response = Response::new(envelope.body.map(Body::from).unwrap_or_else(Body::empty));
    *response.status_mut() = status;

    for (name, value) in &envelope.headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                response.headers_mut().append(name, value);
            }
            _ => tracing::warn!(header = %name, "Dropping invalid response header"),
        }
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::response::HandlerResponse;
    use crate::routing::{HandlerError, HandlerResult, PathParams};
    use tower::ServiceExt;

    async fn describe(req: ApiGatewayRequest, params: PathParams) -> HandlerResult {
        Ok(HandlerResponse::json(
            200,
            serde_json::json!({
                "method": req.http_method,
                "path": req.path,
                "id": params.get("id"),
                "query": req.query_string_parameters,
                "body": req.body,
                "requestId": req.request_id(),
                "stage": req.request_context.stage,
            }),
        ))
    }

    fn app(catch_all_options: bool) -> Router {
        let mut dispatcher = Dispatcher::new();
        dispatcher
            .route_method("POST", "/items/:id", describe)
            .unwrap()
            .route("/teapot", |_req: ApiGatewayRequest, _params: PathParams| async {
                Err::<HandlerResponse, _>(HandlerError::status(418, "short and stout"))
            })
            .unwrap();
        dispatcher.set_catch_all_options(catch_all_options);

        let mut config = RouterConfig::default();
        config.dispatch.stage = Some("local".into());
        config.listener.max_body_bytes = 64;
        LocalServer::new(Arc::new(dispatcher), &config).into_router()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_request_becomes_event() {
        let res = app(false)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/items/42?verbose=1&verbose=2")
                    .header("x-request-id", "req-1")
                    .body(Body::from("hello"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()["access-control-allow-origin"], "*");
        assert_eq!(res.headers()["x-request-id"], "req-1");

        let body = body_json(res).await;
        assert_eq!(body["method"], "POST");
        assert_eq!(body["path"], "/items/42");
        assert_eq!(body["id"], "42");
        assert_eq!(body["query"]["verbose"], "1");
        assert_eq!(body["body"], "hello");
        assert_eq!(body["requestId"], "req-1");
        assert_eq!(body["stage"], "local");
    }

    #[tokio::test]
    async fn test_request_id_generated() {
        let res = app(false)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/items/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let generated = res.headers()["x-request-id"].to_str().unwrap().to_string();
        let body = body_json(res).await;
        assert_eq!(body["requestId"], generated.as_str());
        assert!(body["body"].is_null());
    }

    #[tokio::test]
    async fn test_not_found() {
        let res = app(false)
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(res.headers()["access-control-allow-origin"], "*");
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_handler_error_status() {
        let res = app(false)
            .oneshot(Request::builder().uri("/teapot").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::IM_A_TEAPOT);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"short and stout");
    }

    #[tokio::test]
    async fn test_preflight() {
        let res = app(true)
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/anything/at/all")
                    .header("Access-Control-Request-Headers", "x-api-key")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()["access-control-allow-methods"], "GET,POST,PATCH,");
        assert_eq!(res.headers()["access-control-allow-headers"], "x-api-key");
        assert_eq!(res.headers()["content-type"], "application/json");
    }

    #[tokio::test]
    async fn test_body_limit() {
        let res = app(false)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/items/1")
                    .body(Body::from(vec![b'x'; 65]))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn test_invalid_status_is_bad_gateway() {
        let res = into_http_response(GatewayResponse {
            status_code: 42,
            body: None,
            headers: HashMap::new(),
        });
        assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_invalid_header_dropped() {
        let res = into_http_response(GatewayResponse {
            status_code: 200,
            body: Some("ok".into()),
            headers: HashMap::from([
                ("bad header".to_string(), "v".to_string()),
                ("X-Good".to_string(), "v".to_string()),
            ]),
        });
        assert_eq!(res.headers().len(), 1);
        assert_eq!(res.headers()["x-good"], "v");
    }
}
