//! Handler contract.
//!
//! Every handler returns a future resolving to either a [`HandlerResponse`]
//! or a [`HandlerError`]. Plain async closures taking the request and the
//! extracted path parameters implement [`Handler`] directly.

use std::collections::HashMap;
use std::future::Future;

use futures_util::future::{BoxFuture, FutureExt};
use thiserror::Error;

use crate::http::request::ApiGatewayRequest;
use crate::http::response::{GatewayResponse, HandlerResponse, ResponseBody};

/// Placeholder name to value, as extracted by the path matcher.
pub type PathParams = HashMap<String, String>;

/// Outcome of a handler invocation.
pub type HandlerResult = Result<HandlerResponse, HandlerError>;

/// Boxed handler future.
pub type HandlerFuture = BoxFuture<'static, HandlerResult>;

/// A routed request handler.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, request: ApiGatewayRequest, params: PathParams) -> HandlerFuture;
}

impl<F, Fut> Handler for F
where
    F: Fn(ApiGatewayRequest, PathParams) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    fn call(&self, request: ApiGatewayRequest, params: PathParams) -> HandlerFuture {
        (self)(request, params).boxed()
    }
}

/// Failure reported by a handler.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HandlerError {
    /// Plain message. Becomes a 500 with the message as body.
    #[error("{0}")]
    Message(String),

    /// Partially populated response. A missing status becomes 500.
    #[error("handler failed with status {status:?}")]
    Response {
        status: Option<u16>,
        body: Option<ResponseBody>,
        headers: HashMap<String, String>,
    },
}

impl HandlerError {
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    /// Error carrying an explicit status and body.
    pub fn status(status: u16, body: impl Into<ResponseBody>) -> Self {
        Self::Response {
            status: Some(status),
            body: Some(body.into()),
            headers: HashMap::new(),
        }
    }

    /// Error carrying only a body; the router fills in 500.
    pub fn body(body: impl Into<ResponseBody>) -> Self {
        Self::Response {
            status: None,
            body: Some(body.into()),
            headers: HashMap::new(),
        }
    }

    /// Converts the failure into the response sent back to the gateway.
    pub fn into_response(self) -> GatewayResponse {
        let response = match self {
            HandlerError::Message(message) => HandlerResponse::text(500, message),
            HandlerError::Response {
                status,
                body,
                headers,
            } => {
                let status = match status {
                    Some(status) if status != 0 => status,
                    _ => {
                        tracing::info!("Handler error carried no status, defaulting to 500");
                        500
                    }
                };
                HandlerResponse {
                    status,
                    body,
                    headers,
                }
            }
        };
        response.into()
    }
}

impl From<String> for HandlerError {
    fn from(message: String) -> Self {
        Self::Message(message)
    }
}

impl From<&str> for HandlerError {
    fn from(message: &str) -> Self {
        Self::Message(message.to_string())
    }
}

impl From<HandlerResponse> for HandlerError {
    fn from(response: HandlerResponse) -> Self {
        Self::Response {
            status: Some(response.status),
            body: response.body,
            headers: response.headers,
        }
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Message(err.to_string())
    }
}
