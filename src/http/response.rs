//! Handler responses and the gateway response envelope.
//!
//! # Responsibilities
//! - Model what a handler returns (status, optional body, headers)
//! - Normalize it into the `{statusCode, body, headers}` envelope
//! - Build the synthesized 404 and CORS preflight envelopes
//!
//! # Design Decisions
//! - Structured bodies are serialized to JSON text during normalization
//! - An absent body stays absent; it is never coerced to `""`
//! - `Access-Control-Allow-Origin: *` is forced onto every normalized envelope

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::http::headers::{
    replace_header, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_REQUEST_HEADERS, CONTENT_TYPE,
};
use crate::http::request::ApiGatewayRequest;

/// Methods advertised by the catch-all preflight response.
pub const PREFLIGHT_ALLOW_METHODS: &str = "GET,POST,PATCH,";

/// Body produced by a handler.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Sent as-is.
    Text(String),
    /// Serialized to JSON text before it leaves the router.
    Json(serde_json::Value),
}

impl ResponseBody {
    /// Wire form of the body. Empty text, JSON `null`, `false` and `0` count
    /// as no body.
    pub fn into_text(self) -> Option<String> {
        match self {
            ResponseBody::Text(text) | ResponseBody::Json(serde_json::Value::String(text)) => {
                (!text.is_empty()).then_some(text)
            }
            ResponseBody::Json(serde_json::Value::Null | serde_json::Value::Bool(false)) => None,
            ResponseBody::Json(serde_json::Value::Number(n)) if n.as_f64() == Some(0.0) => None,
            ResponseBody::Json(value) => Some(value.to_string()),
        }
    }
}

impl From<&str> for ResponseBody {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ResponseBody {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<serde_json::Value> for ResponseBody {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

/// A response returned by a handler.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerResponse {
    pub status: u16,
    pub body: Option<ResponseBody>,
    pub headers: HashMap<String, String>,
}

impl HandlerResponse {
    /// A response with a status and nothing else.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            body: None,
            headers: HashMap::new(),
        }
    }

    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self::new(status).with_body(ResponseBody::Text(body.into()))
    }

    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self::new(status).with_body(ResponseBody::Json(body))
    }

    /// Serialize any `Serialize` value as a structured body.
    pub fn serialize<T: Serialize>(status: u16, body: &T) -> Result<Self, serde_json::Error> {
        Ok(Self::json(status, serde_json::to_value(body)?))
    }

    pub fn with_body(mut self, body: impl Into<ResponseBody>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// The envelope handed back to the gateway.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl GatewayResponse {
    /// Status-only envelope, normalized.
    pub fn status(status: u16) -> Self {
        HandlerResponse::new(status).into()
    }

    pub fn not_found() -> Self {
        Self::status(404)
    }

    /// Synthesized answer to an `OPTIONS` request when catch-all preflight
    /// handling is enabled. Echoes the requested headers back.
    pub fn cors_preflight(request: &ApiGatewayRequest) -> Self {
        let allow_headers = request.header(ACCESS_CONTROL_REQUEST_HEADERS);

        let headers = HashMap::from([
            (ACCESS_CONTROL_ALLOW_ORIGIN.to_string(), "*".to_string()),
            (
                ACCESS_CONTROL_ALLOW_METHODS.to_string(),
                PREFLIGHT_ALLOW_METHODS.to_string(),
            ),
            (
                ACCESS_CONTROL_ALLOW_HEADERS.to_string(),
                allow_headers.to_string(),
            ),
            (CONTENT_TYPE.to_string(), "application/json".to_string()),
        ]);

        Self {
            status_code: 200,
            body: Some(String::new()),
            headers,
        }
    }

    /// Case-insensitive header lookup; `""` when absent.
    pub fn header(&self, name: &str) -> &str {
        crate::http::headers::header_value(&self.headers, name)
    }
}

impl From<HandlerResponse> for GatewayResponse {
    fn from(response: HandlerResponse) -> Self {
        let mut headers = response.headers;
        replace_header(&mut headers, ACCESS_CONTROL_ALLOW_ORIGIN, "*");

        Self {
            status_code: response.status,
            body: response.body.and_then(ResponseBody::into_text),
            headers,
        }
    }
}
