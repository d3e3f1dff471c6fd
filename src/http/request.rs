//! Inbound gateway event.
//!
//! # Responsibilities
//! - Deserialize the proxy-integration event delivered by the gateway
//! - Expose case-insensitive header access
//! - Carry platform metadata through untouched
//!
//! # Design Decisions
//! - `null` maps (the gateway sends them when a request has no query string
//!   or headers) read as empty maps
//! - Unknown `requestContext` fields are preserved in `extra`

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::http::headers::header_value;

/// A request as delivered by the gateway.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayRequest {
    pub http_method: String,

    pub path: String,

    #[serde(default)]
    pub resource: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub headers: HashMap<String, String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub query_string_parameters: HashMap<String, String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub path_parameters: HashMap<String, String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub stage_variables: HashMap<String, String>,

    #[serde(default)]
    pub request_context: RequestContext,

    /// Raw request body, `None` when the request had none.
    #[serde(default)]
    pub body: Option<String>,
}

/// Platform metadata describing the invocation. Not interpreted by routing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_method: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<serde_json::Value>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ApiGatewayRequest {
    /// Create a request with the given method and path and nothing else.
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            http_method: method.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_string_parameters.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Case-insensitive header lookup; `""` when absent.
    pub fn header(&self, name: &str) -> &str {
        header_value(&self.headers, name)
    }

    /// Gateway request id, if the platform supplied one.
    pub fn request_id(&self) -> Option<&str> {
        self.request_context.request_id.as_deref()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
