//! One-shot event invocation.
//!
//! Reads a gateway event as JSON, dispatches it and renders the response
//! envelope as JSON, the way the platform would hand it to the function and
//! read the result back.

use thiserror::Error;

use crate::http::request::ApiGatewayRequest;
use crate::routing::Dispatcher;

#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("invalid gateway event: {0}")]
    Event(#[source] serde_json::Error),

    #[error("failed to encode response: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Dispatch the JSON `event` and return the pretty-printed envelope.
pub async fn invoke_event(dispatcher: &Dispatcher, event: &str) -> Result<String, InvokeError> {
    let request: ApiGatewayRequest = serde_json::from_str(event).map_err(InvokeError::Event)?;
    let response = dispatcher.dispatch(request).await;
    serde_json::to_string_pretty(&response).map_err(InvokeError::Encode)
}
