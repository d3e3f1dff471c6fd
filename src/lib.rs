//! Request router for serverless HTTP function handlers.
//!
//! Maps a gateway event's method and path to a registered handler, invokes
//! it and normalizes the outcome into the gateway response envelope.
//!
//! ```no_run
//! use gateway_router::http::{ApiGatewayRequest, HandlerResponse};
//! use gateway_router::routing::{Dispatcher, HandlerResult, PathParams};
//!
//! async fn get_item(_req: ApiGatewayRequest, params: PathParams) -> HandlerResult {
//!     Ok(HandlerResponse::text(200, format!("item {}", params["id"])))
//! }
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let mut dispatcher = Dispatcher::new();
//! dispatcher.route("/items/:id", get_item)?;
//!
//! let response = dispatcher
//!     .dispatch(ApiGatewayRequest::new("GET", "/items/7"))
//!     .await;
//! assert_eq!(response.body.as_deref(), Some("item 7"));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod demo;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::RouterConfig;
pub use http::{ApiGatewayRequest, GatewayResponse, HandlerResponse, LocalServer};
pub use lifecycle::Shutdown;
pub use routing::{Dispatch, Dispatcher, Handler, HandlerError};
