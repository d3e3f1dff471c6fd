//! Gateway wire types and the local HTTP emulator.
//!
//! # Data Flow
//! ```text
//! Gateway event (JSON) or local HTTP request
//!     → request.rs (ApiGatewayRequest)
//!     → [routing::Dispatcher]
//!     → response.rs (HandlerResponse → GatewayResponse)
//!     → JSON envelope, or HTTP response via server.rs
//! ```

pub mod headers;
pub mod invoke;
pub mod request;
pub mod response;
pub mod server;

pub use invoke::{invoke_event, InvokeError};
pub use request::{ApiGatewayRequest, RequestContext};
pub use response::{GatewayResponse, HandlerResponse, ResponseBody};
pub use server::LocalServer;
