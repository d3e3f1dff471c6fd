//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (at startup):
//!     (method, pattern, handler)
//!     → router.rs (pick or create the method's table)
//!     → matcher.rs (translate pattern, insert into radix tree)
//!
//! Incoming gateway event (method, path, headers)
//!     → router.rs (OPTIONS shortcut, method table, ANY fallback)
//!     → matcher.rs (resolve path, extract placeholders)
//!     → handler.rs (invoke, await outcome)
//!     → normalized GatewayResponse
//! ```
//!
//! # Design Decisions
//! - Tables are filled before serving and only read afterwards
//! - No ranking beyond the matching engine's own
//! - Explicit 404 rather than silent default

pub mod handler;
pub mod matcher;
pub mod router;

pub use handler::{Handler, HandlerError, HandlerFuture, HandlerResult, PathParams};
pub use matcher::{PathMatcher, RouteError};
pub use router::{Dispatch, Dispatcher, ANY_METHOD, DEFAULT_METHOD};
