//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Dispatcher and emulator produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (request counters and latency histograms)
//!
//! Consumers:
//!     → stderr (pretty or JSON lines)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Logs go to stderr so `invoke` can keep stdout for the response envelope
//! - `RUST_LOG` wins over the configured level
//! - Metrics are recorded by the emulator only; the dispatcher just logs

pub mod logging;
pub mod metrics;
