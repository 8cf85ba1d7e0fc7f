//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! transport, wallet bridges, orchestrator produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//! ```
//!
//! # Design Decisions
//! - Structured fields (`chain`, `address`, `error`) rather than formatted text
//! - Each backend request carries its own request id

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
