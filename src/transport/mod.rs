//! JSON-over-HTTP transport.
//!
//! A thin client bound to one base URL: default JSON headers, a fixed
//! per-request deadline, success bodies unwrapped, everything else an error.
//! No retries.

pub mod client;
pub mod error;

pub use client::HttpClient;
pub use error::{TransportError, TransportResult};
