//! Relay subsystem.
//!
//! # Data Flow
//! ```text
//! caller
//!     → orchestrator.rs (login / transact)
//!     → strategy (wallet connect, signing)
//!     → chain_api.rs (account table, ABI encoding)
//!     → proxy_api.rs (bind, push)
//! ```
//!
//! The typed entry points return `RelayResult`; `login_by_chain` and
//! `transact_by_chain` log failures and collapse them into sentinels.

pub mod chain_api;
pub mod error;
pub mod orchestrator;
pub mod proxy_api;
pub mod types;

pub use chain_api::ChainQueryClient;
pub use error::{RelayError, RelayResult};
pub use orchestrator::TransactionOrchestrator;
pub use proxy_api::SubmissionProxyClient;
pub use types::{AccountInfo, AccountRecord, AuthParams, PushPayload, TransactStatus};
