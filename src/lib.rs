//! Wallet connection and transaction relay library.
//!
//! Connects browser-style wallet providers for several chains, binds their
//! addresses to backend accounts and relays signed contract actions to a
//! submission proxy over HTTP/JSON.

pub mod config;
pub mod observability;
pub mod relay;
pub mod strategy;
pub mod transport;
pub mod wallet;

pub use config::schema::RelayConfig;
pub use relay::{RelayError, RelayResult, TransactStatus, TransactionOrchestrator};
pub use strategy::{ChainId, Wallets};
