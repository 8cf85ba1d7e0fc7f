//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration for the relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Backend service endpoints.
    pub endpoints: EndpointConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Login flow settings.
    pub login: LoginConfig,

    /// Location of the on-chain account table.
    pub account_table: AccountTableConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Base URLs of the two backend services.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Chain-query service (table lookups, ABI encoding).
    pub chain_api: String,

    /// Submission proxy (bind and push).
    pub proxy_api: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            chain_api: "https://chain.amaxtest.com".to_string(),
            proxy_api: "https://testnet.truedex.io/proxy".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Per-request deadline in milliseconds.
    pub request_ms: u64,
}

impl TimeoutConfig {
    pub fn request(&self) -> Duration {
        Duration::from_millis(self.request_ms)
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_ms: 10_000 }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoginConfig {
    /// Fixed wait between a successful bind and the account re-fetch.
    pub bind_settle_delay_ms: u64,
}

impl LoginConfig {
    pub fn bind_settle_delay(&self) -> Duration {
        Duration::from_millis(self.bind_settle_delay_ms)
    }
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            bind_settle_delay_ms: 3_000,
        }
    }
}

/// Coordinates of the proxy account table on the chain-query service.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AccountTableConfig {
    /// Contract owning the table.
    pub code: String,

    pub scope: String,

    pub table: String,

    /// Secondary index keyed by the address digest.
    pub index_position: u32,

    pub key_type: String,
}

impl Default for AccountTableConfig {
    fn default() -> Self {
        Self {
            code: "o.fl22".to_string(),
            scope: "o.fl22".to_string(),
            table: "proxyaccts".to_string(),
            index_position: 2,
            key_type: "sha256".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub log_level: String,

    /// Emit JSON lines instead of human-readable output.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "chain_relay=info".to_string(),
            json_logs: false,
        }
    }
}
