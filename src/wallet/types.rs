//! Wallet bridge types and error definitions.

use async_trait::async_trait;
use thiserror::Error;

/// EIP-1193 code a provider returns when asked to switch to a chain it has
/// no definition for.
pub const UNRECOGNIZED_CHAIN_CODE: i64 = 4902;

/// EIP-1193 code for a request the user rejected.
pub const USER_REJECTED_CODE: i64 = 4001;

/// Failure reported by a wallet provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ProviderError {
    /// Provider-specific numeric code, when the provider reports one.
    pub code: Option<i64>,
    pub message: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: i64, message: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            message: message.into(),
        }
    }

    /// Whether the provider does not know the requested chain.
    pub fn is_unrecognized_chain(&self) -> bool {
        self.code == Some(UNRECOGNIZED_CHAIN_CODE)
    }
}

/// Result type returned by provider capability traits.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors surfaced by wallet bridges.
#[derive(Debug, Error)]
pub enum WalletError {
    /// The provider for this chain family is not installed.
    #[error("Wallet not available: {0}")]
    WalletUnavailable(String),

    /// The provider could not be moved onto the required network.
    #[error("Chain switch to {chain_id} failed: {reason}")]
    ChainSwitchFailed { chain_id: u64, reason: String },

    /// The provider refused or failed to sign.
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    /// Any other provider-side failure (account request, connect).
    #[error("Provider error: {0}")]
    Provider(String),
}

/// Result type for wallet bridge operations.
pub type WalletResult<T> = Result<T, WalletError>;

/// Per-chain façade over an injected wallet provider.
#[async_trait]
pub trait WalletBridge: Send + Sync {
    /// Request account access. Returns the first authorized address, or
    /// `None` when the user has none.
    async fn connect(&self) -> WalletResult<Option<String>>;

    /// Sign an arbitrary message, returning the family's signature encoding.
    async fn sign_message(&self, message: &str) -> WalletResult<String>;
}
