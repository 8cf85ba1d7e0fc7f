//! Relay error definitions.

use thiserror::Error;

use crate::strategy::ChainId;
use crate::transport::TransportError;
use crate::wallet::WalletError;

/// Errors that can occur during login or transaction relay.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Wallet unavailable, chain switch refused, or signing failed.
    #[error(transparent)]
    Wallet(#[from] WalletError),

    /// A backend request failed.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// No account row is bound to the address.
    #[error("Account not found for address {0}")]
    AccountNotFound(String),

    /// The wallet connected but exposed no address.
    #[error("No authorized account in {0} wallet")]
    NoAuthorizedAccount(ChainId),

    /// The proxy did not acknowledge the bind.
    #[error("Bind rejected with code {code:?}")]
    BindRejected { code: Option<i64> },

    /// The proxy did not accept the transaction.
    #[error("Push rejected with code {code:?}")]
    PushRejected { code: Option<i64> },

    /// The envelope could not be serialized for signing.
    #[error("Envelope encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result type for relay operations.
pub type RelayResult<T> = Result<T, RelayError>;
