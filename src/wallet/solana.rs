//! Solana wallet bridge.
//!
//! Signatures are returned as lower-case hex of the raw signature bytes.

use async_trait::async_trait;
use std::sync::Arc;

use crate::wallet::types::{ProviderResult, WalletBridge, WalletError, WalletResult};

/// Capabilities of an injected Solana provider.
#[async_trait]
pub trait SolanaProvider: Send + Sync {
    /// Whether this is a Phantom wallet; only Phantom can sign for the relay.
    fn is_phantom(&self) -> bool;

    /// Connect and return the base58 public key.
    async fn connect(&self) -> ProviderResult<String>;

    /// Sign raw message bytes, returning the signature bytes.
    async fn sign_message(&self, message: &[u8]) -> ProviderResult<Vec<u8>>;
}

#[derive(Clone)]
pub struct SolanaBridge {
    provider: Option<Arc<dyn SolanaProvider>>,
}

impl SolanaBridge {
    pub fn new(provider: Option<Arc<dyn SolanaProvider>>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl WalletBridge for SolanaBridge {
    async fn connect(&self) -> WalletResult<Option<String>> {
        let provider = self
            .provider
            .as_ref()
            .ok_or_else(|| WalletError::WalletUnavailable("Solana wallet not found".to_string()))?;

        // A declined connection leaves the user without an address.
        match provider.connect().await {
            Ok(public_key) => Ok(Some(public_key)),
            Err(e) => {
                tracing::warn!(error = %e, "Solana wallet connection declined");
                Ok(None)
            }
        }
    }

    async fn sign_message(&self, message: &str) -> WalletResult<String> {
        let provider = self
            .provider
            .as_ref()
            .filter(|p| p.is_phantom())
            .ok_or_else(|| WalletError::WalletUnavailable("Phantom Wallet not found".to_string()))?;

        let signature = provider
            .sign_message(message.as_bytes())
            .await
            .map_err(|e| WalletError::SigningFailed(e.to_string()))?;
        Ok(hex::encode(signature))
    }
}

impl std::fmt::Debug for SolanaBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolanaBridge")
            .field("provider", &self.provider.is_some())
            .finish()
    }
}
