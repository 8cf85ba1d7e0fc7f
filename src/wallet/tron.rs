//! Tron wallet bridge.

use async_trait::async_trait;
use std::sync::Arc;

use crate::wallet::types::{ProviderResult, WalletBridge, WalletError, WalletResult};

/// Capabilities of an injected TronLink provider.
#[async_trait]
pub trait TronProvider: Send + Sync {
    /// Base58 default address, if the wallet is unlocked.
    fn default_address(&self) -> Option<String>;

    /// `trx.signMessageV2`.
    async fn sign_message_v2(&self, message: &str) -> ProviderResult<String>;
}

#[derive(Clone)]
pub struct TronBridge {
    provider: Option<Arc<dyn TronProvider>>,
}

impl TronBridge {
    pub fn new(provider: Option<Arc<dyn TronProvider>>) -> Self {
        Self { provider }
    }

    fn provider(&self) -> WalletResult<&Arc<dyn TronProvider>> {
        self.provider
            .as_ref()
            .ok_or_else(|| WalletError::WalletUnavailable("TronLink Wallet not found".to_string()))
    }
}

#[async_trait]
impl WalletBridge for TronBridge {
    async fn connect(&self) -> WalletResult<Option<String>> {
        Ok(self.provider()?.default_address())
    }

    async fn sign_message(&self, message: &str) -> WalletResult<String> {
        self.provider()?
            .sign_message_v2(message)
            .await
            .map_err(|e| WalletError::SigningFailed(e.to_string()))
    }
}

impl std::fmt::Debug for TronBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TronBridge")
            .field("provider", &self.provider.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::types::ProviderError;

    struct TronLink {
        address: Option<String>,
    }

    #[async_trait]
    impl TronProvider for TronLink {
        fn default_address(&self) -> Option<String> {
            self.address.clone()
        }

        async fn sign_message_v2(&self, message: &str) -> ProviderResult<String> {
            if message.is_empty() {
                return Err(ProviderError::new("empty message"));
            }
            Ok(format!("0xtron{}", message.len()))
        }
    }

    #[tokio::test]
    async fn test_connect_uses_default_address() {
        let bridge = TronBridge::new(Some(Arc::new(TronLink {
            address: Some("TJRabPrwbZy45sbavfcjinPJC18kjpRTv8".to_string()),
        })));
        assert_eq!(
            bridge.connect().await.unwrap().as_deref(),
            Some("TJRabPrwbZy45sbavfcjinPJC18kjpRTv8")
        );
    }

    #[tokio::test]
    async fn test_locked_wallet_has_no_address() {
        let bridge = TronBridge::new(Some(Arc::new(TronLink { address: None })));
        assert_eq!(bridge.connect().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_sign_errors() {
        let missing = TronBridge::new(None);
        assert!(matches!(
            missing.sign_message("x").await,
            Err(WalletError::WalletUnavailable(_))
        ));

        let bridge = TronBridge::new(Some(Arc::new(TronLink { address: None })));
        assert!(matches!(
            bridge.sign_message("").await,
            Err(WalletError::SigningFailed(_))
        ));
        assert_eq!(bridge.sign_message("abc").await.unwrap(), "0xtron3");
    }
}
