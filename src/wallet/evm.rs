//! EVM-compatible wallet bridge.
//!
//! One injected provider serves Ethereum, BSC and Avalanche; each bridge
//! instance pins the network it needs and moves the provider onto it before
//! asking for accounts.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::wallet::types::{
    ProviderError, ProviderResult, WalletBridge, WalletError, WalletResult,
};

/// Capabilities of an injected EIP-1193 style provider.
#[async_trait]
pub trait EvmProvider: Send + Sync {
    /// Chain id the provider is currently on.
    async fn chain_id(&self) -> ProviderResult<u64>;

    /// `eth_requestAccounts`.
    async fn request_accounts(&self) -> ProviderResult<Vec<String>>;

    /// `wallet_switchEthereumChain` with a hex chain id.
    async fn switch_chain(&self, chain_id_hex: &str) -> ProviderResult<()>;

    /// `wallet_addEthereumChain`.
    async fn add_chain(&self, params: &AddChainParams) -> ProviderResult<()>;

    /// `personal_sign` over a UTF-8 message.
    async fn sign_message(&self, message: &str) -> ProviderResult<String>;
}

/// Native currency of a network being registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Network definition for `wallet_addEthereumChain`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddChainParams {
    pub chain_id: String,
    pub chain_name: String,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<String>,
    pub block_explorer_urls: Vec<String>,
}

/// A network an EVM bridge pins the provider to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvmNetwork {
    pub chain_id: u64,
    /// Registration data for networks wallets do not ship with.
    pub add_chain: Option<AddChainParams>,
}

impl EvmNetwork {
    pub fn ethereum() -> Self {
        Self {
            chain_id: 1,
            add_chain: None,
        }
    }

    pub fn bsc() -> Self {
        Self {
            chain_id: 56,
            add_chain: None,
        }
    }

    pub fn avalanche() -> Self {
        Self {
            chain_id: 43114,
            add_chain: Some(AddChainParams {
                chain_id: "0xa86a".to_string(),
                chain_name: "Avalanche Mainnet C-Chain".to_string(),
                native_currency: NativeCurrency {
                    name: "Avalanche".to_string(),
                    symbol: "AVAX".to_string(),
                    decimals: 18,
                },
                rpc_urls: vec!["https://api.avax.network/ext/bc/C/rpc".to_string()],
                block_explorer_urls: vec!["https://snowtrace.io/".to_string()],
            }),
        }
    }

    /// Chain id in the `0x`-prefixed form providers expect.
    pub fn chain_id_hex(&self) -> String {
        format!("{:#x}", self.chain_id)
    }
}

/// Bridge over an EVM provider for one network.
#[derive(Clone)]
pub struct EvmBridge {
    provider: Option<Arc<dyn EvmProvider>>,
    network: EvmNetwork,
}

impl EvmBridge {
    pub fn new(provider: Option<Arc<dyn EvmProvider>>, network: EvmNetwork) -> Self {
        Self { provider, network }
    }

    fn provider(&self) -> WalletResult<&Arc<dyn EvmProvider>> {
        self.provider
            .as_ref()
            .ok_or_else(|| WalletError::WalletUnavailable("MetaMask is not installed".to_string()))
    }

    /// Move the provider onto this bridge's network if it is elsewhere.
    async fn ensure_network(&self, provider: &Arc<dyn EvmProvider>) -> WalletResult<()> {
        let current = provider
            .chain_id()
            .await
            .map_err(|e| WalletError::Provider(e.to_string()))?;
        if current == self.network.chain_id {
            return Ok(());
        }

        let target = self.network.chain_id_hex();
        tracing::info!(from = current, to = %target, "Switching wallet network");

        let switch_failed = |e: ProviderError| WalletError::ChainSwitchFailed {
            chain_id: self.network.chain_id,
            reason: e.to_string(),
        };

        match provider.switch_chain(&target).await {
            Ok(()) => Ok(()),
            Err(e) if e.is_unrecognized_chain() => {
                let Some(params) = &self.network.add_chain else {
                    return Err(switch_failed(e));
                };
                tracing::info!(chain_name = %params.chain_name, "Registering network with wallet");
                provider.add_chain(params).await.map_err(switch_failed)?;
                provider.switch_chain(&target).await.map_err(switch_failed)
            }
            Err(e) => Err(switch_failed(e)),
        }
    }
}

#[async_trait]
impl WalletBridge for EvmBridge {
    async fn connect(&self) -> WalletResult<Option<String>> {
        let provider = self.provider()?;
        self.ensure_network(provider).await?;

        let accounts = provider
            .request_accounts()
            .await
            .map_err(|e| WalletError::Provider(e.to_string()))?;
        Ok(accounts.into_iter().next())
    }

    async fn sign_message(&self, message: &str) -> WalletResult<String> {
        self.provider()?
            .sign_message(message)
            .await
            .map_err(|e| WalletError::SigningFailed(e.to_string()))
    }
}

impl std::fmt::Debug for EvmBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvmBridge")
            .field("chain_id", &self.network.chain_id)
            .field("provider", &self.provider.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::types::{UNRECOGNIZED_CHAIN_CODE, USER_REJECTED_CODE};
    use std::sync::Mutex;

    /// Scripted provider recording every call it receives.
    struct ScriptedProvider {
        chain_id: u64,
        switch_results: Mutex<Vec<ProviderResult<()>>>,
        calls: Mutex<Vec<String>>,
        accounts: Vec<String>,
    }

    impl ScriptedProvider {
        fn new(chain_id: u64, switch_results: Vec<ProviderResult<()>>) -> Arc<Self> {
            Arc::new(Self {
                chain_id,
                switch_results: Mutex::new(switch_results),
                calls: Mutex::new(Vec::new()),
                accounts: vec!["0xabc".to_string(), "0xdef".to_string()],
            })
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl EvmProvider for ScriptedProvider {
        async fn chain_id(&self) -> ProviderResult<u64> {
            Ok(self.chain_id)
        }

        async fn request_accounts(&self) -> ProviderResult<Vec<String>> {
            self.calls.lock().unwrap().push("accounts".to_string());
            Ok(self.accounts.clone())
        }

        async fn switch_chain(&self, chain_id_hex: &str) -> ProviderResult<()> {
            self.calls.lock().unwrap().push(format!("switch:{chain_id_hex}"));
            let mut results = self.switch_results.lock().unwrap();
            if results.is_empty() {
                Ok(())
            } else {
                results.remove(0)
            }
        }

        async fn add_chain(&self, params: &AddChainParams) -> ProviderResult<()> {
            self.calls.lock().unwrap().push(format!("add:{}", params.chain_id));
            Ok(())
        }

        async fn sign_message(&self, message: &str) -> ProviderResult<String> {
            Ok(format!("sig({message})"))
        }
    }

    fn bridge(provider: &Arc<ScriptedProvider>, network: EvmNetwork) -> EvmBridge {
        EvmBridge::new(Some(provider.clone() as Arc<dyn EvmProvider>), network)
    }

    #[test]
    fn test_chain_id_hex() {
        assert_eq!(EvmNetwork::ethereum().chain_id_hex(), "0x1");
        assert_eq!(EvmNetwork::bsc().chain_id_hex(), "0x38");
        assert_eq!(EvmNetwork::avalanche().chain_id_hex(), "0xa86a");
    }

    #[test]
    fn test_add_chain_params_wire_format() {
        let params = EvmNetwork::avalanche().add_chain.unwrap();
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["chainId"], "0xa86a");
        assert_eq!(json["nativeCurrency"]["symbol"], "AVAX");
        assert_eq!(json["rpcUrls"][0], "https://api.avax.network/ext/bc/C/rpc");
        assert_eq!(json["blockExplorerUrls"][0], "https://snowtrace.io/");
    }

    #[tokio::test]
    async fn test_missing_provider() {
        let bridge = EvmBridge::new(None, EvmNetwork::ethereum());
        assert!(matches!(
            bridge.connect().await,
            Err(WalletError::WalletUnavailable(_))
        ));
        assert!(matches!(
            bridge.sign_message("hi").await,
            Err(WalletError::WalletUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_same_network_skips_switch() {
        let provider = ScriptedProvider::new(1, vec![]);
        let address = bridge(&provider, EvmNetwork::ethereum()).connect().await.unwrap();

        assert_eq!(address.as_deref(), Some("0xabc"));
        assert_eq!(provider.calls(), vec!["accounts"]);
    }

    #[tokio::test]
    async fn test_switches_to_bsc() {
        let provider = ScriptedProvider::new(1, vec![]);
        bridge(&provider, EvmNetwork::bsc()).connect().await.unwrap();
        assert_eq!(provider.calls(), vec!["switch:0x38", "accounts"]);
    }

    #[tokio::test]
    async fn test_registers_avalanche_when_unknown() {
        let provider = ScriptedProvider::new(
            1,
            vec![Err(ProviderError::with_code(UNRECOGNIZED_CHAIN_CODE, "Unrecognized chain ID"))],
        );
        bridge(&provider, EvmNetwork::avalanche()).connect().await.unwrap();
        assert_eq!(
            provider.calls(),
            vec!["switch:0xa86a", "add:0xa86a", "switch:0xa86a", "accounts"]
        );
    }

    #[tokio::test]
    async fn test_rejected_switch_propagates() {
        let provider = ScriptedProvider::new(
            1,
            vec![Err(ProviderError::with_code(USER_REJECTED_CODE, "User rejected"))],
        );
        let err = bridge(&provider, EvmNetwork::avalanche())
            .connect()
            .await
            .unwrap_err();

        assert!(matches!(err, WalletError::ChainSwitchFailed { chain_id: 43114, .. }));
        assert_eq!(provider.calls(), vec!["switch:0xa86a"]);
    }

    #[tokio::test]
    async fn test_unknown_chain_without_registration_fails() {
        let provider = ScriptedProvider::new(
            43114,
            vec![Err(ProviderError::with_code(UNRECOGNIZED_CHAIN_CODE, "Unrecognized chain ID"))],
        );
        let err = bridge(&provider, EvmNetwork::bsc()).connect().await.unwrap_err();

        assert!(matches!(err, WalletError::ChainSwitchFailed { chain_id: 56, .. }));
        assert_eq!(provider.calls(), vec!["switch:0x38"]);
    }

    #[tokio::test]
    async fn test_sign_message_delegates() {
        let provider = ScriptedProvider::new(1, vec![]);
        let sig = bridge(&provider, EvmNetwork::ethereum())
            .sign_message("0xabc")
            .await
            .unwrap();
        assert_eq!(sig, "sig(0xabc)");
    }
}
