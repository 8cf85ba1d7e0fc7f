//! Headless EVM provider backed by a local private key.
//!
//! # Security
//! - Private keys are loaded from a hex string or an environment variable
//! - Keys are never logged or serialized

use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::wallet::evm::{AddChainParams, EvmNetwork, EvmProvider};
use crate::wallet::types::{
    ProviderError, ProviderResult, WalletError, WalletResult, UNRECOGNIZED_CHAIN_CODE,
};

/// Environment variable name for the private key.
pub const PRIVATE_KEY_ENV_VAR: &str = "RELAY_EVM_PRIVATE_KEY";

/// In-process EVM provider: signs with a local key and keeps its own notion
/// of the selected network.
#[derive(Debug, Clone)]
pub struct LocalEvmWallet {
    signer: PrivateKeySigner,
    /// Currently selected chain.
    chain_id: Arc<AtomicU64>,
    /// Chains a switch is accepted for.
    known_chains: Arc<Mutex<HashSet<u64>>>,
}

impl LocalEvmWallet {
    /// Create a wallet from a hex-encoded private key string (with or without
    /// `0x`), starting on `chain_id`.
    pub fn from_private_key(private_key_hex: &str, chain_id: u64) -> WalletResult<Self> {
        let key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| WalletError::Provider(format!("Invalid private key format: {}", e)))?;

        tracing::info!(address = %signer.address(), chain_id, "Local wallet initialized");

        let known_chains: HashSet<u64> = [
            EvmNetwork::ethereum().chain_id,
            EvmNetwork::bsc().chain_id,
            chain_id,
        ]
        .into_iter()
        .collect();

        Ok(Self {
            signer,
            chain_id: Arc::new(AtomicU64::new(chain_id)),
            known_chains: Arc::new(Mutex::new(known_chains)),
        })
    }

    /// Load the key from `RELAY_EVM_PRIVATE_KEY`.
    pub fn from_env(chain_id: u64) -> WalletResult<Self> {
        let private_key = std::env::var(PRIVATE_KEY_ENV_VAR).map_err(|_| {
            WalletError::WalletUnavailable(format!(
                "Environment variable {} not set",
                PRIVATE_KEY_ENV_VAR
            ))
        })?;

        Self::from_private_key(&private_key, chain_id)
    }

    /// Checksummed address of the key.
    pub fn address(&self) -> String {
        self.signer.address().to_string()
    }

    pub fn current_chain_id(&self) -> u64 {
        self.chain_id.load(Ordering::SeqCst)
    }

    fn knows(&self, chain_id: u64) -> bool {
        self.known_chains
            .lock()
            .map(|chains| chains.contains(&chain_id))
            .unwrap_or(false)
    }
}

fn parse_hex_chain_id(value: &str) -> ProviderResult<u64> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    u64::from_str_radix(digits, 16)
        .map_err(|e| ProviderError::with_code(-32602, format!("Invalid chain id '{}': {}", value, e)))
}

#[async_trait]
impl EvmProvider for LocalEvmWallet {
    async fn chain_id(&self) -> ProviderResult<u64> {
        Ok(self.current_chain_id())
    }

    async fn request_accounts(&self) -> ProviderResult<Vec<String>> {
        Ok(vec![self.address()])
    }

    async fn switch_chain(&self, chain_id_hex: &str) -> ProviderResult<()> {
        let chain_id = parse_hex_chain_id(chain_id_hex)?;
        if !self.knows(chain_id) {
            return Err(ProviderError::with_code(
                UNRECOGNIZED_CHAIN_CODE,
                format!("Unrecognized chain ID \"{}\"", chain_id_hex),
            ));
        }
        self.chain_id.store(chain_id, Ordering::SeqCst);
        tracing::debug!(chain_id, "Local wallet switched network");
        Ok(())
    }

    async fn add_chain(&self, params: &AddChainParams) -> ProviderResult<()> {
        let chain_id = parse_hex_chain_id(&params.chain_id)?;
        self.known_chains
            .lock()
            .map_err(|_| ProviderError::new("chain registry poisoned"))?
            .insert(chain_id);
        tracing::info!(chain_id, chain_name = %params.chain_name, "Local wallet registered network");
        Ok(())
    }

    async fn sign_message(&self, message: &str) -> ProviderResult<String> {
        let signature = self
            .signer
            .sign_message(message.as_bytes())
            .await
            .map_err(|e| ProviderError::new(format!("Message signing failed: {}", e)))?;
        Ok(format!("0x{}", hex::encode(signature.as_bytes())))
    }
}
