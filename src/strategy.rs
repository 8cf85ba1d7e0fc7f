//! Chain identifiers and the per-chain strategy dispatch.
//!
//! `Wallets::strategy` is the single place a chain is mapped to its bridge;
//! the match is exhaustive so a new chain cannot be added without choosing
//! one. Everything else (auth params, labels, hash type) is shared.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

use crate::relay::types::AuthParams;
use crate::wallet::{
    EvmBridge, EvmNetwork, EvmProvider, SolanaBridge, SolanaProvider, TronBridge, TronProvider,
    WalletBridge, WalletResult,
};

/// Supported chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainId {
    #[serde(rename = "eth")]
    Ethereum,
    Bsc,
    Avalanche,
    Solana,
    Tron,
}

/// Wallet ecosystem a chain belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainFamily {
    Evm,
    Solana,
    Tron,
}

/// Digest the backend uses to verify a signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashType {
    Keccak,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported chain '{0}'")]
pub struct UnknownChain(pub String);

impl ChainId {
    pub const ALL: [ChainId; 5] = [
        ChainId::Ethereum,
        ChainId::Bsc,
        ChainId::Avalanche,
        ChainId::Solana,
        ChainId::Tron,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ChainId::Ethereum => "eth",
            ChainId::Bsc => "bsc",
            ChainId::Avalanche => "avalanche",
            ChainId::Solana => "solana",
            ChainId::Tron => "tron",
        }
    }

    pub fn family(self) -> ChainFamily {
        match self {
            ChainId::Ethereum | ChainId::Bsc | ChainId::Avalanche => ChainFamily::Evm,
            ChainId::Solana => ChainFamily::Solana,
            ChainId::Tron => ChainFamily::Tron,
        }
    }

    /// Label the submission proxy routes on (`bind{label}`, `push{label}`).
    pub fn base_chain_label(self) -> &'static str {
        match self {
            ChainId::Solana => "sol",
            other => other.as_str(),
        }
    }

    /// Solana signatures are verified without a digest tag.
    pub fn hash_type(self) -> Option<HashType> {
        match self.family() {
            ChainFamily::Solana => None,
            ChainFamily::Evm | ChainFamily::Tron => Some(HashType::Keccak),
        }
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChainId {
    type Err = UnknownChain;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChainId::ALL
            .into_iter()
            .find(|chain| chain.as_str() == s)
            .ok_or_else(|| UnknownChain(s.to_string()))
    }
}

/// The five bridges, one per chain. The EVM chains share a provider.
#[derive(Debug, Clone)]
pub struct Wallets {
    ethereum: EvmBridge,
    bsc: EvmBridge,
    avalanche: EvmBridge,
    solana: SolanaBridge,
    tron: TronBridge,
}

impl Wallets {
    pub fn new(
        evm: Option<Arc<dyn EvmProvider>>,
        solana: Option<Arc<dyn SolanaProvider>>,
        tron: Option<Arc<dyn TronProvider>>,
    ) -> Self {
        Self {
            ethereum: EvmBridge::new(evm.clone(), EvmNetwork::ethereum()),
            bsc: EvmBridge::new(evm.clone(), EvmNetwork::bsc()),
            avalanche: EvmBridge::new(evm, EvmNetwork::avalanche()),
            solana: SolanaBridge::new(solana),
            tron: TronBridge::new(tron),
        }
    }

    /// No providers at all; every strategy reports `WalletUnavailable`.
    pub fn none() -> Self {
        Self::new(None, None, None)
    }

    /// Resolve the strategy for `chain`.
    pub fn strategy(&self, chain: ChainId) -> ChainStrategy<'_> {
        let bridge: &dyn WalletBridge = match chain {
            ChainId::Ethereum => &self.ethereum,
            ChainId::Bsc => &self.bsc,
            ChainId::Avalanche => &self.avalanche,
            ChainId::Solana => &self.solana,
            ChainId::Tron => &self.tron,
        };
        ChainStrategy { chain, bridge }
    }
}

/// A chain paired with the bridge designated for it.
#[derive(Clone, Copy)]
pub struct ChainStrategy<'a> {
    chain: ChainId,
    bridge: &'a dyn WalletBridge,
}

impl<'a> ChainStrategy<'a> {
    pub fn chain(&self) -> ChainId {
        self.chain
    }

    pub async fn connect(&self) -> WalletResult<Option<String>> {
        self.bridge.connect().await
    }

    pub async fn sign_message(&self, message: &str) -> WalletResult<String> {
        self.bridge.sign_message(message).await
    }

    /// Bind parameters: the address signed by its own wallet.
    pub async fn auth_params(&self, address: &str) -> WalletResult<AuthParams> {
        let signature = self.sign_message(address).await?;
        Ok(AuthParams::new(self.chain, address, signature))
    }
}

impl fmt::Debug for ChainStrategy<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainStrategy")
            .field("chain", &self.chain)
            .finish()
    }
}
