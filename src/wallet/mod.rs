//! Wallet bridge subsystem.
//!
//! # Data Flow
//! ```text
//! injected provider (EvmProvider / SolanaProvider / TronProvider)
//!     → evm.rs / solana.rs / tron.rs (connect, network switch, signing)
//!     → WalletBridge trait object handed to the chain strategy
//! ```
//!
//! Providers are always passed in at construction; a bridge built with `None`
//! reports `WalletUnavailable` on every call. `local.rs` supplies an EVM
//! provider backed by a private key for headless use.

pub mod evm;
pub mod local;
pub mod solana;
pub mod tron;
pub mod types;

pub use evm::{AddChainParams, EvmBridge, EvmNetwork, EvmProvider, NativeCurrency};
pub use local::LocalEvmWallet;
pub use solana::{SolanaBridge, SolanaProvider};
pub use tron::{TronBridge, TronProvider};
pub use types::{ProviderError, ProviderResult, WalletBridge, WalletError, WalletResult};
