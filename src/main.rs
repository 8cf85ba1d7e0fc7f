//! Headless relay client.
//!
//! ```text
//! chain-relay [--config relay.toml] login    --chain eth
//! chain-relay [--config relay.toml] transact --chain bsc --address 0x.. \
//!             --contract o.fl22 --action deposit --data '{"quantity":"1.0000 AMAX"}'
//! chain-relay [--config relay.toml] account  --address 0x..
//! ```
//!
//! EVM chains sign with the key in `RELAY_EVM_PRIVATE_KEY`. Solana and Tron
//! wallets only exist in a browser, so those chains report the wallet as
//! unavailable here.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use chain_relay::config::load_config;
use chain_relay::observability::init_logging;
use chain_relay::wallet::{EvmProvider, LocalEvmWallet};
use chain_relay::{ChainId, RelayConfig, TransactStatus, TransactionOrchestrator, Wallets};

#[derive(Parser)]
#[command(name = "chain-relay")]
#[command(about = "Bind wallets to relay accounts and push signed actions", long_about = None)]
struct Cli {
    /// TOML configuration file; built-in defaults when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect the wallet and bind an account if needed
    Login {
        #[arg(long)]
        chain: ChainId,
    },
    /// Sign and push one contract action
    Transact {
        #[arg(long)]
        chain: ChainId,
        #[arg(long)]
        address: String,
        #[arg(long)]
        contract: String,
        #[arg(long)]
        action: String,
        /// Action arguments as JSON
        #[arg(long)]
        data: String,
    },
    /// Show the account bound to an address
    Account {
        #[arg(long)]
        address: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RelayConfig::default(),
    };
    init_logging(&config.observability);

    tracing::info!(
        chain_api = %config.endpoints.chain_api,
        proxy_api = %config.endpoints.proxy_api,
        request_timeout_ms = config.timeouts.request_ms,
        "Configuration loaded"
    );

    let evm: Option<Arc<dyn EvmProvider>> = match LocalEvmWallet::from_env(1) {
        Ok(wallet) => Some(Arc::new(wallet)),
        Err(e) => {
            tracing::warn!(error = %e, "No local EVM wallet");
            None
        }
    };
    let orchestrator = TransactionOrchestrator::new(&config, Wallets::new(evm, None, None))?;

    match cli.command {
        Commands::Login { chain } => match orchestrator.login_by_chain(chain).await {
            Some(info) => println!("{}", serde_json::to_string_pretty(&info)?),
            None => {
                eprintln!("Login failed for {}", chain);
                std::process::exit(1);
            }
        },
        Commands::Transact {
            chain,
            address,
            contract,
            action,
            data,
        } => {
            let data: serde_json::Value = serde_json::from_str(&data)?;
            let status = orchestrator
                .transact_by_chain(chain, &address, &contract, &action, data)
                .await;
            println!("{}", status);
            if status == TransactStatus::Error {
                std::process::exit(1);
            }
        }
        Commands::Account { address } => match orchestrator.account(&address).await? {
            Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
            None => {
                eprintln!("No account bound to {}", address);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}
