//! Shared fakes and mock backends for the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use chain_relay::config::AccountTableConfig;
use chain_relay::relay::chain_api::{account_key, ABI_JSON_TO_BIN_PATH, GET_TABLE_ROWS_PATH};
use chain_relay::relay::{ChainQueryClient, SubmissionProxyClient};
use chain_relay::transport::HttpClient;
use chain_relay::wallet::{
    AddChainParams, EvmProvider, ProviderError, ProviderResult, SolanaProvider, TronProvider,
};
use chain_relay::{TransactionOrchestrator, Wallets};

pub const EVM_ADDRESS: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";
pub const SOLANA_ADDRESS: &str = "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin";
pub const TRON_ADDRESS: &str = "TJRabPrwbZy45sbavfcjinPJC18kjpRTv8";

pub const SETTLE_DELAY: Duration = Duration::from_millis(20);

/// EVM provider that starts on Ethereum and records what it signs.
pub struct FakeEvm {
    chain_id: Mutex<u64>,
    accounts: Vec<String>,
    signed: Mutex<Vec<String>>,
}

impl FakeEvm {
    pub fn new() -> Arc<Self> {
        Self::with_accounts(vec![EVM_ADDRESS.to_string()])
    }

    pub fn with_accounts(accounts: Vec<String>) -> Arc<Self> {
        Arc::new(Self {
            chain_id: Mutex::new(1),
            accounts,
            signed: Mutex::new(Vec::new()),
        })
    }

    pub fn signed(&self) -> Vec<String> {
        self.signed.lock().unwrap().clone()
    }
}

#[async_trait]
impl EvmProvider for FakeEvm {
    async fn chain_id(&self) -> ProviderResult<u64> {
        Ok(*self.chain_id.lock().unwrap())
    }

    async fn request_accounts(&self) -> ProviderResult<Vec<String>> {
        Ok(self.accounts.clone())
    }

    async fn switch_chain(&self, chain_id_hex: &str) -> ProviderResult<()> {
        let id = u64::from_str_radix(chain_id_hex.trim_start_matches("0x"), 16)
            .map_err(|e| ProviderError::new(e.to_string()))?;
        *self.chain_id.lock().unwrap() = id;
        Ok(())
    }

    async fn add_chain(&self, _params: &AddChainParams) -> ProviderResult<()> {
        Ok(())
    }

    async fn sign_message(&self, message: &str) -> ProviderResult<String> {
        let mut signed = self.signed.lock().unwrap();
        signed.push(message.to_string());
        Ok(format!("0xevmsig{}", signed.len()))
    }
}

/// Phantom-like provider; signatures are the message bytes reversed.
pub struct FakeSolana {
    signed: Mutex<Vec<String>>,
}

impl FakeSolana {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            signed: Mutex::new(Vec::new()),
        })
    }

    pub fn signed(&self) -> Vec<String> {
        self.signed.lock().unwrap().clone()
    }
}

#[async_trait]
impl SolanaProvider for FakeSolana {
    fn is_phantom(&self) -> bool {
        true
    }

    async fn connect(&self) -> ProviderResult<String> {
        Ok(SOLANA_ADDRESS.to_string())
    }

    async fn sign_message(&self, message: &[u8]) -> ProviderResult<Vec<u8>> {
        self.signed
            .lock()
            .unwrap()
            .push(String::from_utf8_lossy(message).into_owned());
        Ok(message.iter().rev().copied().collect())
    }
}

pub struct FakeTron;

#[async_trait]
impl TronProvider for FakeTron {
    fn default_address(&self) -> Option<String> {
        Some(TRON_ADDRESS.to_string())
    }

    async fn sign_message_v2(&self, message: &str) -> ProviderResult<String> {
        Ok(format!("0xtronsig{}", message.len()))
    }
}

/// Orchestrator wired to two mock servers and the fake providers.
pub struct Harness {
    pub chain: MockServer,
    pub proxy: MockServer,
    pub evm: Arc<FakeEvm>,
    pub solana: Arc<FakeSolana>,
    pub orchestrator: TransactionOrchestrator,
}

impl Harness {
    pub async fn new() -> Self {
        let evm = FakeEvm::new();
        let solana = FakeSolana::new();
        let wallets = Wallets::new(
            Some(evm.clone() as Arc<dyn EvmProvider>),
            Some(solana.clone() as Arc<dyn SolanaProvider>),
            Some(Arc::new(FakeTron) as Arc<dyn TronProvider>),
        );
        Self::with_wallets(wallets, evm, solana).await
    }

    pub async fn with_wallets(wallets: Wallets, evm: Arc<FakeEvm>, solana: Arc<FakeSolana>) -> Self {
        let chain = MockServer::start().await;
        let proxy = MockServer::start().await;

        let timeout = Duration::from_secs(2);
        let orchestrator = TransactionOrchestrator::from_parts(
            ChainQueryClient::new(
                HttpClient::new(&chain.uri(), timeout).unwrap(),
                AccountTableConfig::default(),
            ),
            SubmissionProxyClient::new(HttpClient::new(&proxy.uri(), timeout).unwrap()),
            wallets,
            SETTLE_DELAY,
        );

        Self {
            chain,
            proxy,
            evm,
            solana,
            orchestrator,
        }
    }

    /// Requests the proxy received on `route`.
    pub async fn proxy_bodies(&self, route: &str) -> Vec<Value> {
        self.proxy
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.url.path() == route)
            .map(|r| r.body_json::<Value>().unwrap())
            .collect()
    }
}

pub fn account_row(address: &str, nonce: u64) -> Value {
    json!({
        "id": 1,
        "account": "u.trader1",
        "address": address,
        "created_at": "2024-05-01T10:00:00",
        "nonce": nonce
    })
}

/// Table lookup for `address`; `row` of `None` answers with no rows.
pub fn lookup(address: &str, row: Option<Value>) -> Mock {
    let rows: Vec<Value> = row.into_iter().collect();
    Mock::given(method("POST"))
        .and(path(GET_TABLE_ROWS_PATH))
        .and(body_partial_json(json!({ "lower_bound": account_key(address) })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "rows": rows, "more": false })))
}

pub fn abi_to_bin(binargs: &str) -> Mock {
    Mock::given(method("POST"))
        .and(path(ABI_JSON_TO_BIN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "binargs": binargs })))
}

pub fn proxy_ack(route: &str, code: Value) -> Mock {
    Mock::given(method("POST"))
        .and(path(route.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "code": code })))
}
