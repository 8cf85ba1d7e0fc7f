//! Login and transaction orchestration.
//!
//! # Login
//! ```text
//! strategy.connect → get_account ─ found ────────────────────────→ AccountInfo
//!                                └ missing → auth_params → bind
//!                                              → settle delay → get_account → AccountInfo
//! ```
//!
//! # Transaction
//! ```text
//! get_account (nonce) → abi_json_to_bin → plain + packed envelopes (same nonce)
//!     → sign JSON(plain) → push(packed, base64(JSON(plain)), signature)
//! ```
//!
//! The nonce is read once per call and never reserved. Two concurrent
//! transactions for the same account can therefore submit the same nonce;
//! the proxy rejects the loser.

use serde_json::Value;
use std::time::Duration;

use crate::config::RelayConfig;
use crate::observability::metrics;
use crate::relay::chain_api::ChainQueryClient;
use crate::relay::error::{RelayError, RelayResult};
use crate::relay::proxy_api::SubmissionProxyClient;
use crate::relay::types::{
    AccountInfo, AccountRecord, PackedEnvelope, PlainEnvelope, PushPayload, TransactStatus,
};
use crate::strategy::{ChainId, Wallets};
use crate::transport::HttpClient;

/// Drives wallet, chain-query service and submission proxy for one user
/// session. Holds no mutable state.
#[derive(Debug, Clone)]
pub struct TransactionOrchestrator {
    chain_api: ChainQueryClient,
    proxy: SubmissionProxyClient,
    wallets: Wallets,
    bind_settle_delay: Duration,
}

impl TransactionOrchestrator {
    /// Build the backend clients from configuration.
    pub fn new(config: &RelayConfig, wallets: Wallets) -> RelayResult<Self> {
        let timeout = config.timeouts.request();
        let chain_http = HttpClient::new(&config.endpoints.chain_api, timeout)?;
        let proxy_http = HttpClient::new(&config.endpoints.proxy_api, timeout)?;

        Ok(Self::from_parts(
            ChainQueryClient::new(chain_http, config.account_table.clone()),
            SubmissionProxyClient::new(proxy_http),
            wallets,
            config.login.bind_settle_delay(),
        ))
    }

    pub fn from_parts(
        chain_api: ChainQueryClient,
        proxy: SubmissionProxyClient,
        wallets: Wallets,
        bind_settle_delay: Duration,
    ) -> Self {
        Self {
            chain_api,
            proxy,
            wallets,
            bind_settle_delay,
        }
    }

    /// Account bound to `address`, if any.
    pub async fn account(&self, address: &str) -> RelayResult<Option<AccountRecord>> {
        Ok(self.chain_api.get_account(address).await?)
    }

    /// Connect the wallet for `chain` and return its account, binding one
    /// first if the address has none.
    pub async fn login(&self, chain: ChainId) -> RelayResult<AccountInfo> {
        let strategy = self.wallets.strategy(chain);
        let address = strategy
            .connect()
            .await?
            .ok_or(RelayError::NoAuthorizedAccount(chain))?;
        tracing::info!(chain = %chain, address = %address, "Wallet connected");

        if let Some(record) = self.chain_api.get_account(&address).await? {
            return Ok(AccountInfo::from_record(record, chain));
        }

        tracing::info!(chain = %chain, address = %address, "No account bound, binding");
        let params = strategy.auth_params(&address).await?;
        let ack = self.proxy.bind(&params).await?;
        metrics::record_bind(chain, ack.is_bind_success());
        if !ack.is_bind_success() {
            return Err(RelayError::BindRejected { code: ack.code() });
        }

        // Bind is applied asynchronously on the backend.
        tokio::time::sleep(self.bind_settle_delay).await;

        let record = self
            .chain_api
            .get_account(&address)
            .await?
            .ok_or_else(|| RelayError::AccountNotFound(address.clone()))?;
        tracing::info!(chain = %chain, account = %record.account, "Account bound");
        Ok(AccountInfo::from_record(record, chain))
    }

    /// Sign and push one contract action for `address`.
    pub async fn transact(
        &self,
        chain: ChainId,
        address: &str,
        contract: &str,
        action: &str,
        data: Value,
    ) -> RelayResult<()> {
        let record = self
            .chain_api
            .get_account(address)
            .await?
            .ok_or_else(|| RelayError::AccountNotFound(address.to_string()))?;

        let binargs = self.chain_api.abi_json_to_bin(contract, action, &data).await?;
        let (plain, packed) = build_envelopes(contract, action, data, binargs, record.nonce);

        let message = serde_json::to_string(&plain)?;
        let signature = self.wallets.strategy(chain).sign_message(&message).await?;

        let payload = PushPayload::new(chain, packed, address, &message, signature);
        tracing::debug!(chain = %chain, nonce = payload.nonce(), contract, action, "Pushing transaction");

        let ack = self.proxy.push(chain, &payload).await?;
        if !ack.is_success() {
            return Err(RelayError::PushRejected { code: ack.code() });
        }

        tracing::info!(chain = %chain, address, nonce = record.nonce, "Transaction accepted");
        Ok(())
    }

    /// `login` for callers that only distinguish success from absence.
    pub async fn login_by_chain(&self, chain: ChainId) -> Option<AccountInfo> {
        match self.login(chain).await {
            Ok(info) => {
                metrics::record_login(chain, true);
                Some(info)
            }
            Err(e) => {
                metrics::record_login(chain, false);
                tracing::error!(chain = %chain, error = %e, "Login failed");
                None
            }
        }
    }

    /// `transact` mapped onto the `success` / `error` sentinel.
    pub async fn transact_by_chain(
        &self,
        chain: ChainId,
        address: &str,
        contract: &str,
        action: &str,
        data: Value,
    ) -> TransactStatus {
        match self.transact(chain, address, contract, action, data).await {
            Ok(()) => {
                metrics::record_transaction(chain, true);
                TransactStatus::Success
            }
            Err(e) => {
                metrics::record_transaction(chain, false);
                tracing::error!(chain = %chain, address, error = %e, "Transaction failed");
                TransactStatus::Error
            }
        }
    }
}

/// The signed and the submitted envelope for one action, sharing `nonce`.
pub fn build_envelopes(
    contract: &str,
    action: &str,
    data: Value,
    binargs: String,
    nonce: u64,
) -> (PlainEnvelope, PackedEnvelope) {
    (
        PlainEnvelope::single(contract, action, data, nonce),
        PackedEnvelope::single(contract, action, binargs, nonce),
    )
}
