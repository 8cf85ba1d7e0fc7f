//! Relay data model: account rows, bind parameters, transaction envelopes
//! and the payloads exchanged with the backend services.

use base64::Engine as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::strategy::{ChainFamily, ChainId, HashType};

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Unix seconds, rounded to the nearest second.
fn now_secs() -> u64 {
    round_to_secs(now_millis())
}

fn round_to_secs(millis: u64) -> u64 {
    (millis + 500) / 1000
}

/// Table rows encode large integers either as numbers or as strings.
fn lenient_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrString {
        Num(u64),
        Str(String),
    }

    match NumOrString::deserialize(deserializer)? {
        NumOrString::Num(n) => Ok(n),
        NumOrString::Str(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

/// A row of the proxy account table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    /// On-chain account name assigned at bind time.
    pub account: String,
    /// Wallet address the account is bound to.
    pub address: String,
    pub created_at: String,
    /// Next nonce the account expects.
    #[serde(deserialize_with = "lenient_u64")]
    pub nonce: u64,
}

/// Login result handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub account: String,
    pub address: String,
    pub chain: ChainId,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl AccountInfo {
    pub fn from_record(record: AccountRecord, chain: ChainId) -> Self {
        Self {
            account: record.account,
            address: record.address,
            chain,
            created_at: record.created_at,
        }
    }
}

/// Signed proof of address ownership sent to the bind endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthParams {
    pub body: AuthBody,
    /// Unix milliseconds.
    pub ts: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthBody {
    pub address: String,
    pub signature: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub hash_type: Option<HashType>,
    pub base_chain: String,
}

impl AuthParams {
    pub fn new(chain: ChainId, address: &str, signature: String) -> Self {
        Self {
            body: AuthBody {
                address: address.to_string(),
                signature,
                hash_type: chain.hash_type(),
                base_chain: chain.base_chain_label().to_string(),
            },
            ts: now_millis(),
        }
    }
}

/// One contract action inside an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxAction<D> {
    pub contract: String,
    pub action: String,
    pub data: D,
}

/// Actions plus the nonce they are ordered by.
///
/// The plain form (`D = Value`) is what gets signed; the packed form
/// (`D = String`, ABI-encoded hex) is what gets submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionEnvelope<D> {
    pub txns: Vec<TxAction<D>>,
    pub nonce: u64,
}

pub type PlainEnvelope = TransactionEnvelope<Value>;
pub type PackedEnvelope = TransactionEnvelope<String>;

impl<D> TransactionEnvelope<D> {
    pub fn single(contract: &str, action: &str, data: D, nonce: u64) -> Self {
        Self {
            txns: vec![TxAction {
                contract: contract.to_string(),
                action: action.to_string(),
                data,
            }],
            nonce,
        }
    }
}

/// Payload for the push endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushPayload {
    pub body: PushBody,
    /// Unix seconds.
    pub ts: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PushBody {
    /// Keccak-verified chains ship the signed text alongside the signature.
    Keccak {
        txns: Vec<TxAction<String>>,
        nonce: u64,
        hash_type: HashType,
        address: String,
        /// Base64 of the exact string that was signed.
        sign_message: String,
        signature: String,
    },
    Solana {
        txns: Vec<TxAction<String>>,
        nonce: u64,
        address: String,
        signature: String,
    },
}

impl PushPayload {
    /// Build the family-specific payload. `signed_message` must be the exact
    /// string the signature covers.
    pub fn new(
        chain: ChainId,
        packed: PackedEnvelope,
        address: &str,
        signed_message: &str,
        signature: String,
    ) -> Self {
        let TransactionEnvelope { txns, nonce } = packed;
        let body = match chain.family() {
            ChainFamily::Solana => PushBody::Solana {
                txns,
                nonce,
                address: address.to_string(),
                signature,
            },
            ChainFamily::Evm | ChainFamily::Tron => PushBody::Keccak {
                txns,
                nonce,
                hash_type: HashType::Keccak,
                address: address.to_string(),
                sign_message: base64::engine::general_purpose::STANDARD.encode(signed_message),
                signature,
            },
        };
        Self {
            body,
            ts: now_secs(),
        }
    }

    pub fn nonce(&self) -> u64 {
        match &self.body {
            PushBody::Keccak { nonce, .. } | PushBody::Solana { nonce, .. } => *nonce,
        }
    }
}

/// Acknowledgment returned by the submission proxy.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProxyAck {
    /// Arrives as a number or a numeric string.
    #[serde(default)]
    pub code: Value,
}

impl ProxyAck {
    pub fn code(&self) -> Option<i64> {
        match &self.code {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Push acknowledgment: numeric strings count.
    pub fn is_success(&self) -> bool {
        self.code() == Some(200)
    }

    /// Bind acknowledgment: only the number 200 counts.
    pub fn is_bind_success(&self) -> bool {
        self.code.as_i64() == Some(200)
    }
}

/// Sentinel result of the legacy transaction entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactStatus {
    Success,
    Error,
}

impl fmt::Display for TransactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactStatus::Success => f.write_str("success"),
            TransactStatus::Error => f.write_str("error"),
        }
    }
}

/// `/v1/chain/get_table_rows` request.
#[derive(Debug, Clone, Serialize)]
pub struct TableRowsRequest<'a> {
    pub code: &'a str,
    pub scope: &'a str,
    pub table: &'a str,
    pub index_position: u32,
    pub key_type: &'a str,
    pub lower_bound: &'a str,
    pub upper_bound: &'a str,
    pub json: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableRowsResponse<T> {
    #[serde(default = "Vec::new")]
    pub rows: Vec<T>,
}

/// `/v1/chain/abi_json_to_bin` request.
#[derive(Debug, Clone, Serialize)]
pub struct AbiJsonToBinRequest<'a> {
    pub code: &'a str,
    pub action: &'a str,
    pub args: &'a Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbiJsonToBinResponse {
    pub binargs: String,
}
