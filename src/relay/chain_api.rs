//! Client for the chain-query service: account table lookups and ABI
//! encoding of action data.

use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::config::AccountTableConfig;
use crate::relay::types::{
    AbiJsonToBinRequest, AbiJsonToBinResponse, AccountRecord, TableRowsRequest, TableRowsResponse,
};
use crate::transport::{HttpClient, TransportResult};

pub const GET_TABLE_ROWS_PATH: &str = "/v1/chain/get_table_rows";
pub const ABI_JSON_TO_BIN_PATH: &str = "/v1/chain/abi_json_to_bin";

/// Index key for an address: lower-case hex SHA-256 of its UTF-8 bytes.
pub fn account_key(address: &str) -> String {
    hex::encode(Sha256::digest(address.as_bytes()))
}

#[derive(Debug, Clone)]
pub struct ChainQueryClient {
    http: HttpClient,
    table: AccountTableConfig,
}

impl ChainQueryClient {
    pub fn new(http: HttpClient, table: AccountTableConfig) -> Self {
        Self { http, table }
    }

    /// Look up the account bound to `address`, if any.
    pub async fn get_account(&self, address: &str) -> TransportResult<Option<AccountRecord>> {
        let key = account_key(address);
        let request = TableRowsRequest {
            code: &self.table.code,
            scope: &self.table.scope,
            table: &self.table.table,
            index_position: self.table.index_position,
            key_type: &self.table.key_type,
            lower_bound: &key,
            upper_bound: &key,
            json: true,
        };

        let response: TableRowsResponse<AccountRecord> =
            self.http.post(GET_TABLE_ROWS_PATH, &request).await?;

        let record = response.rows.into_iter().next();
        tracing::debug!(address, key = %key, found = record.is_some(), "Account lookup");
        Ok(record)
    }

    /// Encode action arguments with the contract ABI, returning hex.
    pub async fn abi_json_to_bin(
        &self,
        contract: &str,
        action: &str,
        args: &Value,
    ) -> TransportResult<String> {
        let request = AbiJsonToBinRequest {
            code: contract,
            action,
            args,
        };
        let response: AbiJsonToBinResponse = self.http.post(ABI_JSON_TO_BIN_PATH, &request).await?;
        Ok(response.binargs)
    }
}
