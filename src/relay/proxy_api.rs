//! Client for the submission proxy: account binding and transaction push.

use crate::relay::types::{AuthParams, ProxyAck, PushPayload};
use crate::strategy::ChainId;
use crate::transport::{HttpClient, TransportResult};

#[derive(Debug, Clone)]
pub struct SubmissionProxyClient {
    http: HttpClient,
}

impl SubmissionProxyClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub fn bind_path(label: &str) -> String {
        format!("/api/submit/bind{}", label)
    }

    pub fn push_path(chain: ChainId) -> String {
        format!("/api/submit/push{}", chain.base_chain_label())
    }

    /// Ask the proxy to create an account for the signed address. The route
    /// follows the params' base-chain label.
    pub async fn bind(&self, params: &AuthParams) -> TransportResult<ProxyAck> {
        self.http
            .post(&Self::bind_path(&params.body.base_chain), params)
            .await
    }

    pub async fn push(&self, chain: ChainId, payload: &PushPayload) -> TransportResult<ProxyAck> {
        self.http.post(&Self::push_path(chain), payload).await
    }
}
