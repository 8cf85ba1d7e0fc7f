//! HTTP client bound to a single backend service.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::{Duration, Instant};
use url::Url;
use uuid::Uuid;

use crate::observability::metrics;
use crate::transport::error::{TransportError, TransportResult};

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// JSON client for one backend base URL.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpClient {
    /// Create a client for `base_url` with a fixed per-request deadline.
    pub fn new(base_url: &str, timeout: Duration) -> TransportResult<Self> {
        Url::parse(base_url)
            .map_err(|e| TransportError::InvalidUrl(format!("'{}': {}", base_url, e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Resolve `path` below the base URL, keeping any base path prefix.
    pub fn url(&self, path: &str) -> TransportResult<Url> {
        let joined = if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        };
        Url::parse(&joined).map_err(|e| TransportError::InvalidUrl(format!("'{}': {}", joined, e)))
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> TransportResult<T> {
        let url = self.url(path)?;
        self.send(Method::GET, self.client.get(url).query(query)).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> TransportResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path)?;
        self.send(Method::POST, self.client.post(url).json(body)).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> TransportResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path)?;
        self.send(Method::PUT, self.client.put(url).json(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> TransportResult<T> {
        let url = self.url(path)?;
        self.send(Method::DELETE, self.client.delete(url)).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        request: RequestBuilder,
    ) -> TransportResult<T> {
        let request_id = Uuid::new_v4().to_string();
        let started = Instant::now();

        let result = request.header(REQUEST_ID_HEADER, &request_id).send().await;
        metrics::record_http_request(method.as_str(), started.elapsed());

        let resp = match result {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(
                    request_id = %request_id,
                    method = %method,
                    base_url = %self.base_url,
                    error = %e,
                    "Request failed"
                );
                return Err(TransportError::Network(e));
            }
        };

        let status = resp.status();
        let url = resp.url().clone();
        let text = resp.text().await?;

        tracing::debug!(
            request_id = %request_id,
            method = %method,
            url = %url,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Backend responded"
        );

        if !status.is_success() {
            return Err(TransportError::Status { status, body: text });
        }

        if text.trim().is_empty() {
            return Ok(serde_json::from_value(serde_json::Value::Null)?);
        }

        Ok(serde_json::from_str(&text)?)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout.as_millis())
            .finish()
    }
}
