//! HTTPS transport for DNS queries, DNS-over-HTTPS (RFC 8484)
//!
//! Sends DNS queries as HTTP POST requests with `application/dns-message` content type.
//! The request body is the raw DNS wire format message, and the response body
//! contains the raw DNS wire format response.
//!
//! Wire format (HTTP):
//! ```text
//! POST /dns-query HTTP/2
//! Content-Type: application/dns-message
//! Accept: application/dns-message
//!
//! <raw DNS message bytes>
//! ```

use super::{DnsTransport, TransportResponse};
use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use doh_relay_domain::DomainError;
use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Expected content type for DNS-over-HTTPS responses (RFC 8484 §4.2.1)
pub const DNS_MESSAGE_CONTENT_TYPE: &str = "application/dns-message";

const MAX_IDLE_PER_HOST: usize = 10;
const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

fn user_agent() -> String {
    format!("doh-relay/{}", env!("CARGO_PKG_VERSION"))
}

/// Pooled HTTP client shared by every upstream.
///
/// Dropping the inner client on `shutdown` closes idle connections; requests
/// issued afterwards fail with `UpstreamShutdown`.
pub struct HttpsClient {
    inner: ArcSwapOption<reqwest::Client>,
}

impl HttpsClient {
    pub fn new(
        tls_config: rustls::ClientConfig,
        use_http2: bool,
    ) -> Result<Self, DomainError> {
        let mut builder = reqwest::Client::builder()
            .use_preconfigured_tls(tls_config)
            .pool_max_idle_per_host(MAX_IDLE_PER_HOST)
            .pool_idle_timeout(POOL_IDLE_TIMEOUT);

        if !use_http2 {
            builder = builder.http1_only();
        }

        let client = builder
            .build()
            .map_err(|e| DomainError::TlsConfig(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::from_client(client))
    }

    pub fn from_client(client: reqwest::Client) -> Self {
        Self {
            inner: ArcSwapOption::from_pointee(client),
        }
    }

    pub fn get(&self) -> Option<Arc<reqwest::Client>> {
        self.inner.load_full()
    }

    pub fn shutdown(&self) {
        self.inner.store(None);
    }

    pub fn is_shut_down(&self) -> bool {
        self.inner.load().is_none()
    }
}

/// DNS-over-HTTPS transport (RFC 8484)
pub struct HttpsTransport {
    server: Arc<str>,
    url: String,
    client: Arc<HttpsClient>,
}

impl HttpsTransport {
    pub fn new(server: impl Into<Arc<str>>, url: String, client: Arc<HttpsClient>) -> Self {
        Self {
            server: server.into(),
            url,
            client,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn exchange(&self, message_bytes: &[u8]) -> Result<Vec<u8>, DomainError> {
        let client = self.client.get().ok_or(DomainError::UpstreamShutdown)?;

        // POST with application/dns-message (RFC 8484 §4.1)
        let response = client
            .post(&self.url)
            .header(CONTENT_TYPE, DNS_MESSAGE_CONTENT_TYPE)
            .header(ACCEPT, DNS_MESSAGE_CONTENT_TYPE)
            .header(USER_AGENT, user_agent())
            .body(message_bytes.to_vec())
            .send()
            .await
            .map_err(|e| DomainError::UpstreamRequest {
                server: self.server.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(DomainError::UpstreamStatus {
                server: self.server.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if content_type != DNS_MESSAGE_CONTENT_TYPE {
            return Err(DomainError::UpstreamContentType {
                server: self.server.to_string(),
                content_type,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| DomainError::UpstreamRequest {
                server: self.server.to_string(),
                reason: format!("failed to read body: {}", e),
            })?;

        Ok(body.to_vec())
    }
}

#[async_trait]
impl DnsTransport for HttpsTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        debug!(
            server = %self.server,
            url = %self.url,
            message_len = message_bytes.len(),
            "Sending DoH query"
        );

        let bytes = tokio::time::timeout(timeout, self.exchange(message_bytes))
            .await
            .map_err(|_| DomainError::UpstreamTimeout {
                server: self.server.to_string(),
            })??;

        debug!(
            server = %self.server,
            response_len = bytes.len(),
            "DoH response received"
        );

        Ok(TransportResponse {
            bytes,
            protocol_used: "HTTPS",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "HTTPS"
    }
}
