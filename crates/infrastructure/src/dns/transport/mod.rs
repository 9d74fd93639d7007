pub mod https;

use async_trait::async_trait;
use doh_relay_domain::DomainError;
use std::time::Duration;

pub use https::{HttpsClient, HttpsTransport};

#[derive(Debug)]
pub struct TransportResponse {
    pub bytes: Vec<u8>,

    pub protocol_used: &'static str,
}

#[async_trait]
pub trait DnsTransport: Send + Sync {
    /// Exchange one wire-format message; `timeout` bounds the whole exchange.
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError>;

    fn protocol_name(&self) -> &'static str;
}
