use async_trait::async_trait;
use doh_relay_domain::DomainError;
use hickory_proto::op::Message;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ForwardedResponse {
    pub message: Message,
    /// Configured name of the upstream that answered
    pub server_name: Arc<str>,
}

impl ForwardedResponse {
    pub fn new(message: Message, server_name: impl Into<Arc<str>>) -> Self {
        Self {
            message,
            server_name: server_name.into(),
        }
    }
}

#[async_trait]
pub trait DnsForwarder: Send + Sync {
    /// Relay `query` upstream, trying servers in priority order.
    async fn resolve(&self, query: &Message) -> Result<ForwardedResponse, DomainError>;

    /// Release pooled connections. No `resolve` call is valid afterwards.
    fn shutdown(&self) {}
}
