use super::message_builder::MessageBuilder;
use super::response_parser::ResponseParser;
use crate::dns::transport::{DnsTransport, HttpsClient, HttpsTransport};
use crate::tls::build_client_config;
use async_trait::async_trait;
use doh_relay_application::ports::{DnsForwarder, ForwardedResponse};
use doh_relay_domain::{DohConfig, DomainError, TrustPolicy};
use hickory_proto::op::Message;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// One configured DoH endpoint
pub struct Upstream {
    pub name: Arc<str>,
    pub transport: Arc<dyn DnsTransport>,
}

impl Upstream {
    pub fn new(name: impl Into<Arc<str>>, transport: Arc<dyn DnsTransport>) -> Self {
        Self {
            name: name.into(),
            transport,
        }
    }
}

/// Relays queries to DoH upstreams in configured order, failing over on any
/// transport, status, content-type or decode error.
pub struct DohForwarder {
    upstreams: Vec<Upstream>,
    timeout: Duration,
    client: Option<Arc<HttpsClient>>,
}

impl DohForwarder {
    pub fn new(upstreams: Vec<Upstream>, timeout: Duration) -> Self {
        Self {
            upstreams,
            timeout,
            client: None,
        }
    }

    pub fn from_config(doh: &DohConfig, policy: &TrustPolicy) -> Result<Self, DomainError> {
        if doh.servers.is_empty() {
            return Err(DomainError::NoUpstreamServers);
        }

        let tls_config = build_client_config(policy, doh.use_http2)?;
        let client = Arc::new(HttpsClient::new(tls_config, doh.use_http2)?);

        let upstreams = doh
            .servers
            .iter()
            .map(|server| {
                let transport = HttpsTransport::new(
                    server.name.as_str(),
                    server.url.clone(),
                    Arc::clone(&client),
                );
                Upstream::new(server.name.as_str(), Arc::new(transport))
            })
            .collect::<Vec<_>>();

        info!(
            servers = upstreams.len(),
            timeout_secs = doh.timeout,
            http2 = doh.use_http2,
            "DoH forwarder ready"
        );

        Ok(Self {
            upstreams,
            timeout: Duration::from_secs(doh.timeout),
            client: Some(client),
        })
    }

    async fn query_upstream(
        &self,
        upstream: &Upstream,
        request_bytes: &[u8],
    ) -> Result<Message, DomainError> {
        let response = upstream
            .transport
            .send(request_bytes, self.timeout)
            .await?;
        ResponseParser::parse(&response.bytes)
    }
}

#[async_trait]
impl DnsForwarder for DohForwarder {
    async fn resolve(&self, query: &Message) -> Result<ForwardedResponse, DomainError> {
        if self.upstreams.is_empty() {
            return Err(DomainError::NoUpstreamServers);
        }

        let request_bytes = MessageBuilder::serialize(query)?;
        debug!(strategy = "failover", servers = self.upstreams.len(), "Trying sequentially");

        let mut last_error = DomainError::NoUpstreamServers;

        for (index, upstream) in self.upstreams.iter().enumerate() {
            let start = Instant::now();
            match self.query_upstream(upstream, &request_bytes).await {
                Ok(message) => {
                    debug!(
                        server = %upstream.name,
                        latency_ms = start.elapsed().as_millis() as u64,
                        position = index,
                        "Server responded"
                    );
                    return Ok(ForwardedResponse::new(message, Arc::clone(&upstream.name)));
                }
                Err(e) => {
                    warn!(server = %upstream.name, error = %e, position = index, "Failing over");
                    last_error = e;
                }
            }
        }

        Err(DomainError::AllUpstreamsFailed(Box::new(last_error)))
    }

    fn shutdown(&self) {
        if let Some(client) = &self.client {
            client.shutdown();
            debug!("DoH client connections released");
        }
    }
}
