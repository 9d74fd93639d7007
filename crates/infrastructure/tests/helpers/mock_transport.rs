#![allow(dead_code)]

use async_trait::async_trait;
use doh_relay_domain::DomainError;
use doh_relay_infrastructure::dns::transport::{DnsTransport, TransportResponse};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

enum Behavior {
    Respond(Vec<u8>),
    Hang,
    Fail(DomainError),
}

/// Scripted transport that counts how often it was used
pub struct MockTransport {
    server: String,
    behavior: Behavior,
    calls: AtomicUsize,
}

impl MockTransport {
    pub fn responding(server: &str, bytes: Vec<u8>) -> Self {
        Self::with_behavior(server, Behavior::Respond(bytes))
    }

    /// Never answers within any reasonable timeout.
    pub fn hanging(server: &str) -> Self {
        Self::with_behavior(server, Behavior::Hang)
    }

    pub fn failing(server: &str, error: DomainError) -> Self {
        Self::with_behavior(server, Behavior::Fail(error))
    }

    fn with_behavior(server: &str, behavior: Behavior) -> Self {
        Self {
            server: server.to_string(),
            behavior,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DnsTransport for MockTransport {
    async fn send(
        &self,
        _message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            Behavior::Respond(bytes) => Ok(TransportResponse {
                bytes: bytes.clone(),
                protocol_used: "MOCK",
            }),
            Behavior::Hang => {
                let _ = tokio::time::timeout(timeout, std::future::pending::<()>()).await;
                Err(DomainError::UpstreamTimeout {
                    server: self.server.clone(),
                })
            }
            Behavior::Fail(error) => Err(error.clone()),
        }
    }

    fn protocol_name(&self) -> &'static str {
        "MOCK"
    }
}
