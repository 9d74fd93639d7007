#![allow(dead_code)]

use async_trait::async_trait;
use doh_relay_application::ports::{DnsForwarder, ForwardedResponse, QueryLogSink};
use doh_relay_domain::{DomainError, QueryLog};
use hickory_proto::op::Message;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Answers every query with a fixed message or a fixed error
pub struct MockDnsForwarder {
    outcome: Result<ForwardedResponse, DomainError>,
    calls: AtomicUsize,
    shut_down: AtomicBool,
}

impl MockDnsForwarder {
    pub fn answering(server_name: &str, message: Message) -> Self {
        Self {
            outcome: Ok(ForwardedResponse::new(message, server_name)),
            calls: AtomicUsize::new(0),
            shut_down: AtomicBool::new(false),
        }
    }

    pub fn failing(error: DomainError) -> Self {
        Self {
            outcome: Err(error),
            calls: AtomicUsize::new(0),
            shut_down: AtomicBool::new(false),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DnsForwarder for MockDnsForwarder {
    async fn resolve(&self, _query: &Message) -> Result<ForwardedResponse, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }

    fn shutdown(&self) {
        self.shut_down.store(true, Ordering::SeqCst);
    }
}

#[derive(Clone, Default)]
pub struct MockQueryLogSink {
    entries: Arc<Mutex<Vec<QueryLog>>>,
    fail: bool,
}

impl MockQueryLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            entries: Arc::default(),
            fail: true,
        }
    }

    pub fn entries(&self) -> Vec<QueryLog> {
        self.entries.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

#[async_trait]
impl QueryLogSink for MockQueryLogSink {
    async fn log(&self, entry: QueryLog) -> Result<(), DomainError> {
        if self.fail {
            return Err(DomainError::QueryLog("sink unavailable".to_string()));
        }
        self.entries.lock().unwrap().push(entry);
        Ok(())
    }

    async fn close(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
