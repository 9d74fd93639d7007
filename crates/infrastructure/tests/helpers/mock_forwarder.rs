#![allow(dead_code)]

use async_trait::async_trait;
use doh_relay_application::ports::{DnsForwarder, ForwardedResponse, QueryLogSink};
use doh_relay_domain::{DomainError, QueryLog};
use hickory_proto::op::Message;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Answers every query with the same upstream message
pub struct StaticForwarder {
    answer: Option<Message>,
    calls: AtomicUsize,
}

impl StaticForwarder {
    pub fn answering(message: Message) -> Self {
        Self {
            answer: Some(message),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            answer: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DnsForwarder for StaticForwarder {
    async fn resolve(&self, _query: &Message) -> Result<ForwardedResponse, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.answer {
            Some(message) => Ok(ForwardedResponse::new(message.clone(), "Static")),
            None => Err(DomainError::AllUpstreamsFailed(Box::new(
                DomainError::UpstreamTimeout {
                    server: "Static".to_string(),
                },
            ))),
        }
    }
}

#[derive(Default)]
pub struct RecordingSink {
    entries: Mutex<Vec<QueryLog>>,
}

impl RecordingSink {
    pub fn entries(&self) -> Vec<QueryLog> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueryLogSink for RecordingSink {
    async fn log(&self, entry: QueryLog) -> Result<(), DomainError> {
        self.entries.lock().unwrap().push(entry);
        Ok(())
    }

    async fn close(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
