use async_trait::async_trait;
use doh_relay_application::ports::QueryLogSink;
use doh_relay_domain::{DomainError, QueryLog};
use tracing::info;

/// Reports each transaction as structured log lines
#[derive(Debug, Default)]
pub struct ConsoleQueryLog;

impl ConsoleQueryLog {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl QueryLogSink for ConsoleQueryLog {
    async fn log(&self, entry: QueryLog) -> Result<(), DomainError> {
        info!(
            client = %entry.client_ip,
            domain = %entry.domain,
            query_type = %entry.query_type,
            "Query received"
        );

        if entry.succeeded() {
            info!(
                domain = %entry.domain,
                answers = entry.answer_count,
                duration_ms = entry.duration_ms,
                server = %entry.upstream_server,
                "Query successful"
            );
        } else {
            info!(
                domain = %entry.domain,
                response_code = %entry.response_code,
                duration_ms = entry.duration_ms,
                "Query answered without records"
            );
        }

        Ok(())
    }

    async fn close(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
