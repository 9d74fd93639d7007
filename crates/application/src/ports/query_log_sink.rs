use async_trait::async_trait;
use doh_relay_domain::{DomainError, QueryLog};

/// Destination for completed query transactions.
///
/// Implementations serialize concurrent `log` calls themselves.
#[async_trait]
pub trait QueryLogSink: Send + Sync {
    async fn log(&self, entry: QueryLog) -> Result<(), DomainError>;

    /// Flush and release the underlying writer or connection.
    async fn close(&self) -> Result<(), DomainError>;
}
