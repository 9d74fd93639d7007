use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Invalid DNS message: {0}")]
    InvalidDnsMessage(String),

    #[error("Failed to encode DNS message: {0}")]
    MessageEncoding(String),

    #[error("Timeout querying DoH server {server}")]
    UpstreamTimeout { server: String },

    #[error("DoH request to {server} failed: {reason}")]
    UpstreamRequest { server: String, reason: String },

    #[error("DoH server {server} returned error status code: {status}")]
    UpstreamStatus { server: String, status: u16 },

    #[error("DoH server {server} returned invalid content type: {content_type}")]
    UpstreamContentType {
        server: String,
        content_type: String,
    },

    #[error("DoH client has been shut down")]
    UpstreamShutdown,

    #[error("No DoH servers configured")]
    NoUpstreamServers,

    #[error("All DoH servers failed, last error: {0}")]
    AllUpstreamsFailed(Box<DomainError>),

    #[error("Certificate trust check failed: {0}")]
    Trust(String),

    #[error("TLS configuration error: {0}")]
    TlsConfig(String),

    #[error("Query log error: {0}")]
    QueryLog(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Failed to bind {addr}: {reason}")]
    Bind { addr: String, reason: String },
}

impl From<std::io::Error> for DomainError {
    fn from(e: std::io::Error) -> Self {
        Self::IoError(e.to_string())
    }
}
