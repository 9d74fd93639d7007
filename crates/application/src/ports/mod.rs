mod dns_forwarder;
mod query_log_sink;

pub use dns_forwarder::{DnsForwarder, ForwardedResponse};
pub use query_log_sink::QueryLogSink;

// Re-export for convenience
pub use doh_relay_domain::QueryLog;
