pub mod dns;
pub mod query_log;
pub mod tls;
