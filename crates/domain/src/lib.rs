//! doh-relay domain layer
pub mod config;
pub mod dns_answer;
pub mod errors;
pub mod query_log;
pub mod trust_policy;

pub use config::{CliOverrides, Config, ConfigError, DohConfig, UpstreamServer};
pub use dns_answer::{AnswerData, AnswerEntry};
pub use errors::DomainError;
pub use query_log::QueryLog;
pub use trust_policy::TrustPolicy;
