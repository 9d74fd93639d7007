pub mod errors;
pub mod logging;
pub mod root;
pub mod server;
pub mod tls;
pub mod upstream;

pub use errors::ConfigError;
pub use logging::{
    DatabaseKind, DatabaseLogConfig, FileLogConfig, FileLogFormat, LoggingConfig,
    PostgresConfig, QueryLogConfig, QueryLogTarget, SqliteConfig,
};
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
pub use tls::TlsConfig;
pub use upstream::{DohConfig, UpstreamServer};
