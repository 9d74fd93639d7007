use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub query_log: QueryLogConfig,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            query_log: QueryLogConfig::default(),
        }
    }
}

/// Where completed query transactions are written.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct QueryLogConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub target: QueryLogTarget,

    #[serde(default)]
    pub file: FileLogConfig,

    #[serde(default)]
    pub database: DatabaseLogConfig,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum QueryLogTarget {
    #[default]
    Console,

    File,

    Database,
}

impl QueryLogTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Console => "console",
            Self::File => "file",
            Self::Database => "database",
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FileLogFormat {
    #[default]
    Json,

    Csv,
}

impl FileLogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FileLogConfig {
    #[serde(default)]
    pub format: FileLogFormat,

    #[serde(default = "default_file_path")]
    pub path: String,

    /// Rotation threshold in megabytes, 0 disables rotation
    #[serde(default = "default_max_size")]
    pub max_size: u64,

    /// Rotated files kept, 0 keeps all
    #[serde(default = "default_max_backups")]
    pub max_backups: usize,

    /// Days a rotated file is kept, 0 keeps forever
    #[serde(default = "default_max_age")]
    pub max_age: u64,
}

impl Default for FileLogConfig {
    fn default() -> Self {
        Self {
            format: FileLogFormat::default(),
            path: default_file_path(),
            max_size: default_max_size(),
            max_backups: default_max_backups(),
            max_age: default_max_age(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseKind {
    #[default]
    Sqlite,

    Postgresql,
}

impl DatabaseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::Postgresql => "postgresql",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DatabaseLogConfig {
    #[serde(rename = "type", default)]
    pub kind: DatabaseKind,

    #[serde(default)]
    pub sqlite: SqliteConfig,

    #[serde(default)]
    pub postgresql: PostgresConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SqliteConfig {
    #[serde(default = "default_sqlite_path")]
    pub path: String,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            path: default_sqlite_path(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PostgresConfig {
    #[serde(default = "default_pg_host")]
    pub host: String,

    #[serde(default = "default_pg_port")]
    pub port: u16,

    #[serde(default = "default_pg_database")]
    pub database: String,

    #[serde(default = "default_pg_user")]
    pub user: String,

    #[serde(default)]
    pub password: String,

    #[serde(default = "default_pg_sslmode")]
    pub sslmode: String,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            host: default_pg_host(),
            port: default_pg_port(),
            database: default_pg_database(),
            user: default_pg_user(),
            password: String::new(),
            sslmode: default_pg_sslmode(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_file_path() -> String {
    "./logs/queries.log".to_string()
}

fn default_max_size() -> u64 {
    100
}

fn default_max_backups() -> usize {
    3
}

fn default_max_age() -> u64 {
    28
}

fn default_sqlite_path() -> String {
    "./data/queries.db".to_string()
}

fn default_pg_host() -> String {
    "localhost".to_string()
}

fn default_pg_port() -> u16 {
    5432
}

fn default_pg_database() -> String {
    "dns_logs".to_string()
}

fn default_pg_user() -> String {
    "postgres".to_string()
}

fn default_pg_sslmode() -> String {
    "disable".to_string()
}
