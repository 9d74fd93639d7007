use async_trait::async_trait;
use doh_relay_application::ports::QueryLogSink;
use doh_relay_domain::config::{DatabaseKind, DatabaseLogConfig, PostgresConfig};
use doh_relay_domain::{DomainError, QueryLog};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgSslMode};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

const SQLITE_SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS query_logs (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        timestamp TEXT NOT NULL,
        client_ip TEXT NOT NULL,
        domain TEXT NOT NULL,
        query_type TEXT NOT NULL,
        response_code TEXT NOT NULL,
        answer_count INTEGER NOT NULL,
        answers TEXT,
        duration_ms INTEGER NOT NULL,
        doh_server TEXT
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_query_logs_timestamp ON query_logs(timestamp)",
    "CREATE INDEX IF NOT EXISTS idx_query_logs_domain ON query_logs(domain)",
    "CREATE INDEX IF NOT EXISTS idx_query_logs_client_ip ON query_logs(client_ip)",
];

const POSTGRES_SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS query_logs (
        id BIGSERIAL PRIMARY KEY,
        timestamp TIMESTAMPTZ NOT NULL,
        client_ip TEXT NOT NULL,
        domain TEXT NOT NULL,
        query_type TEXT NOT NULL,
        response_code TEXT NOT NULL,
        answer_count INTEGER NOT NULL,
        answers TEXT,
        duration_ms BIGINT NOT NULL,
        doh_server TEXT
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_query_logs_timestamp ON query_logs(timestamp)",
    "CREATE INDEX IF NOT EXISTS idx_query_logs_domain ON query_logs(domain)",
    "CREATE INDEX IF NOT EXISTS idx_query_logs_client_ip ON query_logs(client_ip)",
];

const SQLITE_INSERT: &str = "INSERT INTO query_logs \
    (timestamp, client_ip, domain, query_type, response_code, answer_count, answers, duration_ms, doh_server) \
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)";

const POSTGRES_INSERT: &str = "INSERT INTO query_logs \
    (timestamp, client_ip, domain, query_type, response_code, answer_count, answers, duration_ms, doh_server) \
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)";

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::DatabaseError(format!("{}: {}", context, e))
}

/// One row per transaction in a `query_logs` table.
///
/// Pools hold a single connection so inserts are serialized.
pub enum DatabaseQueryLog {
    Sqlite(SqlitePool),
    Postgres(PgPool),
}

impl DatabaseQueryLog {
    pub async fn connect(config: &DatabaseLogConfig) -> Result<Self, DomainError> {
        match config.kind {
            DatabaseKind::Sqlite => Self::sqlite(&config.sqlite.path).await,
            DatabaseKind::Postgresql => Self::postgres(&config.postgresql).await,
        }
    }

    pub async fn sqlite(path: &str) -> Result<Self, DomainError> {
        if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path))
            .map_err(|e| db_error("Invalid SQLite path", e))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| db_error("Failed to open SQLite database", e))?;

        info!(path = %path, "SQLite query logging enabled");
        Self::from_sqlite_pool(pool).await
    }

    pub async fn from_sqlite_pool(pool: SqlitePool) -> Result<Self, DomainError> {
        for statement in SQLITE_SCHEMA {
            sqlx::query(statement)
                .execute(&pool)
                .await
                .map_err(|e| db_error("Failed to create query_logs schema", e))?;
        }
        Ok(Self::Sqlite(pool))
    }

    pub async fn postgres(config: &PostgresConfig) -> Result<Self, DomainError> {
        let ssl_mode = PgSslMode::from_str(&config.sslmode)
            .map_err(|e| db_error("Invalid PostgreSQL sslmode", e))?;

        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .database(&config.database)
            .username(&config.user)
            .password(&config.password)
            .ssl_mode(ssl_mode);

        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| db_error("Failed to connect to PostgreSQL", e))?;

        for statement in POSTGRES_SCHEMA {
            sqlx::query(statement)
                .execute(&pool)
                .await
                .map_err(|e| db_error("Failed to create query_logs schema", e))?;
        }

        info!(
            host = %config.host,
            port = config.port,
            database = %config.database,
            "PostgreSQL query logging enabled"
        );
        Ok(Self::Postgres(pool))
    }
}

#[async_trait]
impl QueryLogSink for DatabaseQueryLog {
    async fn log(&self, entry: QueryLog) -> Result<(), DomainError> {
        let answers = entry
            .answers_json()
            .map_err(|e| DomainError::QueryLog(format!("Failed to encode answers: {}", e)))?;
        let upstream = (!entry.upstream_server.is_empty()).then_some(entry.upstream_server.as_str());

        match self {
            Self::Sqlite(pool) => {
                sqlx::query(SQLITE_INSERT)
                    .bind(entry.timestamp)
                    .bind(&entry.client_ip)
                    .bind(&entry.domain)
                    .bind(&entry.query_type)
                    .bind(&entry.response_code)
                    .bind(entry.answer_count as i64)
                    .bind(&answers)
                    .bind(entry.duration_ms as i64)
                    .bind(upstream)
                    .execute(pool)
                    .await
                    .map_err(|e| db_error("Failed to insert query log", e))?;
            }
            Self::Postgres(pool) => {
                sqlx::query(POSTGRES_INSERT)
                    .bind(entry.timestamp)
                    .bind(&entry.client_ip)
                    .bind(&entry.domain)
                    .bind(&entry.query_type)
                    .bind(&entry.response_code)
                    .bind(entry.answer_count as i32)
                    .bind(&answers)
                    .bind(entry.duration_ms as i64)
                    .bind(upstream)
                    .execute(pool)
                    .await
                    .map_err(|e| db_error("Failed to insert query log", e))?;
            }
        }

        debug!(domain = %entry.domain, "Query log row inserted");
        Ok(())
    }

    async fn close(&self) -> Result<(), DomainError> {
        match self {
            Self::Sqlite(pool) => pool.close().await,
            Self::Postgres(pool) => pool.close().await,
        }
        Ok(())
    }
}
