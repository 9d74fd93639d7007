use super::rotation::{RotatingWriter, RotationPolicy};
use async_trait::async_trait;
use chrono::SecondsFormat;
use doh_relay_application::ports::QueryLogSink;
use doh_relay_domain::config::{FileLogConfig, FileLogFormat};
use doh_relay_domain::{DomainError, QueryLog};
use tokio::sync::Mutex;
use tracing::info;

pub const CSV_HEADER: &str =
    "Timestamp,ClientIP,Domain,QueryType,ResponseCode,AnswerCount,Answers,DurationMs,DoHServer\n";

/// Appends one JSON object or CSV row per transaction to a rotating file
pub struct FileQueryLog {
    format: FileLogFormat,
    writer: Mutex<RotatingWriter>,
}

impl FileQueryLog {
    pub fn open(config: &FileLogConfig) -> Result<Self, DomainError> {
        let policy = RotationPolicy::new(config.max_size, config.max_backups, config.max_age);
        let writer = RotatingWriter::open(&config.path, policy).map_err(|e| {
            DomainError::QueryLog(format!("Failed to open log file {}: {}", config.path, e))
        })?;

        info!(
            path = %writer.path().display(),
            format = config.format.as_str(),
            max_size_mb = config.max_size,
            max_backups = config.max_backups,
            max_age_days = config.max_age,
            "File query logging enabled"
        );

        Ok(Self {
            format: config.format,
            writer: Mutex::new(writer),
        })
    }

    fn encode(&self, entry: &QueryLog) -> Result<Vec<u8>, DomainError> {
        match self.format {
            FileLogFormat::Json => encode_json(entry),
            FileLogFormat::Csv => encode_csv(entry),
        }
    }

    fn header(&self) -> Option<&'static [u8]> {
        match self.format {
            FileLogFormat::Json => None,
            FileLogFormat::Csv => Some(CSV_HEADER.as_bytes()),
        }
    }
}

fn encode_json(entry: &QueryLog) -> Result<Vec<u8>, DomainError> {
    let mut line = serde_json::to_vec(entry)
        .map_err(|e| DomainError::QueryLog(format!("Failed to encode JSON record: {}", e)))?;
    line.push(b'\n');
    Ok(line)
}

fn encode_csv(entry: &QueryLog) -> Result<Vec<u8>, DomainError> {
    let answers = entry
        .answers_json()
        .map_err(|e| DomainError::QueryLog(format!("Failed to encode answers: {}", e)))?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::with_capacity(256));

    writer
        .write_record([
            entry.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            entry.client_ip.clone(),
            entry.domain.clone(),
            entry.query_type.clone(),
            entry.response_code.clone(),
            entry.answer_count.to_string(),
            answers,
            entry.duration_ms.to_string(),
            entry.upstream_server.clone(),
        ])
        .map_err(|e| DomainError::QueryLog(format!("Failed to encode CSV record: {}", e)))?;

    writer
        .into_inner()
        .map_err(|e| DomainError::QueryLog(format!("Failed to flush CSV record: {}", e)))
}

#[async_trait]
impl QueryLogSink for FileQueryLog {
    async fn log(&self, entry: QueryLog) -> Result<(), DomainError> {
        let record = self.encode(&entry)?;

        let mut writer = self.writer.lock().await;
        writer
            .write_record(&record, self.header())
            .map_err(|e| DomainError::QueryLog(format!("Failed to write query log: {}", e)))
    }

    async fn close(&self) -> Result<(), DomainError> {
        let mut writer = self.writer.lock().await;
        writer
            .flush()
            .map_err(|e| DomainError::QueryLog(format!("Failed to flush query log: {}", e)))
    }
}
