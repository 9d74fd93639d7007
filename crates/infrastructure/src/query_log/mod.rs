//! Query transaction sinks

mod console;
mod database;
mod file;
mod rotation;

pub use console::ConsoleQueryLog;
pub use database::DatabaseQueryLog;
pub use file::{FileQueryLog, CSV_HEADER};
pub use rotation::{RotatingWriter, RotationPolicy};

use doh_relay_application::ports::QueryLogSink;
use doh_relay_domain::config::{QueryLogConfig, QueryLogTarget};
use doh_relay_domain::DomainError;
use std::sync::Arc;
use tracing::info;

/// Builds the sink selected by `[logging.query_log]`.
///
/// Disabled query logging still reports to the console.
pub async fn create_query_log(
    config: &QueryLogConfig,
) -> Result<Arc<dyn QueryLogSink>, DomainError> {
    if !config.enabled {
        return Ok(Arc::new(ConsoleQueryLog::new()));
    }

    info!(target_kind = config.target.as_str(), "Query logging enabled");

    let sink: Arc<dyn QueryLogSink> = match config.target {
        QueryLogTarget::Console => Arc::new(ConsoleQueryLog::new()),
        QueryLogTarget::File => Arc::new(FileQueryLog::open(&config.file)?),
        QueryLogTarget::Database => Arc::new(DatabaseQueryLog::connect(&config.database).await?),
    };

    Ok(sink)
}
