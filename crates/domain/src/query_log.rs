use crate::dns_answer::AnswerEntry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Transaction record for one relayed query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryLog {
    pub timestamp: DateTime<Utc>,
    pub client_ip: String,
    pub domain: String,
    pub query_type: String,
    pub response_code: String,
    pub answer_count: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub answers: Vec<AnswerEntry>,
    pub duration_ms: u64,
    /// Name of the upstream that answered; empty when none did
    #[serde(rename = "doh_server", default)]
    pub upstream_server: String,
}

impl QueryLog {
    pub fn succeeded(&self) -> bool {
        self.answer_count > 0
    }

    /// Answers as a JSON array string, empty when there are none.
    pub fn answers_json(&self) -> Result<String, serde_json::Error> {
        if self.answers.is_empty() {
            return Ok(String::new());
        }
        serde_json::to_string(&self.answers)
    }
}
