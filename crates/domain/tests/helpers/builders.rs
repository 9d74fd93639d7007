#![allow(dead_code)]
use chrono::{TimeZone, Utc};
use doh_relay_domain::{AnswerData, AnswerEntry, QueryLog};
use std::net::Ipv4Addr;

pub struct QueryLogBuilder {
    domain: String,
    query_type: String,
    client_ip: String,
    response_code: String,
    answers: Vec<AnswerEntry>,
    duration_ms: u64,
    upstream_server: String,
}

impl QueryLogBuilder {
    pub fn new() -> Self {
        Self {
            domain: "example.com.".to_string(),
            query_type: "A".to_string(),
            client_ip: "192.168.1.100:53000".to_string(),
            response_code: "NOERROR".to_string(),
            answers: vec![],
            duration_ms: 12,
            upstream_server: "Cloudflare".to_string(),
        }
    }

    pub fn domain(mut self, domain: &str) -> Self {
        self.domain = domain.to_string();
        self
    }

    pub fn response_code(mut self, code: &str) -> Self {
        self.response_code = code.to_string();
        self
    }

    pub fn upstream(mut self, name: &str) -> Self {
        self.upstream_server = name.to_string();
        self
    }

    pub fn with_a_answer(mut self, ip: [u8; 4]) -> Self {
        let data = AnswerData::A(Ipv4Addr::from(ip));
        self.answers
            .push(AnswerEntry::new(self.domain.clone(), "A", 300, &data));
        self
    }

    pub fn build(self) -> QueryLog {
        QueryLog {
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            client_ip: self.client_ip,
            domain: self.domain,
            query_type: self.query_type,
            response_code: self.response_code,
            answer_count: self.answers.len(),
            answers: self.answers,
            duration_ms: self.duration_ms,
            upstream_server: self.upstream_server,
        }
    }
}

impl Default for QueryLogBuilder {
    fn default() -> Self {
        Self::new()
    }
}
