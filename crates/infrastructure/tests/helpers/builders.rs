#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use doh_relay_domain::{AnswerData, AnswerEntry, QueryLog};
use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{Name, RData, Record, RecordType};
use std::net::Ipv4Addr;
use std::str::FromStr;

pub fn query_message(id: u16, domain: &str, record_type: RecordType) -> Message {
    let mut message = Message::new();
    message
        .set_id(id)
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(true);
    message.add_query(Query::query(Name::from_str(domain).unwrap(), record_type));
    message
}

pub fn a_response(id: u16, domain: &str, ip: Ipv4Addr) -> Message {
    let mut message = query_message(id, domain, RecordType::A);
    message
        .set_message_type(MessageType::Response)
        .set_recursion_available(true)
        .set_response_code(ResponseCode::NoError);
    message.add_answer(Record::from_rdata(
        Name::from_str(domain).unwrap(),
        300,
        RData::A(A(ip)),
    ));
    message
}

pub fn a_response_bytes(domain: &str, ip: Ipv4Addr) -> Vec<u8> {
    a_response(0, domain, ip).to_vec().unwrap()
}

pub struct QueryLogBuilder {
    entry: QueryLog,
}

impl QueryLogBuilder {
    pub fn new(domain: &str) -> Self {
        Self {
            entry: QueryLog {
                timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
                client_ip: "127.0.0.1:40000".to_string(),
                domain: domain.to_string(),
                query_type: "A".to_string(),
                response_code: "NOERROR".to_string(),
                answer_count: 0,
                answers: Vec::new(),
                duration_ms: 12,
                upstream_server: "Cloudflare".to_string(),
            },
        }
    }

    pub fn answer(mut self, ip: Ipv4Addr) -> Self {
        let name = self.entry.domain.clone();
        self.entry
            .answers
            .push(AnswerEntry::new(name, "A", 300, &AnswerData::A(ip)));
        self.entry.answer_count = self.entry.answers.len();
        self
    }

    pub fn failed(mut self) -> Self {
        self.entry.response_code = "SERVFAIL".to_string();
        self.entry.answers.clear();
        self.entry.answer_count = 0;
        self.entry.upstream_server.clear();
        self
    }

    pub fn build(self) -> QueryLog {
        self.entry
    }
}
