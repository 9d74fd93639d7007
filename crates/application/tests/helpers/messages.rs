#![allow(dead_code)]

use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::rdata::{A, CNAME};
use hickory_proto::rr::{Name, RData, Record, RecordType};
use std::net::Ipv4Addr;
use std::str::FromStr;

pub fn query(id: u16, domain: &str, record_type: RecordType) -> Message {
    let mut message = Message::new();
    message
        .set_id(id)
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(true);
    message.add_query(Query::query(Name::from_str(domain).unwrap(), record_type));
    message
}

pub fn empty_query(id: u16) -> Message {
    let mut message = Message::new();
    message
        .set_id(id)
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query);
    message
}

/// Upstream-style response with an ID unrelated to the client's.
pub fn a_response(domain: &str, ips: &[Ipv4Addr]) -> Message {
    let mut message = query(0, domain, RecordType::A);
    message
        .set_message_type(MessageType::Response)
        .set_recursion_available(true)
        .set_response_code(ResponseCode::NoError);
    for ip in ips {
        message.add_answer(Record::from_rdata(
            Name::from_str(domain).unwrap(),
            300,
            RData::A(A(*ip)),
        ));
    }
    message
}

pub fn cname_response(domain: &str, target: &str, ip: Ipv4Addr) -> Message {
    let mut message = query(0, domain, RecordType::A);
    message
        .set_message_type(MessageType::Response)
        .set_response_code(ResponseCode::NoError);
    message.add_answer(Record::from_rdata(
        Name::from_str(domain).unwrap(),
        60,
        RData::CNAME(CNAME(Name::from_str(target).unwrap())),
    ));
    message.add_answer(Record::from_rdata(
        Name::from_str(target).unwrap(),
        300,
        RData::A(A(ip)),
    ));
    message
}

pub fn nxdomain_response(domain: &str) -> Message {
    let mut message = query(0, domain, RecordType::A);
    message
        .set_message_type(MessageType::Response)
        .set_response_code(ResponseCode::NXDomain);
    message
}
