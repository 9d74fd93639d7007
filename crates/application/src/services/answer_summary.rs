use doh_relay_domain::{AnswerData, AnswerEntry};
use hickory_proto::rr::{RData, Record};

pub fn answer_data(rdata: &RData) -> AnswerData {
    match rdata {
        RData::A(a) => AnswerData::A(a.0),
        RData::AAAA(aaaa) => AnswerData::Aaaa(aaaa.0),
        RData::CNAME(cname) => AnswerData::Cname(cname.0.to_string()),
        RData::MX(mx) => AnswerData::Mx {
            preference: mx.preference(),
            exchange: mx.exchange().to_string(),
        },
        RData::TXT(txt) => AnswerData::Txt(
            txt.txt_data()
                .iter()
                .map(|part| String::from_utf8_lossy(part).into_owned())
                .collect(),
        ),
        RData::NS(ns) => AnswerData::Ns(ns.0.to_string()),
        RData::PTR(ptr) => AnswerData::Ptr(ptr.0.to_string()),
        RData::SOA(soa) => AnswerData::Soa {
            mname: soa.mname().to_string(),
            rname: soa.rname().to_string(),
        },
        other => AnswerData::Other(other.to_string()),
    }
}

pub fn summarize_answers(records: &[Record]) -> Vec<AnswerEntry> {
    records
        .iter()
        .map(|record| {
            AnswerEntry::new(
                record.name().to_string(),
                record.record_type().to_string(),
                record.ttl(),
                &answer_data(record.data()),
            )
        })
        .collect()
}
