use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Record data of one answer, reduced to what the transaction log renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerData {
    A(Ipv4Addr),
    Aaaa(Ipv6Addr),
    Cname(String),
    Mx { preference: u16, exchange: String },
    Txt(Vec<String>),
    Ns(String),
    Ptr(String),
    Soa { mname: String, rname: String },
    /// Any other record kind, in presentation form
    Other(String),
}

impl AnswerData {
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AnswerData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A(addr) => write!(f, "{}", addr),
            Self::Aaaa(addr) => write!(f, "{}", addr),
            Self::Cname(target) | Self::Ns(target) | Self::Ptr(target) => f.write_str(target),
            Self::Mx {
                preference,
                exchange,
            } => write!(f, "{} (priority: {})", exchange, preference),
            Self::Txt(parts) => write!(f, "[{}]", parts.join(" ")),
            Self::Soa { mname, rname } => write!(f, "ns: {}, mbox: {}", mname, rname),
            Self::Other(text) => f.write_str(text),
        }
    }
}

/// One answer record as it appears in a transaction record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub ttl: u32,
    pub value: String,
}

impl AnswerEntry {
    pub fn new(
        name: impl Into<String>,
        record_type: impl Into<String>,
        ttl: u32,
        data: &AnswerData,
    ) -> Self {
        Self {
            name: name.into(),
            record_type: record_type.into(),
            ttl,
            value: data.render(),
        }
    }
}
