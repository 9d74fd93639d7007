//! Wire-format encoding for relayed messages

use doh_relay_domain::DomainError;
use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};

/// DNS header length in bytes
pub const HEADER_LEN: usize = 12;

pub struct MessageBuilder;

impl MessageBuilder {
    /// Serialize a Message to wire format bytes
    pub fn serialize(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            DomainError::MessageEncoding(format!("Failed to serialize DNS message: {}", e))
        })?;

        Ok(buf)
    }

    /// FORMERR reply for a datagram that failed to parse.
    ///
    /// Only the header is trusted: the ID and RD bit are echoed, nothing else.
    /// Returns `None` when the datagram is shorter than a header.
    pub fn format_error(raw: &[u8]) -> Option<Vec<u8>> {
        if raw.len() < HEADER_LEN {
            return None;
        }

        let id = u16::from_be_bytes([raw[0], raw[1]]);
        // Byte 2: QR(1) + Opcode(4) + AA(1) + TC(1) + RD(1)
        let recursion_desired = raw[2] & 0x01 == 0x01;

        let mut message = Message::new();
        message
            .set_id(id)
            .set_message_type(MessageType::Response)
            .set_op_code(OpCode::Query)
            .set_recursion_desired(recursion_desired)
            .set_recursion_available(true)
            .set_response_code(ResponseCode::FormErr);

        Self::serialize(&message).ok()
    }
}
