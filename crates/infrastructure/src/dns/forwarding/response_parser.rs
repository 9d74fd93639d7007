use doh_relay_domain::DomainError;
use hickory_proto::op::{Message, MessageType};
use tracing::debug;

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8]) -> Result<Message, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsMessage(format!("Failed to parse DNS response: {}", e))
        })?;

        if message.message_type() != MessageType::Response {
            return Err(DomainError::InvalidDnsMessage(
                "upstream returned a query instead of a response".to_string(),
            ));
        }

        debug!(
            rcode = ?message.response_code(),
            answers = message.answers().len(),
            truncated = message.truncated(),
            authority = message.name_servers().len(),
            "DNS response parsed"
        );

        Ok(message)
    }
}
