use hickory_proto::op::{Message, MessageType, ResponseCode};

/// Builds the messages sent back to UDP clients
pub struct ResponseBuilder;

impl ResponseBuilder {
    /// Reply carrying only `code`, echoing the request's ID, flags and questions.
    pub fn reply(request: &Message, code: ResponseCode) -> Message {
        let mut response = Message::new();
        response
            .set_id(request.id())
            .set_message_type(MessageType::Response)
            .set_op_code(request.op_code())
            .set_recursion_desired(request.recursion_desired())
            .set_recursion_available(true)
            .set_checking_disabled(request.checking_disabled())
            .set_response_code(code);
        response.add_queries(request.queries().iter().cloned());
        response
    }

    /// The upstream answer as-is, re-stamped with the client's transaction ID.
    pub fn relay(request: &Message, mut upstream: Message) -> Message {
        upstream.set_id(request.id());
        upstream
    }

    pub fn status(code: ResponseCode) -> &'static str {
        match code {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::FormErr => "FORMERR",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::YXDomain => "YXDOMAIN",
            ResponseCode::YXRRSet => "YXRRSET",
            ResponseCode::NXRRSet => "NXRRSET",
            ResponseCode::NotAuth => "NOTAUTH",
            ResponseCode::NotZone => "NOTZONE",
            _ => "UNKNOWN",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hickory_proto::op::{OpCode, Query};
    use hickory_proto::rr::{Name, RecordType};
    use std::str::FromStr;

    fn query_message(id: u16) -> Message {
        let mut message = Message::new();
        message
            .set_id(id)
            .set_message_type(MessageType::Query)
            .set_op_code(OpCode::Query)
            .set_recursion_desired(true);
        message.add_query(Query::query(
            Name::from_str("example.com.").unwrap(),
            RecordType::A,
        ));
        message
    }

    #[test]
    fn test_reply_echoes_id_and_question() {
        let request = query_message(0x1234);
        let response = ResponseBuilder::reply(&request, ResponseCode::ServFail);

        assert_eq!(response.id(), 0x1234);
        assert_eq!(response.message_type(), MessageType::Response);
        assert_eq!(response.response_code(), ResponseCode::ServFail);
        assert_eq!(response.queries(), request.queries());
        assert!(response.recursion_desired());
        assert!(response.answers().is_empty());
    }

    #[test]
    fn test_relay_restamps_id() {
        let request = query_message(7);
        let mut upstream = query_message(0);
        upstream.set_message_type(MessageType::Response);

        let response = ResponseBuilder::relay(&request, upstream);
        assert_eq!(response.id(), 7);
    }

    #[test]
    fn test_status_names() {
        assert_eq!(ResponseBuilder::status(ResponseCode::NoError), "NOERROR");
        assert_eq!(ResponseBuilder::status(ResponseCode::NXDomain), "NXDOMAIN");
        assert_eq!(ResponseBuilder::status(ResponseCode::ServFail), "SERVFAIL");
    }
}
