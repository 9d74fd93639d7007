use crate::ports::{DnsForwarder, QueryLogSink};
use crate::services::{summarize_answers, ResponseBuilder};
use chrono::Utc;
use doh_relay_domain::QueryLog;
use hickory_proto::op::{Message, ResponseCode};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Turns one client query into exactly one reply and, when the query carried
/// a question, exactly one query record.
pub struct HandleDnsQueryUseCase {
    forwarder: Arc<dyn DnsForwarder>,
    query_log: Arc<dyn QueryLogSink>,
}

impl HandleDnsQueryUseCase {
    pub fn new(forwarder: Arc<dyn DnsForwarder>, query_log: Arc<dyn QueryLogSink>) -> Self {
        Self {
            forwarder,
            query_log,
        }
    }

    pub async fn execute(&self, request: &Message, client: SocketAddr) -> Message {
        let timestamp = Utc::now();
        let start = Instant::now();

        let Some(question) = request.queries().first() else {
            debug!(client = %client, id = request.id(), "Query without question");
            return ResponseBuilder::reply(request, ResponseCode::FormErr);
        };

        let domain = question.name().to_string();
        let query_type = question.query_type().to_string();
        debug!(domain = %domain, record_type = %query_type, client = %client, "DNS query received");

        match self.forwarder.resolve(request).await {
            Ok(forwarded) => {
                let response = ResponseBuilder::relay(request, forwarded.message);
                let answers = summarize_answers(response.answers());

                for answer in &answers {
                    debug!(
                        name = %answer.name,
                        record_type = %answer.record_type,
                        ttl = answer.ttl,
                        value = %answer.value,
                        "Answer record"
                    );
                }

                let entry = QueryLog {
                    timestamp,
                    client_ip: client.to_string(),
                    domain,
                    query_type,
                    response_code: ResponseBuilder::status(response.response_code()).to_string(),
                    answer_count: response.answers().len(),
                    answers,
                    duration_ms: start.elapsed().as_millis() as u64,
                    upstream_server: forwarded.server_name.to_string(),
                };
                self.record(entry).await;

                response
            }
            Err(e) => {
                warn!(error = %e, domain = %domain, "DoH query failed");

                let entry = QueryLog {
                    timestamp,
                    client_ip: client.to_string(),
                    domain,
                    query_type,
                    response_code: ResponseBuilder::status(ResponseCode::ServFail).to_string(),
                    answer_count: 0,
                    answers: Vec::new(),
                    duration_ms: start.elapsed().as_millis() as u64,
                    upstream_server: String::new(),
                };
                self.record(entry).await;

                ResponseBuilder::reply(request, ResponseCode::ServFail)
            }
        }
    }

    async fn record(&self, entry: QueryLog) {
        let domain = entry.domain.clone();
        if let Err(e) = self.query_log.log(entry).await {
            warn!(error = %e, domain = %domain, "Failed to log query");
        }
    }
}
