use doh_relay_application::ports::{DnsForwarder, QueryLogSink};
use doh_relay_application::use_cases::HandleDnsQueryUseCase;
use doh_relay_domain::Config;
use doh_relay_infrastructure::dns::{DnsServer, DnsServerHandler, DohForwarder};
use doh_relay_infrastructure::query_log::create_query_log;
use std::sync::Arc;
use tracing::{info, warn};

pub struct DnsServices {
    pub query_log: Arc<dyn QueryLogSink>,
    pub forwarder: Arc<dyn DnsForwarder>,
    pub server: Arc<DnsServer>,
}

impl DnsServices {
    /// Builds the sink, the forwarder and the bound listener, in that order.
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        info!("Initializing DoH relay services");

        let query_log = create_query_log(&config.logging.query_log).await?;

        let forwarder: Arc<dyn DnsForwarder> =
            Arc::new(DohForwarder::from_config(&config.doh, &config.trust_policy())?);

        let use_case = Arc::new(HandleDnsQueryUseCase::new(
            Arc::clone(&forwarder),
            Arc::clone(&query_log),
        ));

        let server = Arc::new(DnsServer::bind(
            config.listen_addr()?,
            DnsServerHandler::new(use_case),
        )?);

        Ok(Self {
            query_log,
            forwarder,
            server,
        })
    }

    /// Stops the listener, then releases upstream connections, then closes the sink.
    pub async fn shutdown(&self) {
        self.server.shutdown().await;
        self.forwarder.shutdown();
        if let Err(e) = self.query_log.close().await {
            warn!(error = %e, "Failed to close query log");
        }
    }
}
