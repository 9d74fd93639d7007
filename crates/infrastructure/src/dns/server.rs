use crate::dns::forwarding::MessageBuilder;
use doh_relay_application::use_cases::HandleDnsQueryUseCase;
use doh_relay_domain::DomainError;
use hickory_proto::op::{Message, MessageType};
use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, error, info, warn};

const RECV_BUFFER_SIZE: usize = 4096;
const SOCKET_BUFFER_SIZE: usize = 512 * 1024;

/// Decodes datagrams, runs the relay use case and encodes replies
pub struct DnsServerHandler {
    use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleDnsQueryUseCase>) -> Self {
        Self { use_case }
    }

    /// Reply bytes for one datagram, `None` when nothing should be sent back.
    pub async fn handle_datagram(&self, datagram: &[u8], client: SocketAddr) -> Option<Vec<u8>> {
        let request = match Message::from_vec(datagram) {
            Ok(message) => message,
            Err(e) => {
                debug!(client = %client, len = datagram.len(), error = %e, "Failed to parse DNS query");
                return MessageBuilder::format_error(datagram);
            }
        };

        if request.message_type() != MessageType::Query {
            debug!(client = %client, id = request.id(), "Ignoring DNS response sent to listener");
            return None;
        }

        let response = self.use_case.execute(&request, client).await;

        match MessageBuilder::serialize(&response) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                error!(error = %e, client = %client, "Failed to encode DNS response");
                None
            }
        }
    }
}

/// UDP listener running one task per inbound datagram
pub struct DnsServer {
    socket: Arc<UdpSocket>,
    handler: Arc<DnsServerHandler>,
    local_addr: SocketAddr,
    cancel: CancellationToken,
    tracker: TaskTracker,
}

impl DnsServer {
    /// Binds the listener. Must be called from within a tokio runtime.
    pub fn bind(addr: SocketAddr, handler: DnsServerHandler) -> Result<Self, DomainError> {
        let bind_error = |e: std::io::Error| DomainError::Bind {
            addr: addr.to_string(),
            reason: e.to_string(),
        };

        let socket = create_udp_socket(addr).map_err(bind_error)?;
        let socket = UdpSocket::from_std(socket).map_err(bind_error)?;
        let local_addr = socket.local_addr().map_err(bind_error)?;

        info!(bind_address = %local_addr, "UDP DNS server listening");

        Ok(Self {
            socket: Arc::new(socket),
            handler: Arc::new(handler),
            local_addr,
            cancel: CancellationToken::new(),
            tracker: TaskTracker::new(),
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Receives until `shutdown` is called. Receive errors are logged and
    /// never end the loop.
    pub async fn run(&self) {
        let mut recv_buf = [0u8; RECV_BUFFER_SIZE];

        loop {
            let received = tokio::select! {
                _ = self.cancel.cancelled() => break,
                result = self.socket.recv_from(&mut recv_buf) => result,
            };

            match received {
                Ok((len, from)) => {
                    let datagram: Arc<[u8]> = Arc::from(&recv_buf[..len]);
                    let handler = Arc::clone(&self.handler);
                    let socket = Arc::clone(&self.socket);

                    self.tracker.spawn(async move {
                        let Some(response) = handler.handle_datagram(&datagram, from).await else {
                            return;
                        };
                        if let Err(e) = socket.send_to(&response, from).await {
                            warn!(client = %from, error = %e, "Failed to send DNS response");
                        }
                    });
                }
                Err(e) => {
                    warn!(error = %e, "UDP recv error");
                }
            }
        }

        debug!("UDP receive loop stopped");
    }

    /// Stops accepting datagrams and waits for in-flight queries to finish.
    pub async fn shutdown(&self) {
        self.cancel.cancel();
        self.tracker.close();
        self.tracker.wait().await;
        info!("UDP DNS server stopped");
    }
}

fn create_udp_socket(addr: SocketAddr) -> std::io::Result<std::net::UdpSocket> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_recv_buffer_size(SOCKET_BUFFER_SIZE)?;
    socket.set_send_buffer_size(SOCKET_BUFFER_SIZE)?;
    socket.bind(&addr.into())?;
    socket.set_nonblocking(true)?;
    Ok(socket.into())
}
