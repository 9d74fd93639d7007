pub mod forwarding;
pub mod server;
pub mod transport;

pub use forwarding::DohForwarder;
pub use server::{DnsServer, DnsServerHandler};
