pub mod builders;
pub mod certs;
pub mod mock_forwarder;
pub mod mock_transport;

pub use builders::*;
pub use certs::*;
pub use mock_forwarder::*;
pub use mock_transport::*;
