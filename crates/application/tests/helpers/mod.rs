pub mod messages;
pub mod mock_ports;

pub use messages::*;
pub use mock_ports::*;
