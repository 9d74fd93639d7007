mod config;
mod logging;
mod signal;

pub use config::{load_config, validate_config};
pub use logging::init_logging;
pub use signal::shutdown_signal;
