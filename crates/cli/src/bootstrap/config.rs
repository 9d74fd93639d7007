use doh_relay_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides)?;
    Ok(config)
}

/// Runs after logging is initialized so trust-policy warnings are visible.
pub fn validate_config(config: &Config) -> anyhow::Result<()> {
    config.validate()?;

    info!(listen = %config.server.listen, "Listen address");
    for (position, server) in config.doh.servers.iter().enumerate() {
        info!(position, name = %server.name, url = %server.url, "DoH server");
    }
    info!(
        timeout_secs = config.doh.timeout,
        http2 = config.doh.use_http2,
        "DoH client settings"
    );
    Ok(())
}
