use clap::Parser;
use doh_relay_domain::CliOverrides;
use std::sync::Arc;
use tracing::info;

mod bootstrap;
mod di;

#[derive(Parser)]
#[command(name = "doh-relay")]
#[command(version)]
#[command(about = "UDP DNS to DNS-over-HTTPS relay")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// UDP listen address, e.g. 127.0.0.1:5353
    #[arg(short = 'l', long)]
    listen: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        listen: cli.listen.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting DoH relay v{}", env!("CARGO_PKG_VERSION"));

    bootstrap::validate_config(&config)?;

    let services = di::DnsServices::new(&config).await?;

    let server = Arc::clone(&services.server);
    let mut server_task = tokio::spawn(async move { server.run().await });

    tokio::select! {
        _ = bootstrap::shutdown_signal() => {
            info!("Shutting down");
        }
        result = &mut server_task => {
            result?;
        }
    }

    services.shutdown().await;
    if !server_task.is_finished() {
        server_task.await?;
    }

    info!("Server shutdown complete");
    Ok(())
}
