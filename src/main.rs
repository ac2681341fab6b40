use clap::Parser;
use tokio::net::TcpListener;

use electricitymap_web::config::{resolve_config, Cli};
use electricitymap_web::http::status::CLIENT_VERSION;
use electricitymap_web::lifecycle::{build_state, Shutdown};
use electricitymap_web::observability::{logging, metrics};
use electricitymap_web::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    logging::init(&config.observability);
    tracing::info!(version = CLIENT_VERSION, "electricitymap-web starting");
    tracing::info!(
        bind_address = %config.listener.bind_address(),
        production = config.assets.production,
        static_path = %config.assets.static_path.display(),
        basic_auth = config.security.credentials().is_some(),
        "Configuration loaded"
    );

    if let Some(address) = &config.observability.metrics_address {
        match address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics endpoint");
                }
            }
            Err(e) => {
                tracing::error!(metrics_address = %address, error = %e, "Failed to parse metrics address");
            }
        }
    }

    let state = build_state(&config)?;

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    shutdown.trigger_on_signal();

    HttpServer::new(config, state)
        .run(listener, server_shutdown)
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
