//! Gateway Server Entry Point
//!
//! Initializes logging, loads configuration, builds the toolset, and runs
//! the configured transport. An interrupt signal drops the transport (and
//! with it any held backend clients) and exits cleanly.

use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use gateway_mcp_server::core::{Config, GatewayServer, TransportService};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let config = Config::from_env();

    // Initialize logging
    init_logging(&config.logging.level);

    info!("Starting {} v{}", config.server.name, config.server.version);

    // Build the server; a duplicate tool name aborts startup here.
    let server = GatewayServer::new(config.clone())?;

    info!(
        "Server initialized with {} tools in catalog",
        server.dispatcher().catalog().len()
    );

    // Run the transport until the client disconnects or we are interrupted.
    let transport = TransportService::new(config.transport);
    tokio::select! {
        result = transport.run(server) => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupt received, releasing backend resources");
        }
    }

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Configures tracing with the specified log level, writing to stderr so
/// stdout stays free for the protocol stream.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
