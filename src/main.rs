//! Fixture server binary.
//!
//! # Endpoints (defaults)
//!
//! ```text
//! ANY  /echo, /echoPutFile.php   → request body echoed back unchanged
//! POST /upload, /postFile.php    → multipart `ufile` stored in uploads/,
//!                                  HTML status fragment returned
//! GET  /healthz                  → "ok"
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use fixture_server::config::load_config_or_default;
use fixture_server::lifecycle::signals;
use fixture_server::observability::{logging, metrics};
use fixture_server::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "fixture-server")]
#[command(about = "HTTP echo and upload fixtures for client test suites", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when it does not exist.
    #[arg(short, long, default_value = "fixture-server.toml")]
    config: PathBuf,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_config_or_default(&cli.config)?;
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind.to_string();
    }

    logging::init(&config.observability)?;

    tracing::info!("fixture-server v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config = %cli.config.display(),
        bind_address = %config.listener.bind_address,
        upload_dir = %config.upload.directory,
        echo_chunk_size = config.echo.chunk_size,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    if !std::path::Path::new(&config.upload.directory).is_dir() {
        tracing::warn!(
            upload_dir = %config.upload.directory,
            "Upload directory does not exist; uploads will fail until it is created"
        );
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let mut server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    tokio::select! {
        result = &mut server_task => {
            // Server exited on its own, e.g. the listener failed.
            result??;
            return Ok(());
        }
        _ = signals::shutdown_requested() => {}
    }

    shutdown.trigger();
    server_task.await??;

    tracing::info!("Shutdown complete");
    Ok(())
}
