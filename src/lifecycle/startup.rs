//! Startup orchestration.
//!
//! # Responsibilities
//! - Load `.env`, initialize logging, build and validate configuration
//! - Start the optional metrics exporter
//! - Bind the listener and serve until a termination signal
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener starts last (traffic only when ready)

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;

use crate::config::{loader, LogFormat, Overrides};
use crate::error::StartupError;
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::{logging, metrics};

/// Command-line options. Relay settings themselves come from the environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "conf-relay")]
#[command(about = "Relay a remote configuration document with local section overlays", long_about = None)]
pub struct Cli {
    /// Dotenv file loaded before reading the environment.
    #[arg(long, default_value = ".env")]
    pub env_file: PathBuf,

    /// Address to bind; the port comes from PORT.
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Abort the upstream fetch after this many seconds.
    #[arg(long)]
    pub upstream_timeout_secs: Option<u64>,

    /// Serve Prometheus metrics on this address.
    #[arg(long)]
    pub metrics_address: Option<SocketAddr>,

    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            host: self.host.clone(),
            upstream_timeout: self.upstream_timeout_secs.map(Duration::from_secs),
            metrics_address: self.metrics_address,
            log_format: self.log_format,
        }
    }
}

/// Start the relay and block until shutdown.
pub async fn run(cli: Cli) -> Result<(), StartupError> {
    let env_loaded = loader::load_env_file(&cli.env_file)?;
    logging::init_logging(cli.log_format)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        env_file = %cli.env_file.display(),
        env_loaded,
        "conf-relay starting"
    );

    let config = loader::from_env(cli.overrides())?;

    tracing::info!(
        bind_address = %config.listener.bind_address(),
        upstream = %config.upstream.url,
        default_file = %config.default_file.display(),
        https = config.https,
        "Configuration loaded"
    );

    if let Some(addr) = config.observability.metrics_address {
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    let server = HttpServer::new(config)?;

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    signals::spawn_signal_handler(shutdown);

    server.run(listener, rx).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
