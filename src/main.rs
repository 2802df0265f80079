//! http-reflector
//!
//! Answers HTTP requests by describing them back to the caller, and simulates
//! server behaviors (status codes, redirects, cookies, delays, streaming,
//! compression) for exercising HTTP clients.
//!
//! # Architecture Overview
//!
//! ```text
//!                              ┌──────────────────────────────────────────────┐
//!                              │                 REFLECTOR                     │
//!     Client Request           │  ┌─────────┐    ┌─────────┐    ┌─────────┐   │
//!     ─────────────────────────┼─▶│   net   │───▶│  http   │───▶│ routing │   │
//!                              │  │listener │    │ server  │    │  table  │   │
//!                              │  └─────────┘    └─────────┘    └────┬────┘   │
//!                              │                                     │        │
//!                              │                     ┌───────────────┴──┐     │
//!                              │                     ▼                  ▼     │
//!                              │              ┌────────────┐    ┌──────────┐  │
//!                              │              │  reflect   │    │ simulate │  │
//!                              │              │ (facets)   │    │          │  │
//!                              │              └─────┬──────┘    └────┬─────┘  │
//!     Client Response          │                    ▼                │        │
//!     ◀────────────────────────┼──────────── delivery ◀──────────────┘        │
//!                              │      (buffered / gzip / streamed)            │
//!                              └──────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use http_reflector::config::{self, LogFormat, ReflectorConfig};
use http_reflector::lifecycle::{signals, Shutdown};
use http_reflector::observability::{logging, metrics};
use http_reflector::{net, HttpServer};

#[derive(Parser)]
#[command(name = "http-reflector")]
#[command(about = "HTTP request reflection and behavior simulation service", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,

    /// Override `observability.log_format`.
    #[arg(long, value_parser = parse_log_format)]
    log_format: Option<LogFormat>,
}

fn parse_log_format(value: &str) -> Result<LogFormat, String> {
    match value {
        "pretty" => Ok(LogFormat::Pretty),
        "json" => Ok(LogFormat::Json),
        other => Err(format!("unknown log format `{}` (expected pretty or json)", other)),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => ReflectorConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    if let Some(format) = cli.log_format {
        config.observability.log_format = format;
    }
    config::validate_config(&config).map_err(config::ConfigError::Validation)?;

    logging::init_logging(&config.observability);

    tracing::info!("http-reflector v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        max_delay_secs = config.simulation.max_delay_secs,
        max_stream_objects = ?config.simulation.max_stream_objects,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        if let Err(e) = metrics::init_metrics(addr) {
            tracing::error!(error = %e, "Startup failed");
            return Err(e.into());
        }
    }

    let listener = match net::bind(&config.listener).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            return Err(e.into());
        }
    };

    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(&shutdown);

    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
