//! Local gateway emulator for routed serverless handlers.
//!
//! # Architecture Overview
//!
//! ```text
//!   HTTP client ──▶ axum (request id, trace, timeout)
//!                      │
//!                      ▼
//!               HTTP request → gateway event
//!                      │
//!   JSON event ────────┤   (`invoke`)
//!                      ▼
//!               ┌──────────────────────────────┐
//!               │ Dispatcher                   │
//!               │  OPTIONS shortcut            │
//!               │  method table / ANY fallback │
//!               │  path matcher → handler      │
//!               └──────────────┬───────────────┘
//!                              ▼
//!               normalized {statusCode, body, headers}
//!                              │
//!   HTTP response ◀────────────┴──────────▶ JSON envelope (`invoke`)
//! ```

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use gateway_router::config::{load_config, validate_config, ConfigError, RouterConfig};
use gateway_router::demo;
use gateway_router::http::{invoke_event, LocalServer};
use gateway_router::lifecycle::Shutdown;
use gateway_router::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "gateway-router")]
#[command(about = "Route gateway events to handler functions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the sample routes over HTTP the way the gateway would
    Serve {
        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override `listener.bind_address`
        #[arg(short, long)]
        bind: Option<String>,

        /// Answer every OPTIONS request with a CORS preflight response
        #[arg(long)]
        catch_all_options: bool,
    },
    /// Dispatch a single gateway event and print the response envelope
    Invoke {
        /// JSON event file; stdin when omitted
        #[arg(short, long)]
        event: Option<PathBuf>,

        /// Answer every OPTIONS request with a CORS preflight response
        #[arg(long)]
        catch_all_options: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            config,
            bind,
            catch_all_options,
        } => serve(config, bind, catch_all_options).await,
        Commands::Invoke {
            event,
            catch_all_options,
        } => invoke(event, catch_all_options).await,
    }
}

async fn serve(
    config_path: Option<PathBuf>,
    bind: Option<String>,
    catch_all_options: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &config_path {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };
    if let Some(bind) = bind {
        config.listener.bind_address = bind;
    }
    config.dispatch.catch_all_options |= catch_all_options;
    validate_config(&config).map_err(ConfigError::Validation)?;

    logging::init_logging(&config.observability)?;
    tracing::info!("gateway-router v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        catch_all_options = config.dispatch.catch_all_options,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address.parse()?)?;
    }

    let dispatcher = Arc::new(demo::routes(config.dispatch.catch_all_options)?);
    for method in dispatcher.methods() {
        if let Some(matcher) = dispatcher.matcher(method) {
            tracing::debug!(method = %method, patterns = ?matcher.patterns(), "Route table");
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    shutdown.trigger_on_signal();

    LocalServer::new(dispatcher, &config)
        .run(listener, server_shutdown)
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn invoke(
    event_path: Option<PathBuf>,
    catch_all_options: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging(&RouterConfig::default().observability)?;

    let event = match event_path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let dispatcher = demo::routes(catch_all_options)?;
    println!("{}", invoke_event(&dispatcher, &event).await?);
    Ok(())
}
