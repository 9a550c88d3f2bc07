//! fretdate-api - Instrument serial number decoder service
//!
//! Runs the HTTP/JSON service (default) or decodes a single serial from the
//! command line.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use fretdate_api::config::{CliOverrides, ServiceConfig};
use fretdate_api::report::{format_detection, format_info};
use fretdate_api::{build_router, AppState};
use fretdate_common::{decode, detect_brand, Brand};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "fretdate-api", version, about = "Decode instrument serial numbers into manufacture dates")]
struct Cli {
    /// Config file (overrides FRETDATE_CONFIG and the default location)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP service (default)
    Serve {
        /// Listen address, e.g. 127.0.0.1:5790
        #[arg(long)]
        bind: Option<SocketAddr>,

        /// Maximum items per batch request
        #[arg(long)]
        max_batch: Option<usize>,
    },
    /// Decode one serial number
    Decode {
        serial: String,

        /// Brand id or name; detected from the serial when omitted
        #[arg(long, short)]
        brand: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Guess the brand from the serial's shape
    Detect {
        serial: String,

        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Serve {
        bind: None,
        max_batch: None,
    });

    match command {
        Command::Serve { bind, max_batch } => {
            let overrides = CliOverrides {
                bind,
                max_batch,
                config: cli.config,
            };
            serve(overrides).await
        }
        Command::Decode { serial, brand, json } => {
            init_tracing("warn");
            run_decode(&serial, brand.as_deref(), json)
        }
        Command::Detect { serial, json } => {
            init_tracing("warn");
            let detection = detect_brand(&serial);
            if json {
                println!("{}", serde_json::to_string_pretty(&detection)?);
            } else {
                print!("{}", format_detection(&detection));
            }
            Ok(())
        }
    }
}

/// Install the fmt subscriber; `RUST_LOG` wins over `default_level`
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Build identification immediately after tracing init
    info!(
        "Starting fretdate-api v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
}

async fn serve(overrides: CliOverrides) -> Result<()> {
    let resolved = ServiceConfig::resolve(&overrides);
    init_tracing(&resolved.config.log_level);

    for warning in &resolved.warnings {
        warn!("{}", warning);
    }
    if let Some(path) = &resolved.source {
        info!("Config file: {}", path.display());
    }

    let config = resolved.config;
    let addr = config.bind_addr;
    info!("Batch limit: {} items", config.max_batch);

    let app = build_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("fretdate-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn run_decode(serial: &str, brand: Option<&str>, json: bool) -> Result<()> {
    let brand: Brand = match brand {
        Some(id) => id.parse()?,
        None => {
            let detection = detect_brand(serial);
            match detection.brand() {
                Some(brand) => brand,
                None => bail!("{}", format_detection(&detection).trim_end()),
            }
        }
    };

    let info = decode(brand, serial)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        print!("{}", format_info(&info));
    }
    Ok(())
}
