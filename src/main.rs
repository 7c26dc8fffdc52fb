use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use receipt_points::api::{build_router, AppState};
use receipt_points::ReceiptProcessor;

const EXIT_CONFIG: i32 = 4;
const EXIT_SERVER: i32 = 5;

#[derive(Parser, Debug)]
#[command(name = "receipt-points")]
#[command(about = "Scores purchase receipts and serves the points by id", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging (per-rule scoring detail)
    #[arg(short, long)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/receipt-points/config.yaml)
    #[arg(short, long)]
    config: Option<String>,

    /// Address to bind, overrides server.host
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on, overrides server.port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load config; logging is not up yet so errors go straight to stderr
    let config_path = cli.config.map(PathBuf::from);
    let mut config = match receipt_points::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // CLI flags win over the file
    if cli.host.is_some() {
        config.server.host = cli.host;
    }
    if cli.port.is_some() {
        config.server.port = cli.port;
    }
    if cli.verbose {
        config.log_level = Some("debug".to_string());
    }

    if let Err(errors) = receipt_points::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    // RUST_LOG takes precedence over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting receipt-points v{}", env!("CARGO_PKG_VERSION"));

    let processor = Arc::new(ReceiptProcessor::default());
    let app = build_router(AppState::new(processor));

    let address = config.bind_address();
    let listener = match tokio::net::TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", address, e);
            std::process::exit(EXIT_SERVER);
        }
    };
    info!("Receipt processor listening on http://{}", address);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(EXIT_SERVER);
    }
}
