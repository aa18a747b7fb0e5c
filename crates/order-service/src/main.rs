//! Main entry point for the QR order confirmation service.
//!
//! Wires the in-memory order store, the QR encoder and the order
//! service together and serves the HTTP API until interrupted.

use clap::Parser;
use order_config::Config;
use order_core::OrderService;
use order_storage::implementations::memory::MemoryOrderStore;
use qr_encoder::QrEncoder;
use std::path::PathBuf;
use std::sync::Arc;

mod openapi;
mod server;

/// Command-line arguments for the service.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "config.toml")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,
}

/// Main entry point.
///
/// This function:
/// 1. Parses command-line arguments
/// 2. Initializes logging infrastructure
/// 3. Loads configuration (defaults when no file is present)
/// 4. Builds the order service with its store and encoder
/// 5. Serves the HTTP API until interrupted
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	let default_directive = args.log_level.to_string();
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

	fmt().with_env_filter(env_filter).with_target(true).init();

	let config = Config::load(&args.config).await?;
	tracing::info!(
		"Loaded configuration (public URL {})",
		config.api.public_url()
	);

	let store = Arc::new(MemoryOrderStore::new());
	let encoder = QrEncoder::new(config.qr.clone());
	let orders = Arc::new(OrderService::new(store, encoder, config.api.public_url()));

	server::start_server(&config.api, orders).await?;

	Ok(())
}
