//! rateshelf Server Binary
//!
//! Starts the TCP server for the product catalog.

use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use rateshelf::network::Server;
use rateshelf::{Catalog, Config};
use tracing_subscriber::{fmt, EnvFilter};

/// rateshelf Server
#[derive(Parser, Debug)]
#[command(name = "rateshelf-server")]
#[command(about = "Concurrent product catalog with reviews and ratings")]
#[command(version)]
struct Args {
    /// Root directory (data/, reports/ and temp/ live under it)
    #[arg(short, long, default_value = "./rateshelf_data")]
    root: String,

    /// Listen address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:7979")]
    listen: String,

    /// Number of connection worker threads
    #[arg(short, long, default_value = "8")]
    workers: usize,

    /// Default language tag for report rendering
    #[arg(long, default_value = "en-US")]
    locale: String,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,rateshelf=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("rateshelf Server v{}", rateshelf::VERSION);
    tracing::info!("Root directory: {}", args.root);
    tracing::info!("Listen address: {}", args.listen);

    // Build config from args
    let root = Path::new(&args.root);
    let config = Config::builder()
        .data_dir(root.join("data"))
        .reports_dir(root.join("reports"))
        .temp_dir(root.join("temp"))
        .listen_addr(args.listen.clone())
        .worker_threads(args.workers)
        .language_tag(args.locale.clone())
        .build();

    // Open catalog
    let catalog = match Catalog::open(config.clone()) {
        Ok(c) => Arc::new(c),
        Err(e) => {
            tracing::error!("Failed to open catalog: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!(
        "Catalog initialized with {} products",
        catalog.product_count()
    );

    // Bind and run (blocks until shutdown)
    let server = match Server::bind(config, catalog) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to bind listener: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run() {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Server stopped");
}
