use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;

use storefront_rs::catalog::MerchantCatalog;
use storefront_rs::constants::{DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, DEFAULT_SERVER_LOG_FILTER};
use storefront_rs::server;
use storefront_rs::telemetry::setup_tracing;

#[derive(Parser, Debug)]
#[command(name = "catalog_server")]
#[command(about = "Serve the merchant catalog as JSON over HTTP")]
struct Args {
    /// Address to bind
    #[arg(long, default_value = DEFAULT_SERVER_HOST)]
    host: IpAddr,

    /// Port to listen on
    #[arg(long, default_value_t = DEFAULT_SERVER_PORT)]
    port: u16,

    /// Path to a merchant catalog JSON file (defaults to the built-in catalog)
    #[arg(long)]
    catalog: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    setup_tracing(DEFAULT_SERVER_LOG_FILTER);
    let args = Args::parse();

    let catalog = match MerchantCatalog::from_path_or_fixture(args.catalog.as_deref()) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Error loading catalog: {}", e);
            std::process::exit(1);
        }
    };

    let addr = SocketAddr::new(args.host, args.port);
    if let Err(e) = server::serve(catalog, addr).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
