//! HTTP service exposing the merchant catalog as JSON.

mod routes;

pub use routes::{get_merchant, list_merchants, root, router, SharedCatalog};

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use crate::catalog::MerchantCatalog;

/// Bind `addr` and serve the catalog until the process is stopped.
pub async fn serve(catalog: MerchantCatalog, addr: SocketAddr) -> std::io::Result<()> {
    let merchants = catalog.len();
    let app = router(Arc::new(catalog));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, merchants, "catalog server listening");
    axum::serve(listener, app).await
}
