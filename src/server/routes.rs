use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::catalog::MerchantCatalog;
use crate::models::Merchant;

pub type SharedCatalog = Arc<MerchantCatalog>;

/// Routes of the catalog service.
pub fn router(catalog: SharedCatalog) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/merchants", get(list_merchants))
        .route("/merchants/:id", get(get_merchant))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(catalog)
}

pub async fn root() -> &'static str {
    "Storefront catalog is up"
}

/// All merchants, without menus and working hours.
pub async fn list_merchants(State(catalog): State<SharedCatalog>) -> Json<Vec<Merchant>> {
    Json(catalog.merchant_summaries())
}

/// One merchant with its full menu.
pub async fn get_merchant(
    State(catalog): State<SharedCatalog>,
    Path(id): Path<String>,
) -> Result<Json<Merchant>, (StatusCode, &'static str)> {
    match catalog.merchant(&id) {
        Some(merchant) => Ok(Json(merchant.clone())),
        None => {
            debug!(%id, "merchant lookup missed");
            Err((StatusCode::NOT_FOUND, "Merchant not found"))
        }
    }
}
