use thiserror::Error;

use crate::cart::CartError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Merchant not found: {0}")]
    MerchantNotFound(String),

    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
