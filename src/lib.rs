pub mod cart;
pub mod catalog;
pub mod cli;
pub mod constants;
pub mod error;
pub mod interface;
pub mod models;
pub mod server;
pub mod telemetry;

pub use cart::{CartEngine, CartError, CartState};
pub use catalog::MerchantCatalog;
pub use error::{Result, StoreError};
