mod loader;
mod service;

pub use loader::{fixture_merchants, load_merchants, parse_merchants};
pub use service::MerchantCatalog;
