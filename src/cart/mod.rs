pub mod engine;
pub mod error;
pub mod pricing;
pub mod receipt;
pub mod selection;

pub use engine::{CartEngine, CartLine, CartState, LineId, MerchantInfo};
pub use error::CartError;
pub use pricing::{format_money, options_contribution, readable_options, subtotal, ReadableOptions};
pub use receipt::{write_receipt, write_receipt_file};
pub use selection::{validate_selections, Selection, SelectionState};
