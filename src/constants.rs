/// Default bind address of the catalog server.
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default port of the catalog server.
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Log filter used by the interactive CLI when `RUST_LOG` is unset.
pub const DEFAULT_CLI_LOG_FILTER: &str = "warn";

/// Log filter used by the catalog server when `RUST_LOG` is unset.
pub const DEFAULT_SERVER_LOG_FILTER: &str = "info";

/// Largest quantity accepted by the quantity prompt.
pub const MAX_LINE_QUANTITY: u32 = 99;

/// Default file name for exported receipts.
pub const DEFAULT_RECEIPT_PATH: &str = "receipt.csv";
