use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Storefront: browse merchants and menus, and build a single-merchant order.
#[derive(Parser, Debug)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to a merchant catalog JSON file (defaults to the built-in catalog).
    #[arg(short, long)]
    pub catalog: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Default)]
pub enum Command {
    /// List all merchants.
    Merchants,

    /// Show the menu of a merchant.
    Menu {
        /// Merchant id or (approximate) name.
        merchant: String,
    },

    /// Start an interactive shopping session.
    #[default]
    Shop,
}
