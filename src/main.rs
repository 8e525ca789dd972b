use clap::Parser;
use std::path::Path;
use tracing::debug;

use storefront_rs::cart::{write_receipt_file, CartEngine, MerchantInfo};
use storefront_rs::catalog::MerchantCatalog;
use storefront_rs::cli::{Cli, Command};
use storefront_rs::constants::{DEFAULT_CLI_LOG_FILTER, DEFAULT_RECEIPT_PATH};
use storefront_rs::error::Result;
use storefront_rs::interface::{
    display_cart, display_menu, display_merchants, prompt_item, prompt_line, prompt_merchant,
    prompt_observation, prompt_quantity, prompt_selections, prompt_shop_action, prompt_text,
    prompt_yes_no, ShopAction,
};
use storefront_rs::models::{Item, Merchant};
use storefront_rs::telemetry::setup_tracing;

fn main() {
    setup_tracing(DEFAULT_CLI_LOG_FILTER);

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let catalog = MerchantCatalog::from_path_or_fixture(cli.catalog.as_deref())?;

    match cli.command.unwrap_or_default() {
        Command::Merchants => {
            display_merchants(&catalog.merchant_summaries());
            Ok(())
        }
        Command::Menu { merchant } => {
            display_menu(catalog.resolve_merchant(&merchant)?);
            Ok(())
        }
        Command::Shop => cmd_shop(&catalog),
    }
}

/// Interactive shopping session over one cart.
fn cmd_shop(catalog: &MerchantCatalog) -> Result<()> {
    let mut engine = CartEngine::new();
    engine.subscribe(|state| {
        debug!(
            lines = state.lines.len(),
            total_items = state.total_items,
            total_price = state.total_price,
            "cart changed"
        );
    });

    println!("Loaded {} merchants", catalog.len());

    loop {
        match prompt_shop_action(engine.state())? {
            ShopAction::Browse => browse(catalog, &mut engine)?,
            ShopAction::ViewCart => {
                engine.open_cart();
                display_cart(engine.state());
                engine.close_cart();
            }
            ShopAction::EditLine => edit_line(&mut engine)?,
            ShopAction::RemoveLine => {
                if let Some(line_id) = prompt_line(engine.state())? {
                    engine.remove_item(line_id);
                    println!("Removed.");
                }
            }
            ShopAction::ClearCart => {
                if prompt_yes_no("Remove everything from your cart?", false)? {
                    engine.clear_cart();
                    println!("Cart cleared.");
                }
            }
            ShopAction::ExportReceipt => export_receipt(&engine)?,
            ShopAction::Quit => break,
        }
    }

    Ok(())
}

/// Pick a merchant and add items from its menu until the user goes back.
fn browse(catalog: &MerchantCatalog, engine: &mut CartEngine) -> Result<()> {
    let merchant = prompt_merchant(catalog)?;
    display_menu(merchant);

    if !merchant.is_open {
        println!("{} is closed right now.", merchant.name);
        return Ok(());
    }

    while let Some(item) = prompt_item(merchant)? {
        add_to_cart(engine, merchant, item)?;
    }

    Ok(())
}

fn add_to_cart(engine: &mut CartEngine, merchant: &Merchant, item: &Item) -> Result<()> {
    let selections = prompt_selections(item, None)?;
    let quantity = prompt_quantity(1, false)?;
    let observation = prompt_observation("")?;
    let info = MerchantInfo::from(merchant);

    match engine.add_item(item, &info, quantity, selections.clone(), observation.clone()) {
        Ok(_) => {
            display_cart(engine.state());
            engine.close_cart();
        }
        Err(e) if e.is_different_merchant() => {
            println!("{}", e);
            if prompt_yes_no("Clear your cart and add this item instead?", false)? {
                engine.clear_cart();
                engine.add_item(item, &info, quantity, selections, observation)?;
                display_cart(engine.state());
                engine.close_cart();
            } else {
                engine.clear_error();
            }
        }
        Err(e) => {
            println!("{}", e);
            engine.clear_error();
        }
    }

    Ok(())
}

fn edit_line(engine: &mut CartEngine) -> Result<()> {
    let Some(line_id) = prompt_line(engine.state())? else {
        return Ok(());
    };
    let Some(line) = engine.state().line(line_id).cloned() else {
        return Ok(());
    };

    let selections = prompt_selections(&line.item, Some(&line.selections))?;
    println!("Set the quantity to 0 to remove the line.");
    let quantity = prompt_quantity(line.quantity, true)?;
    let observation = prompt_observation(&line.observation)?;

    if let Err(e) = engine.update_item(line_id, quantity, selections, observation) {
        println!("{}", e);
        engine.clear_error();
    }

    display_cart(engine.state());
    Ok(())
}

fn export_receipt(engine: &CartEngine) -> Result<()> {
    if engine.state().is_empty() {
        println!("Your cart is empty; nothing to export.");
        return Ok(());
    }

    let path = prompt_text("Receipt file", DEFAULT_RECEIPT_PATH)?;
    write_receipt_file(engine.state(), Path::new(&path))?;
    println!("Receipt written to {}", path);
    Ok(())
}
