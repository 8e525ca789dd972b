use std::io;
use std::path::Path;

use crate::cart::pricing::format_money;
use crate::cart::{CartLine, CartState};
use crate::error::Result;

const HEADER: [&str; 6] = ["line", "item", "quantity", "options", "observation", "subtotal"];

fn describe_options(line: &CartLine) -> String {
    line.readable_options
        .iter()
        .map(|(label, price)| format!("{} (+{})", label, format_money(*price)))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Write the cart as a CSV order summary: one row per line, then the
/// delivery fee and the grand total.
pub fn write_receipt<W: io::Write>(state: &CartState, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(HEADER)?;

    for line in &state.lines {
        wtr.write_record([
            line.id.to_string(),
            line.item.name.clone(),
            line.quantity.to_string(),
            describe_options(line),
            line.observation.clone(),
            format_money(line.subtotal),
        ])?;
    }

    let fee = if state.is_empty() { 0 } else { state.merchant_delivery_fee };
    wtr.write_record(["", "Delivery fee", "", "", "", format_money(fee).as_str()])?;
    wtr.write_record([
        "",
        "Total",
        state.total_items.to_string().as_str(),
        "",
        "",
        format_money(state.grand_total()).as_str(),
    ])?;

    wtr.flush()?;
    Ok(())
}

/// Write the receipt to a file, replacing it if present.
pub fn write_receipt_file(state: &CartState, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_receipt(state, file)
}
