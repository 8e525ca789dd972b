use std::collections::BTreeMap;

use crate::cart::selection::{Selection, SelectionState};
use crate::models::Item;

/// Display label of a chosen option or entry mapped to its price.
pub type ReadableOptions = BTreeMap<String, i64>;

/// Price added on top of the item base price by the chosen options.
///
/// Boolean options contribute the option price when selected, single
/// selections the chosen entry price, multiple selections the sum of their
/// entries. `None` if the sum does not fit in an `i64`.
pub fn options_contribution(item: &Item, selections: &SelectionState) -> Option<i64> {
    selections.iter().try_fold(0i64, |total, (option_id, selection)| {
        let price = match selection {
            Selection::Boolean(true) => item.option(*option_id).map(|o| o.price).unwrap_or(0),
            Selection::Boolean(false) => 0,
            Selection::Single(entry) => entry.as_ref().map(|e| e.price).unwrap_or(0),
            Selection::Multiple(entries) => {
                entries.iter().try_fold(0i64, |sum, e| sum.checked_add(e.price))?
            }
        };
        total.checked_add(price)
    })
}

/// Line subtotal: (item price + options contribution) * quantity.
///
/// Returns `None` on overflow.
pub fn subtotal(item: &Item, quantity: u32, selections: &SelectionState) -> Option<i64> {
    item.price
        .checked_add(options_contribution(item, selections)?)?
        .checked_mul(i64::from(quantity))
}

/// Human-readable breakdown of the chosen options.
pub fn readable_options(item: &Item, selections: &SelectionState) -> ReadableOptions {
    let mut readable = ReadableOptions::new();

    for (option_id, selection) in selections {
        match selection {
            Selection::Boolean(true) => {
                if let Some(option) = item.option(*option_id) {
                    readable.insert(option.name.clone(), option.price);
                }
            }
            Selection::Boolean(false) => {}
            Selection::Single(Some(entry)) => {
                readable.insert(entry.name.clone(), entry.price);
            }
            Selection::Single(None) => {}
            Selection::Multiple(entries) => {
                for entry in entries {
                    *readable.entry(entry.name.clone()).or_insert(0) += entry.price;
                }
            }
        }
    }

    readable
}

/// Format cents as dollars, e.g. 1295 -> "$12.95".
pub fn format_money(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    format!("{}${}.{:02}", sign, cents / 100, cents % 100)
}
