use dialoguer::{Confirm, Input, MultiSelect, Select};

use crate::cart::{format_money, CartState, LineId, Selection, SelectionState};
use crate::catalog::MerchantCatalog;
use crate::constants::MAX_LINE_QUANTITY;
use crate::error::{Result, StoreError};
use crate::interface::render::{describe_item, describe_line};
use crate::models::{Item, ItemOption, Merchant, OptionKind};

/// Top-level actions of an interactive shopping session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopAction {
    Browse,
    ViewCart,
    EditLine,
    RemoveLine,
    ClearCart,
    ExportReceipt,
    Quit,
}

impl ShopAction {
    const ALL: [ShopAction; 7] = [
        ShopAction::Browse,
        ShopAction::ViewCart,
        ShopAction::EditLine,
        ShopAction::RemoveLine,
        ShopAction::ClearCart,
        ShopAction::ExportReceipt,
        ShopAction::Quit,
    ];

    fn label(self) -> &'static str {
        match self {
            ShopAction::Browse => "Browse a merchant",
            ShopAction::ViewCart => "View cart",
            ShopAction::EditLine => "Edit a cart line",
            ShopAction::RemoveLine => "Remove a cart line",
            ShopAction::ClearCart => "Clear cart",
            ShopAction::ExportReceipt => "Export receipt (CSV)",
            ShopAction::Quit => "Quit",
        }
    }
}

/// Prompt for the next session action.
pub fn prompt_shop_action(state: &CartState) -> Result<ShopAction> {
    let labels: Vec<&str> = ShopAction::ALL.iter().map(|a| a.label()).collect();

    let selection = Select::new()
        .with_prompt(format!(
            "Cart: {} item(s), {}",
            state.total_items,
            format_money(state.total_price)
        ))
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(ShopAction::ALL[selection])
}

/// Prompt for a merchant from the catalog.
pub fn prompt_merchant(catalog: &MerchantCatalog) -> Result<&Merchant> {
    if catalog.is_empty() {
        return Err(StoreError::InvalidInput("catalog has no merchants".to_string()));
    }

    let names: Vec<String> = catalog
        .all_merchants()
        .iter()
        .map(|m| format!("{} ({})", m.name, m.category))
        .collect();

    let selection = Select::new()
        .with_prompt("Which merchant?")
        .items(&names)
        .default(0)
        .interact()?;

    Ok(&catalog.all_merchants()[selection])
}

/// Prompt for an available item of a merchant, or `None` to go back.
pub fn prompt_item(merchant: &Merchant) -> Result<Option<&Item>> {
    let items: Vec<&Item> = merchant.items().filter(|i| i.is_available).collect();
    if items.is_empty() {
        println!("{} has nothing available right now.", merchant.name);
        return Ok(None);
    }

    let mut labels: Vec<String> = items.iter().map(|i| describe_item(i)).collect();
    labels.push("Back".to_string());

    let selection = Select::new()
        .with_prompt("Which item?")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(items.get(selection).copied())
}

fn prompt_option(option: &ItemOption, current: Option<&Selection>) -> Result<Selection> {
    match option.kind {
        OptionKind::Boolean => {
            let default = matches!(current, Some(Selection::Boolean(true)));
            let selected = Confirm::new()
                .with_prompt(format!("{} (+{})?", option.name, format_money(option.price)))
                .default(default)
                .interact()?;
            Ok(Selection::Boolean(selected))
        }
        OptionKind::SingleSelection => {
            let mut labels = vec!["None".to_string()];
            labels.extend(
                option
                    .entries
                    .iter()
                    .map(|e| format!("{} (+{})", e.name, format_money(e.price))),
            );

            let default = match current {
                Some(Selection::Single(Some(chosen))) => option
                    .entries
                    .iter()
                    .position(|e| e.id == chosen.id)
                    .map(|i| i + 1)
                    .unwrap_or(0),
                _ => 0,
            };

            let selection = Select::new()
                .with_prompt(option.name.as_str())
                .items(&labels)
                .default(default)
                .interact()?;

            Ok(Selection::Single(
                selection.checked_sub(1).and_then(|i| option.entries.get(i)).cloned(),
            ))
        }
        OptionKind::MultipleSelection => {
            let labels: Vec<String> = option
                .entries
                .iter()
                .map(|e| format!("{} (+{})", e.name, format_money(e.price)))
                .collect();

            let defaults: Vec<bool> = option
                .entries
                .iter()
                .map(|e| match current {
                    Some(Selection::Multiple(chosen)) => chosen.iter().any(|c| c.id == e.id),
                    _ => false,
                })
                .collect();

            let chosen = MultiSelect::new()
                .with_prompt(format!("{} (space to toggle)", option.name))
                .items(&labels)
                .defaults(&defaults)
                .interact()?;

            Ok(Selection::multiple(
                chosen.into_iter().filter_map(|i| option.entries.get(i).cloned()),
            ))
        }
    }
}

/// Prompt for every available option of `item`, starting from `current`.
pub fn prompt_selections(item: &Item, current: Option<&SelectionState>) -> Result<SelectionState> {
    let mut selections = SelectionState::new();

    for option in item.available_options() {
        let previous = current.and_then(|c| c.get(&option.id));
        let selection = prompt_option(option, previous)?;
        selections.insert(option.id, selection);
    }

    Ok(selections)
}

/// Prompt for a quantity. Zero is accepted only when `allow_zero` is set.
pub fn prompt_quantity(default: u32, allow_zero: bool) -> Result<u32> {
    let input: String = Input::new()
        .with_prompt("Quantity")
        .default(default.to_string())
        .interact_text()?;

    let quantity: u32 = input
        .trim()
        .parse()
        .map_err(|_| StoreError::InvalidInput("Invalid number".to_string()))?;

    let min = if allow_zero { 0 } else { 1 };
    if quantity < min || quantity > MAX_LINE_QUANTITY {
        return Err(StoreError::InvalidInput(format!(
            "Quantity must be between {} and {}",
            min, MAX_LINE_QUANTITY
        )));
    }

    Ok(quantity)
}

/// Prompt for a free-text note.
pub fn prompt_observation(default: &str) -> Result<String> {
    let input: String = Input::new()
        .with_prompt("Any observation? (e.g. no onions)")
        .default(default.to_string())
        .allow_empty(true)
        .interact_text()?;

    Ok(input.trim().to_string())
}

/// Prompt for one of the cart lines, or `None` when the cart is empty.
pub fn prompt_line(state: &CartState) -> Result<Option<LineId>> {
    if state.is_empty() {
        println!("Your cart is empty.");
        return Ok(None);
    }

    let labels: Vec<String> = state.lines.iter().map(describe_line).collect();

    let selection = Select::new()
        .with_prompt("Which line?")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(state.lines.get(selection).map(|l| l.id))
}

/// Prompt for free text with a default value.
pub fn prompt_text(prompt: &str, default: &str) -> Result<String> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?;

    Ok(input.trim().to_string())
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
