use crate::cart::{format_money, CartLine, CartState};
use crate::models::{Item, ItemOption, Merchant, MerchantKind, OptionKind};

/// Display merchants in a formatted table.
pub fn display_merchants(merchants: &[Merchant]) {
    if merchants.is_empty() {
        println!("No merchants available.");
        return;
    }

    println!();
    println!("=== Merchants ({}) ===", merchants.len());
    println!();

    let max_name_len = merchants.iter().map(|m| m.name.len()).max().unwrap_or(10);

    for (i, merchant) in merchants.iter().enumerate() {
        let kind = match merchant.kind {
            MerchantKind::Restaurant => "restaurant",
            MerchantKind::Supermarket => "supermarket",
        };
        let status = if merchant.is_open { "" } else { "  [closed]" };

        println!(
            "{:>3}. {:<width$}  {:<20} {:>3} min  fee {:>6}  {:.1}* ({}){}",
            i + 1,
            merchant.name,
            format!("{} ({})", merchant.category, kind),
            merchant.delivery_time,
            format_money(merchant.delivery_fee),
            merchant.stars(),
            merchant.rating_count,
            status,
            width = max_name_len
        );
    }

    println!();
}

fn describe_option(option: &ItemOption) -> String {
    match option.kind {
        OptionKind::Boolean => format!("{} (+{})", option.name, format_money(option.price)),
        OptionKind::SingleSelection | OptionKind::MultipleSelection => {
            let entries: Vec<String> = option
                .entries
                .iter()
                .map(|e| format!("{} +{}", e.name, format_money(e.price)))
                .collect();
            let how = if option.kind == OptionKind::SingleSelection {
                "one of"
            } else {
                "any of"
            };
            format!("{}: {} {}", option.name, how, entries.join(", "))
        }
    }
}

/// One line of a menu listing, used by both the table and the item picker.
pub fn describe_item(item: &Item) -> String {
    let availability = if item.is_available { "" } else { " [unavailable]" };
    format!("{} - {}{}", item.name, format_money(item.price), availability)
}

/// Display a merchant header and its full menu.
pub fn display_menu(merchant: &Merchant) {
    println!();
    println!("=== {} ===", merchant.name);
    println!(
        "{} | {} | delivery {} min, fee {} | minimum order {}",
        merchant.category,
        merchant.phone_number,
        merchant.delivery_time,
        format_money(merchant.delivery_fee),
        format_money(merchant.minimum_order)
    );
    println!(
        "{}, {}, {} {}",
        merchant.address.address_line1,
        merchant.address.city,
        merchant.address.state,
        merchant.address.zip
    );

    for category in &merchant.menu {
        println!();
        match &category.description {
            Some(description) => println!("--- {} ({}) ---", category.name, description),
            None => println!("--- {} ---", category.name),
        }

        for item in &category.items {
            println!("  {}", describe_item(item));
            for option in item.available_options() {
                println!("      {}", describe_option(option));
            }
        }
    }

    println!();
}

/// Short description of a cart line for pickers.
pub fn describe_line(line: &CartLine) -> String {
    format!(
        "{}x {} - {}",
        line.quantity,
        line.item.name,
        format_money(line.subtotal)
    )
}

/// Display the cart contents and totals.
pub fn display_cart(state: &CartState) {
    println!();

    if let Some(error) = &state.error {
        println!("! {}", error);
        println!();
    }

    if state.is_empty() {
        println!("Your cart is empty.");
        println!();
        return;
    }

    println!(
        "=== Cart - {} ===",
        state.merchant_name.as_deref().unwrap_or("unknown merchant")
    );
    println!();

    for (i, line) in state.lines.iter().enumerate() {
        println!("{:>3}. {}", i + 1, describe_line(line));
        for (label, price) in &line.readable_options {
            println!("       + {} ({})", label, format_money(*price));
        }
        if !line.observation.is_empty() {
            println!("       note: {}", line.observation);
        }
    }

    println!();
    println!("--- Summary ---");
    println!("Items: {}", state.total_items);
    println!("Subtotal: {}", format_money(state.total_price));
    println!("Delivery fee: {}", format_money(state.merchant_delivery_fee));
    if let Some(minutes) = state.merchant_delivery_time {
        println!("Estimated delivery: {} min", minutes);
    }
    println!("Total: {}", format_money(state.grand_total()));
    println!();
}
