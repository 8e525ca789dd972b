use tracing::{debug, warn};

use crate::cart::pricing::{self, ReadableOptions};
use crate::cart::selection::{SelectionState, validate_selections};
use crate::cart::CartError;
use crate::constants::MAX_LINE_QUANTITY;
use crate::models::{Item, Merchant};

/// Identifier of a cart line, unique and increasing within one engine.
pub type LineId = u64;

/// One "add to cart" action: item, quantity, chosen options and a note.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub id: LineId,
    pub item: Item,
    /// Always >= 1 while the line exists.
    pub quantity: u32,
    pub selections: SelectionState,
    pub observation: String,
    /// Cached, recomputed on every change to the line.
    pub readable_options: ReadableOptions,
    /// Cached, recomputed on every change to the line.
    pub subtotal: i64,
}

/// Everything the presentation layer renders about the cart.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CartState {
    /// Lines in insertion order.
    pub lines: Vec<CartLine>,
    pub is_open: bool,
    pub total_items: u32,
    pub total_price: i64,
    pub merchant_delivery_fee: i64,
    pub merchant_id: Option<String>,
    pub merchant_name: Option<String>,
    pub merchant_category: Option<String>,
    pub merchant_delivery_time: Option<u32>,
    pub error: Option<CartError>,
}

impl CartState {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, id: LineId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    /// Item total plus delivery fee; zero for an empty cart.
    pub fn grand_total(&self) -> i64 {
        if self.lines.is_empty() {
            0
        } else {
            self.total_price.saturating_add(self.merchant_delivery_fee)
        }
    }
}

/// Merchant details passed along with an item being added.
///
/// Only `id` and `name` are required; the rest update the cart only when set.
#[derive(Debug, Clone, Default)]
pub struct MerchantInfo {
    pub id: String,
    pub name: String,
    pub delivery_fee: Option<i64>,
    pub category: Option<String>,
    pub delivery_time: Option<u32>,
}

impl MerchantInfo {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }
}

impl From<&Merchant> for MerchantInfo {
    fn from(merchant: &Merchant) -> Self {
        Self {
            id: merchant.id.clone(),
            name: merchant.name.clone(),
            delivery_fee: Some(merchant.delivery_fee),
            category: Some(merchant.category.clone()),
            delivery_time: Some(merchant.delivery_time),
        }
    }
}

type Listener = Box<dyn FnMut(&CartState)>;

/// Sole owner of the cart state.
///
/// Enforces that a non-empty cart holds items of a single merchant and keeps
/// line subtotals and aggregate totals in sync with every mutation.
/// Subscribers are called with the new state after each operation completes.
pub struct CartEngine {
    state: CartState,
    next_line_id: LineId,
    listeners: Vec<Listener>,
}

impl Default for CartEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CartEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartEngine")
            .field("state", &self.state)
            .field("next_line_id", &self.next_line_id)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl CartEngine {
    /// Create an engine holding an empty, closed cart.
    pub fn new() -> Self {
        Self {
            state: CartState::default(),
            next_line_id: 1,
            listeners: Vec::new(),
        }
    }

    /// Current cart state.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> CartState {
        self.state.clone()
    }

    /// Register a callback run after every completed operation.
    pub fn subscribe(&mut self, listener: impl FnMut(&CartState) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Append a new line for `item`.
    ///
    /// The first line locks the cart to `merchant`. Adding from another
    /// merchant while lines exist fails with [`CartError::DifferentMerchant`]
    /// and changes nothing except the recorded error. Identical items are never
    /// merged: each call produces its own line.
    pub fn add_item(
        &mut self,
        item: &Item,
        merchant: &MerchantInfo,
        quantity: u32,
        selections: SelectionState,
        observation: impl Into<String>,
    ) -> Result<LineId, CartError> {
        if let Err(e) = self.check_add(item, merchant, quantity, &selections) {
            return Err(self.fail(e));
        }

        let id = self.next_line_id;
        let staged =
            build_line(id, item, quantity, selections, observation.into()).and_then(|line| {
                let totals = totals(self.state.lines.iter().chain(std::iter::once(&line)))?;
                Ok((line, totals))
            });
        let (line, (total_items, total_price)) = match staged {
            Ok(staged) => staged,
            Err(e) => return Err(self.fail(e)),
        };

        if self.state.lines.is_empty() {
            self.state.merchant_id = Some(merchant.id.clone());
            self.state.merchant_name = Some(merchant.name.clone());
            if merchant.category.is_some() {
                self.state.merchant_category = merchant.category.clone();
            }
            if merchant.delivery_time.is_some() {
                self.state.merchant_delivery_time = merchant.delivery_time;
            }
        }

        debug!(
            line_id = id,
            item = %item.name,
            quantity,
            subtotal = line.subtotal,
            "added line to cart"
        );

        self.next_line_id += 1;
        self.state.lines.push(line);
        if let Some(fee) = merchant.delivery_fee {
            self.state.merchant_delivery_fee = fee;
        }
        self.state.total_items = total_items;
        self.state.total_price = total_price;
        self.state.error = None;
        self.state.is_open = true;
        self.notify();
        Ok(id)
    }

    /// Replace quantity, selections and observation of a line, keeping its id
    /// and position.
    ///
    /// A quantity of zero removes the line. Unknown ids are ignored.
    pub fn update_item(
        &mut self,
        line_id: LineId,
        quantity: u32,
        selections: SelectionState,
        observation: impl Into<String>,
    ) -> Result<(), CartError> {
        if quantity == 0 {
            self.remove_item(line_id);
            return Ok(());
        }

        let Some(index) = self.state.lines.iter().position(|l| l.id == line_id) else {
            debug!(line_id, "update of unknown line ignored");
            return Ok(());
        };

        let current = &self.state.lines[index];
        let staged = check_quantity(quantity)
            .and_then(|_| validate_selections(&current.item, &selections))
            .and_then(|_| {
                build_line(line_id, &current.item, quantity, selections, observation.into())
            })
            .and_then(|line| {
                let lines = self.state.lines.iter().enumerate();
                let totals = totals(lines.map(|(i, l)| if i == index { &line } else { l }))?;
                Ok((line, totals))
            });
        let (line, (total_items, total_price)) = match staged {
            Ok(staged) => staged,
            Err(e) => return Err(self.fail(e)),
        };
        debug!(line_id, quantity, subtotal = line.subtotal, "updated cart line");

        self.state.lines[index] = line;
        self.state.total_items = total_items;
        self.state.total_price = total_price;
        self.state.error = None;
        self.notify();
        Ok(())
    }

    /// Remove a line. Unknown ids are ignored.
    ///
    /// Emptying the cart this way keeps the merchant fields; only
    /// [`clear_cart`](Self::clear_cart) resets them. The next add into an
    /// empty cart takes the lock over, but category, delivery time and fee
    /// stay stale unless that add supplies them.
    pub fn remove_item(&mut self, line_id: LineId) {
        let before = self.state.lines.len();
        self.state.lines.retain(|l| l.id != line_id);
        if self.state.lines.len() == before {
            debug!(line_id, "removal of unknown line ignored");
            return;
        }

        debug!(line_id, remaining = self.state.lines.len(), "removed cart line");
        self.state.error = None;
        // Removing lines only shrinks the sums.
        if let Ok((total_items, total_price)) = totals(self.state.lines.iter()) {
            self.state.total_items = total_items;
            self.state.total_price = total_price;
        }
        self.notify();
    }

    /// Drop every line and the merchant lock. The open flag is left alone.
    pub fn clear_cart(&mut self) {
        self.state = CartState {
            is_open: self.state.is_open,
            ..CartState::default()
        };
        debug!("cleared cart");
        self.notify();
    }

    pub fn open_cart(&mut self) {
        self.state.is_open = true;
        self.notify();
    }

    pub fn close_cart(&mut self) {
        self.state.is_open = false;
        self.notify();
    }

    pub fn toggle_cart(&mut self) {
        self.state.is_open = !self.state.is_open;
        self.notify();
    }

    pub fn clear_error(&mut self) {
        self.state.error = None;
        self.notify();
    }

    fn check_add(
        &self,
        item: &Item,
        merchant: &MerchantInfo,
        quantity: u32,
        selections: &SelectionState,
    ) -> Result<(), CartError> {
        check_quantity(quantity)?;

        if !self.state.lines.is_empty()
            && self.state.merchant_id.as_deref() != Some(merchant.id.as_str())
        {
            let current = self
                .state
                .merchant_name
                .clone()
                .or_else(|| self.state.merchant_id.clone())
                .unwrap_or_default();
            return Err(CartError::DifferentMerchant {
                current,
                requested: merchant.name.clone(),
            });
        }

        validate_selections(item, selections)
    }

    /// Record a rejected mutation and hand the error back to the caller.
    fn fail(&mut self, error: CartError) -> CartError {
        warn!(%error, "cart mutation rejected");
        self.state.error = Some(error.clone());
        self.notify();
        error
    }

    fn notify(&mut self) {
        for listener in &mut self.listeners {
            listener(&self.state);
        }
    }
}

fn check_quantity(quantity: u32) -> Result<(), CartError> {
    if quantity == 0 || quantity > MAX_LINE_QUANTITY {
        return Err(CartError::Unknown(format!(
            "quantity must be between 1 and {}",
            MAX_LINE_QUANTITY
        )));
    }
    Ok(())
}

/// Price a line without touching the cart.
fn build_line(
    id: LineId,
    item: &Item,
    quantity: u32,
    selections: SelectionState,
    observation: String,
) -> Result<CartLine, CartError> {
    let subtotal = pricing::subtotal(item, quantity, &selections)
        .ok_or_else(|| CartError::Unknown(format!("price of {} is out of range", item.name)))?;

    Ok(CartLine {
        id,
        item: item.clone(),
        quantity,
        readable_options: pricing::readable_options(item, &selections),
        subtotal,
        selections,
        observation,
    })
}

/// Sum of quantities and subtotals, failing instead of overflowing.
fn totals<'a>(mut lines: impl Iterator<Item = &'a CartLine>) -> Result<(u32, i64), CartError> {
    lines
        .try_fold((0u32, 0i64), |(items, price), line| {
            Some((
                items.checked_add(line.quantity)?,
                price.checked_add(line.subtotal)?,
            ))
        })
        .ok_or_else(|| CartError::Unknown("cart total is out of range".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn item(id: &str, price: i64) -> Item {
        Item {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            price,
            image_url: String::new(),
            options: vec![],
            is_available: true,
        }
    }

    #[test]
    fn test_line_ids_increase() {
        let mut engine = CartEngine::new();
        let merchant = MerchantInfo::new("m1", "Merchant One");
        let a = engine.add_item(&item("a", 100), &merchant, 1, SelectionState::new(), "").unwrap();
        let b = engine.add_item(&item("a", 100), &merchant, 1, SelectionState::new(), "").unwrap();
        assert!(b > a);
        assert_eq!(engine.state().lines.len(), 2);
    }

    #[test]
    fn test_zero_quantity_add_rejected() {
        let mut engine = CartEngine::new();
        let merchant = MerchantInfo::new("m1", "Merchant One");
        let err = engine
            .add_item(&item("a", 100), &merchant, 0, SelectionState::new(), "")
            .unwrap_err();
        assert!(matches!(err, CartError::Unknown(_)));
        assert!(engine.state().is_empty());
        assert!(engine.state().merchant_id.is_none());
        assert_eq!(engine.state().error, Some(err));
    }

    #[test]
    fn test_successful_add_clears_error() {
        let mut engine = CartEngine::new();
        let m1 = MerchantInfo::new("m1", "One");
        let m2 = MerchantInfo::new("m2", "Two");
        engine.add_item(&item("a", 100), &m1, 1, SelectionState::new(), "").unwrap();
        assert!(engine.add_item(&item("b", 100), &m2, 1, SelectionState::new(), "").is_err());
        assert!(engine.state().error.is_some());

        engine.add_item(&item("c", 100), &m1, 1, SelectionState::new(), "").unwrap();
        assert!(engine.state().error.is_none());
    }

    #[test]
    fn test_visibility_flags() {
        let mut engine = CartEngine::new();
        assert!(!engine.state().is_open);
        engine.toggle_cart();
        assert!(engine.state().is_open);
        engine.close_cart();
        assert!(!engine.state().is_open);
        engine.open_cart();
        assert!(engine.state().is_open);
    }

    #[test]
    fn test_subscribers_see_every_operation() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut engine = CartEngine::new();
        let sink = Rc::clone(&seen);
        engine.subscribe(move |state| sink.borrow_mut().push(state.total_items));

        let merchant = MerchantInfo::new("m1", "One");
        let id = engine.add_item(&item("a", 100), &merchant, 2, SelectionState::new(), "").unwrap();
        engine.update_item(id, 3, SelectionState::new(), "").unwrap();
        engine.clear_cart();

        assert_eq!(*seen.borrow(), vec![2, 3, 0]);
    }

    #[test]
    fn test_remove_keeps_merchant_until_next_add() {
        let mut engine = CartEngine::new();
        let m1 = MerchantInfo::new("m1", "One");
        let id = engine.add_item(&item("a", 100), &m1, 1, SelectionState::new(), "").unwrap();
        engine.remove_item(id);
        assert!(engine.state().is_empty());
        assert_eq!(engine.state().merchant_id.as_deref(), Some("m1"));

        let m2 = MerchantInfo::new("m2", "Two");
        engine.add_item(&item("b", 100), &m2, 1, SelectionState::new(), "").unwrap();
        assert_eq!(engine.state().merchant_id.as_deref(), Some("m2"));
    }

    #[test]
    fn test_grand_total_includes_delivery_fee() {
        let mut engine = CartEngine::new();
        let merchant = MerchantInfo {
            delivery_fee: Some(299),
            ..MerchantInfo::new("m1", "One")
        };
        engine.add_item(&item("a", 500), &merchant, 2, SelectionState::new(), "").unwrap();
        assert_eq!(engine.state().merchant_delivery_fee, 299);
        assert_eq!(engine.state().grand_total(), 1299);
    }

    #[test]
    fn test_stale_details_survive_remove_then_bare_add() {
        let mut engine = CartEngine::new();
        let m1 = MerchantInfo {
            delivery_fee: Some(299),
            category: Some("Fast Food".to_string()),
            delivery_time: Some(30),
            ..MerchantInfo::new("m1", "One")
        };
        let id = engine.add_item(&item("a", 100), &m1, 1, SelectionState::new(), "").unwrap();
        engine.remove_item(id);

        let m2 = MerchantInfo::new("m2", "Two");
        engine.add_item(&item("b", 100), &m2, 1, SelectionState::new(), "").unwrap();
        let state = engine.state();
        assert_eq!(state.merchant_id.as_deref(), Some("m2"));
        assert_eq!(state.merchant_category.as_deref(), Some("Fast Food"));
        assert_eq!(state.merchant_delivery_time, Some(30));
        assert_eq!(state.merchant_delivery_fee, 299);
    }

    #[test]
    fn test_quantity_above_cap_rejected() {
        let mut engine = CartEngine::new();
        let merchant = MerchantInfo::new("m1", "One");
        let id = engine.add_item(&item("a", 100), &merchant, 1, SelectionState::new(), "").unwrap();
        let before = engine.snapshot();

        let over = MAX_LINE_QUANTITY + 1;
        let err = engine
            .add_item(&item("a", 100), &merchant, over, SelectionState::new(), "")
            .unwrap_err();
        assert!(matches!(err, CartError::Unknown(_)));
        assert_eq!(engine.state().lines, before.lines);

        let err = engine.update_item(id, u32::MAX, SelectionState::new(), "").unwrap_err();
        assert!(matches!(err, CartError::Unknown(_)));
        assert_eq!(engine.state().lines, before.lines);
        assert_eq!(engine.state().total_items, 1);
        assert_eq!(engine.state().total_price, 100);
    }

    #[test]
    fn test_overflowing_subtotal_leaves_cart_untouched() {
        let mut engine = CartEngine::new();
        let merchant = MerchantInfo {
            delivery_fee: Some(299),
            ..MerchantInfo::new("m1", "One")
        };
        let err = engine
            .add_item(&item("gold", i64::MAX / 2), &merchant, 3, SelectionState::new(), "")
            .unwrap_err();

        assert!(matches!(err, CartError::Unknown(_)));
        let state = engine.state();
        assert!(state.is_empty());
        assert!(state.merchant_id.is_none());
        assert_eq!(state.merchant_delivery_fee, 0);
        assert_eq!(state.total_price, 0);
        assert_eq!(state.error, Some(err));

        // The failed add did not consume a line id.
        let id = engine.add_item(&item("a", 100), &merchant, 1, SelectionState::new(), "").unwrap();
        assert_eq!(id, 1);
    }

    #[test]
    fn test_overflowing_total_leaves_cart_untouched() {
        let mut engine = CartEngine::new();
        let merchant = MerchantInfo::new("m1", "One");
        let big = item("big", i64::MAX - 10);
        let id = engine.add_item(&big, &merchant, 1, SelectionState::new(), "").unwrap();
        let before = engine.snapshot();

        let err = engine.add_item(&big, &merchant, 1, SelectionState::new(), "").unwrap_err();
        assert!(matches!(err, CartError::Unknown(_)));
        assert_eq!(engine.state().lines, before.lines);
        assert_eq!(engine.state().total_price, before.total_price);

        let small = engine
            .add_item(&item("a", 5), &merchant, 1, SelectionState::new(), "")
            .unwrap();
        let err = engine.update_item(small, 3, SelectionState::new(), "").unwrap_err();
        assert!(matches!(err, CartError::Unknown(_)));
        assert_eq!(engine.state().line(small).map(|l| l.quantity), Some(1));
        assert_eq!(engine.state().total_price, i64::MAX - 5);
        assert_eq!(engine.state().line(id).map(|l| l.quantity), Some(1));
    }
}
