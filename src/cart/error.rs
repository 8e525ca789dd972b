use thiserror::Error;

/// Failures surfaced by cart mutations.
///
/// A failed mutation leaves the cart as it was and records the error on
/// [`CartState::error`](super::CartState::error) until it is cleared.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The cart already belongs to another merchant.
    #[error(
        "Your cart already has items from {current}. \
         Please clear your cart before adding items from {requested}."
    )]
    DifferentMerchant { current: String, requested: String },

    /// Any other rejected mutation (malformed selection, zero quantity...).
    #[error("Unable to update cart: {0}")]
    Unknown(String),
}

impl CartError {
    pub fn is_different_merchant(&self) -> bool {
        matches!(self, CartError::DifferentMerchant { .. })
    }
}
