pub mod item;
pub mod merchant;

pub use item::{Entry, Item, ItemOption, OptionKind};
pub use merchant::{Address, MenuCategory, Merchant, MerchantKind, WorkingHours};
