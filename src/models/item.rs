use serde::{Deserialize, Serialize};

/// A menu item. Prices are integer cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub image_url: String,
    #[serde(default)]
    pub options: Vec<ItemOption>,
    pub is_available: bool,
}

impl Item {
    /// Look up one of this item's options by id.
    pub fn option(&self, option_id: u64) -> Option<&ItemOption> {
        self.options.iter().find(|o| o.id == option_id)
    }

    /// Options that can currently be chosen.
    pub fn available_options(&self) -> impl Iterator<Item = &ItemOption> {
        self.options.iter().filter(|o| o.is_available)
    }
}

/// How the entries of an option are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionKind {
    /// Optional add-on priced by the option itself.
    Boolean,
    /// Radio group: at most one entry.
    SingleSelection,
    /// Checkboxes: any subset of entries.
    MultipleSelection,
}

/// A configurable attribute of an item (size, add-on, sauces...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemOption {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub is_available: bool,
    #[serde(rename = "type")]
    pub kind: OptionKind,
    #[serde(rename = "options", default)]
    pub entries: Vec<Entry>,
}

impl ItemOption {
    pub fn entry(&self, entry_id: u64) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == entry_id)
    }
}

/// One concrete choice within an option.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entry {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub price: i64,
}
