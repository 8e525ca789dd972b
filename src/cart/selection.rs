use std::collections::{BTreeMap, HashSet};

use crate::cart::CartError;
use crate::models::{Entry, Item, OptionKind};

/// The value chosen for one option, shaped by the option's kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Boolean(bool),
    Single(Option<Entry>),
    Multiple(Vec<Entry>),
}

/// Chosen values keyed by option id.
pub type SelectionState = BTreeMap<u64, Selection>;

impl Selection {
    /// Build a multiple selection, dropping repeated entry ids (first one wins).
    pub fn multiple(entries: impl IntoIterator<Item = Entry>) -> Self {
        let mut seen = HashSet::new();
        Selection::Multiple(entries.into_iter().filter(|e| seen.insert(e.id)).collect())
    }

    /// The option kind this value is shaped for.
    pub fn kind(&self) -> OptionKind {
        match self {
            Selection::Boolean(_) => OptionKind::Boolean,
            Selection::Single(_) => OptionKind::SingleSelection,
            Selection::Multiple(_) => OptionKind::MultipleSelection,
        }
    }

    fn entries(&self) -> &[Entry] {
        match self {
            Selection::Boolean(_) => &[],
            Selection::Single(entry) => entry.as_slice(),
            Selection::Multiple(entries) => entries,
        }
    }
}

/// Check that every selection refers to an option of `item`, has the shape of
/// that option's kind, and only picks entries belonging to it.
pub fn validate_selections(item: &Item, selections: &SelectionState) -> Result<(), CartError> {
    for (option_id, selection) in selections {
        let option = item.option(*option_id).ok_or_else(|| {
            CartError::Unknown(format!("{} has no option {}", item.name, option_id))
        })?;

        if option.kind != selection.kind() {
            return Err(CartError::Unknown(format!(
                "option '{}' expects a {:?} value, got {:?}",
                option.name,
                option.kind,
                selection.kind()
            )));
        }

        let mut seen = HashSet::new();
        for entry in selection.entries() {
            if option.entry(entry.id).is_none() {
                return Err(CartError::Unknown(format!(
                    "'{}' is not a choice of option '{}'",
                    entry.name, option.name
                )));
            }
            if !seen.insert(entry.id) {
                return Err(CartError::Unknown(format!(
                    "'{}' selected twice for option '{}'",
                    entry.name, option.name
                )));
            }
        }
    }

    Ok(())
}
