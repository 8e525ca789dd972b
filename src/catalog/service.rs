use strsim::jaro_winkler;

use crate::catalog::loader;
use crate::error::{Result, StoreError};
use crate::models::{Item, Merchant};

/// Minimum Jaro-Winkler similarity for a fuzzy name match.
const FUZZY_THRESHOLD: f64 = 0.7;

/// Read-only provider of merchants and their menus.
#[derive(Debug, Clone, Default)]
pub struct MerchantCatalog {
    merchants: Vec<Merchant>,
}

impl MerchantCatalog {
    pub fn new(merchants: Vec<Merchant>) -> Self {
        Self { merchants }
    }

    /// Catalog backed by the built-in demo merchants.
    pub fn fixture() -> Result<Self> {
        Ok(Self::new(loader::fixture_merchants()?))
    }

    /// Catalog from a JSON file, or the built-in one when no path is given.
    pub fn from_path_or_fixture(path: Option<&std::path::Path>) -> Result<Self> {
        match path {
            Some(path) => Ok(Self::new(loader::load_merchants(path)?)),
            None => Self::fixture(),
        }
    }

    pub fn all_merchants(&self) -> &[Merchant] {
        &self.merchants
    }

    /// Merchants without menus and working hours, for list views.
    pub fn merchant_summaries(&self) -> Vec<Merchant> {
        self.merchants.iter().map(Merchant::summary).collect()
    }

    pub fn merchant(&self, id: &str) -> Option<&Merchant> {
        self.merchants.iter().find(|m| m.id == id)
    }

    pub fn find_item(&self, merchant_id: &str, item_id: &str) -> Result<&Item> {
        let merchant = self
            .merchant(merchant_id)
            .ok_or_else(|| StoreError::MerchantNotFound(merchant_id.to_string()))?;
        merchant
            .find_item(item_id)
            .ok_or_else(|| StoreError::ItemNotFound(item_id.to_string()))
    }

    /// Merchants whose name matches `query`.
    ///
    /// An exact (case-insensitive) match is returned alone; otherwise fuzzy
    /// matches are returned best first.
    pub fn search_merchants(&self, query: &str) -> Vec<&Merchant> {
        let query = query.trim().to_lowercase();

        if let Some(exact) = self.merchants.iter().find(|m| m.name.to_lowercase() == query) {
            return vec![exact];
        }

        let mut candidates: Vec<(&Merchant, f64)> = self
            .merchants
            .iter()
            .map(|m| (m, jaro_winkler(&m.name.to_lowercase(), &query)))
            .filter(|(_, score)| *score > FUZZY_THRESHOLD)
            .collect();

        candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        candidates.into_iter().map(|(m, _)| m).collect()
    }

    /// Resolve a merchant by id, then by name (best fuzzy match).
    pub fn resolve_merchant(&self, query: &str) -> Result<&Merchant> {
        if let Some(merchant) = self.merchant(query) {
            return Ok(merchant);
        }
        self.search_merchants(query)
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::MerchantNotFound(query.to_string()))
    }

    pub fn len(&self) -> usize {
        self.merchants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.merchants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_search_case_insensitive() {
        let catalog = MerchantCatalog::fixture().unwrap();
        let found = catalog.search_merchants("subway");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Subway");
    }

    #[test]
    fn test_fuzzy_search() {
        let catalog = MerchantCatalog::fixture().unwrap();
        let found = catalog.search_merchants("walmrt");
        assert_eq!(found.first().map(|m| m.name.as_str()), Some("Walmart"));
    }

    #[test]
    fn test_resolve_by_id() {
        let catalog = MerchantCatalog::fixture().unwrap();
        let merchant = catalog
            .resolve_merchant("4e782760-d2e1-4cdf-a9c1-dc9ffddbadfe")
            .unwrap();
        assert_eq!(merchant.name, "McDonald's");
    }

    #[test]
    fn test_resolve_unknown() {
        let catalog = MerchantCatalog::fixture().unwrap();
        assert!(matches!(
            catalog.resolve_merchant("zzzzzz"),
            Err(StoreError::MerchantNotFound(_))
        ));
    }

    #[test]
    fn test_find_item() {
        let catalog = MerchantCatalog::fixture().unwrap();
        let item = catalog
            .find_item(
                "4e782760-d2e1-4cdf-a9c1-dc9ffddbadfe",
                "1c84d899-3b7d-48ce-b33d-123a560bc593",
            )
            .unwrap();
        assert_eq!(item.price, 599);
        assert!(catalog.find_item("4e782760-d2e1-4cdf-a9c1-dc9ffddbadfe", "nope").is_err());
    }

    #[test]
    fn test_summaries() {
        let catalog = MerchantCatalog::fixture().unwrap();
        let summaries = catalog.merchant_summaries();
        assert_eq!(summaries.len(), catalog.len());
        assert!(summaries.iter().all(|m| m.menu.is_empty() && m.working_hours.is_empty()));
    }
}
