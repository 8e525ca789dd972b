use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::models::Merchant;

/// Catalog shipped with the binary.
const FIXTURE_JSON: &str = include_str!("../../data/merchants.json");

/// Parse a JSON array of merchants.
///
/// Deduplicates by merchant id (last occurrence wins, first position kept).
pub fn parse_merchants(json: &str) -> Result<Vec<Merchant>> {
    let parsed: Vec<Merchant> = serde_json::from_str(json)?;

    let mut merchants: Vec<Merchant> = Vec::with_capacity(parsed.len());
    for merchant in parsed {
        match merchants.iter_mut().find(|m| m.id == merchant.id) {
            Some(existing) => *existing = merchant,
            None => merchants.push(merchant),
        }
    }

    Ok(merchants)
}

/// Load merchants from a JSON file.
pub fn load_merchants<P: AsRef<Path>>(path: P) -> Result<Vec<Merchant>> {
    let content = fs::read_to_string(path.as_ref())?;
    let merchants = parse_merchants(&content)?;
    info!(
        path = %path.as_ref().display(),
        count = merchants.len(),
        "loaded merchant catalog"
    );
    Ok(merchants)
}

/// The built-in demo merchants.
pub fn fixture_merchants() -> Result<Vec<Merchant>> {
    parse_merchants(FIXTURE_JSON)
}
