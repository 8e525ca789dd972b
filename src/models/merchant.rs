use serde::{Deserialize, Serialize};

use super::Item;

/// A store listed in the catalog, together with its menu.
///
/// Money fields are integer cents, times are minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Merchant {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: MerchantKind,
    pub minimum_order: i64,
    pub is_open: bool,
    #[serde(default)]
    pub working_hours: Vec<WorkingHours>,
    pub delivery_time: u32,
    pub delivery_fee: i64,
    /// 0..=50, tenths of a star.
    pub rating: u8,
    pub rating_count: u32,
    pub image_url: String,
    pub address: Address,
    pub phone_number: String,
    pub category: String,
    #[serde(default)]
    pub menu: Vec<MenuCategory>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MerchantKind {
    Supermarket,
    Restaurant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuCategory {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub items: Vec<Item>,
}

/// Opening window for one day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingHours {
    /// 0 = Sunday .. 6 = Saturday.
    pub day_of_the_week: u8,
    /// Minutes since midnight, 0..=1439.
    pub start_time: u16,
    /// Minutes since midnight, 0..=1440.
    pub end_time: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl Merchant {
    /// Copy of this merchant without menu and working hours, for list views.
    pub fn summary(&self) -> Merchant {
        Merchant {
            menu: Vec::new(),
            working_hours: Vec::new(),
            ..self.clone()
        }
    }

    /// Find an item by id across all menu categories.
    pub fn find_item(&self, item_id: &str) -> Option<&Item> {
        self.items().find(|item| item.id == item_id)
    }

    /// All items of the menu, in category order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.menu.iter().flat_map(|category| category.items.iter())
    }

    /// Rating on a 0.0 to 5.0 scale.
    #[inline]
    pub fn stars(&self) -> f64 {
        self.rating as f64 / 10.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_merchant() -> Merchant {
        Merchant {
            id: "m1".to_string(),
            name: "Burger Place".to_string(),
            kind: MerchantKind::Restaurant,
            minimum_order: 1000,
            is_open: true,
            working_hours: vec![WorkingHours {
                day_of_the_week: 1,
                start_time: 480,
                end_time: 1320,
            }],
            delivery_time: 30,
            delivery_fee: 299,
            rating: 42,
            rating_count: 10,
            image_url: String::new(),
            address: Address {
                id: "a1".to_string(),
                name: "Downtown".to_string(),
                latitude: 0.0,
                longitude: 0.0,
                address_line1: "1 Main St".to_string(),
                address_line2: String::new(),
                city: "Springfield".to_string(),
                state: "CA".to_string(),
                zip: "00000".to_string(),
            },
            phone_number: String::new(),
            category: "Fast Food".to_string(),
            menu: vec![MenuCategory {
                id: "c1".to_string(),
                name: "Burgers".to_string(),
                description: None,
                image_url: None,
                items: vec![Item {
                    id: "i1".to_string(),
                    name: "Hamburger".to_string(),
                    description: String::new(),
                    price: 199,
                    image_url: String::new(),
                    options: vec![],
                    is_available: true,
                }],
            }],
        }
    }

    #[test]
    fn test_summary_strips_menu_and_hours() {
        let merchant = sample_merchant();
        let summary = merchant.summary();
        assert!(summary.menu.is_empty());
        assert!(summary.working_hours.is_empty());
        assert_eq!(summary.name, merchant.name);
        assert_eq!(summary.delivery_fee, 299);
    }

    #[test]
    fn test_find_item() {
        let merchant = sample_merchant();
        assert_eq!(merchant.find_item("i1").unwrap().price, 199);
        assert!(merchant.find_item("missing").is_none());
    }

    #[test]
    fn test_stars() {
        assert!((sample_merchant().stars() - 4.2).abs() < 0.001);
    }
}
