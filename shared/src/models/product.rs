//! Menu Item Model

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Menu item identifier
///
/// Menus authored by hand mix `"id": 12` and `"id": "empanada"`; both are
/// accepted and kept as strings.
pub type ItemId = String;

/// Sellable menu item (商品)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItem {
    #[serde(deserialize_with = "string_or_number")]
    pub id: ItemId,
    pub name: String,
    /// Unit price in pesos
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Remaining sellable units. Expected ≥ 0; the order path decrements
    /// without re-checking, so a negative value means a stale cart slipped
    /// through.
    #[serde(default)]
    pub stock: i32,
}

impl MenuItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Decimal, stock: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            stock,
        }
    }

    /// Whether at least one unit is left
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Accept either a JSON string or an integer id
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_id_is_normalised() {
        let item: MenuItem =
            serde_json::from_str(r#"{"id": 7, "name": "Coca-Cola", "price": 1500, "stock": 3}"#)
                .unwrap();
        assert_eq!(item.id, "7");
        assert_eq!(item.price, Decimal::from(1500));
        assert!(item.in_stock());
    }

    #[test]
    fn test_price_is_written_as_number() {
        let item = MenuItem::new("flan", "Flan", Decimal::new(22505, 1), 4);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["price"].as_f64(), Some(2250.5));

        let back: MenuItem = serde_json::from_value(json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_fractional_price_and_missing_stock() {
        let item: MenuItem =
            serde_json::from_str(r#"{"id": "flan", "name": "Flan", "price": 2250.5}"#).unwrap();
        assert_eq!(item.price, Decimal::new(22505, 1));
        assert_eq!(item.stock, 0);
        assert!(!item.in_stock());
    }
}
