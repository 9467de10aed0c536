//! Cart Line Model

use super::product::{ItemId, MenuItem, string_or_number};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Denormalised copy of a menu item taken when it was added to the cart.
///
/// Later price or stock edits on the menu never touch lines already in a
/// cart, order, table or sale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    #[serde(deserialize_with = "string_or_number")]
    pub id: ItemId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl From<&MenuItem> for CartLine {
    fn from(item: &MenuItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            price: item.price,
        }
    }
}

/// Sum of unit prices
pub fn lines_total(lines: &[CartLine]) -> Decimal {
    lines.iter().map(|l| l.price).sum()
}
