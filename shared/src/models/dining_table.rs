//! Dining Table Model

use super::cart::{CartLine, lines_total};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Table occupancy
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    #[default]
    Free,
    Occupied,
}

/// Running tab for one dining table (桌台)
///
/// `total` always equals the sum of `items[*].price`; a free table is empty
/// with zero total and zero party counts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DiningTable {
    #[serde(default)]
    pub items: Vec<CartLine>,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub total: Decimal,
    #[serde(default)]
    pub status: TableStatus,
    #[serde(default)]
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
}

impl DiningTable {
    /// A free, empty table
    pub fn free() -> Self {
        Self::default()
    }

    pub fn is_free(&self) -> bool {
        self.status == TableStatus::Free
    }

    /// Total party size
    pub fn covers(&self) -> u32 {
        self.adults.saturating_add(self.children)
    }

    /// Whether the running total matches the item list
    pub fn is_consistent(&self) -> bool {
        self.total == lines_total(&self.items)
    }
}
