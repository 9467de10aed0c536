//! Daily Report Model (日结报告)

use super::product::ItemId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Quantity and revenue sold for one menu item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SoldItem {
    pub item_id: ItemId,
    /// Name as it appeared on the first sale line
    pub name: String,
    pub quantity: u32,
    /// Sum of historical unit prices
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
}

/// Beverage stock reconciliation row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BeverageStockLine {
    pub item_id: ItemId,
    pub name: String,
    pub current_stock: i32,
    pub sold_today: u32,
    /// Stock at the start of the day: current + sold
    pub total_stock: i32,
}

/// End-of-day figures
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DailySummary {
    pub sale_count: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
    pub adults: u32,
    pub children: u32,
    /// Tables still occupied (not yet in the ledger)
    pub open_tables: usize,
    pub active_orders: usize,
}

impl DailySummary {
    pub fn covers(&self) -> u32 {
        self.adults.saturating_add(self.children)
    }

    /// Average ticket per closed table
    pub fn average_ticket(&self) -> Option<Decimal> {
        if self.sale_count == 0 {
            return None;
        }
        Some(self.revenue / Decimal::from(self.sale_count as u64))
    }
}
