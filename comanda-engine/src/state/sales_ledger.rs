//! SalesLedger - closed tabs for the current business day

use chrono::Utc;
use rust_decimal::Decimal;
use shared::models::{DiningTable, Sale, SoldItem};
use shared::util::next_unique_id;
use std::collections::HashMap;

/// Append-only; only the day reset clears it
#[derive(Debug, Clone, Default)]
pub struct SalesLedger {
    sales: Vec<Sale>,
    last_id: i64,
}

impl SalesLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_sales(sales: Vec<Sale>) -> Self {
        let last_id = sales.iter().map(|s| s.id).max().unwrap_or(0);
        Self { sales, last_id }
    }

    /// Archive a closed tab
    pub fn append(&mut self, table_id: u32, table: &DiningTable) -> &Sale {
        let sale = Sale {
            id: next_unique_id(&mut self.last_id),
            table_id,
            items: table.items.clone(),
            total: table.total,
            adults: table.adults,
            children: table.children,
            timestamp: Utc::now(),
        };
        self.sales.push(sale);
        &self.sales[self.sales.len() - 1]
    }

    pub fn clear(&mut self) {
        self.sales.clear();
    }

    pub fn all(&self) -> &[Sale] {
        &self.sales
    }

    pub fn len(&self) -> usize {
        self.sales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }

    pub fn revenue(&self) -> Decimal {
        self.sales.iter().map(|s| s.total).sum()
    }

    /// Quantity and revenue per item id, in order of first sale.
    ///
    /// Revenue uses the price on each sale line, so later menu price edits do
    /// not rewrite history.
    pub fn sold_report(&self) -> Vec<SoldItem> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut report: Vec<SoldItem> = Vec::new();
        for line in self.sales.iter().flat_map(|s| s.items.iter()) {
            let pos = *index.entry(line.id.as_str()).or_insert_with(|| {
                report.push(SoldItem {
                    item_id: line.id.clone(),
                    name: line.name.clone(),
                    quantity: 0,
                    revenue: Decimal::ZERO,
                });
                report.len() - 1
            });
            report[pos].quantity += 1;
            report[pos].revenue += line.price;
        }
        report
    }
}
