//! Reports combining the menu, tables and the sales ledger

use super::{MenuStore, OrderLedger, SalesLedger, TableRegistry};
use shared::models::{BeverageStockLine, DailySummary};
use std::collections::HashMap;

/// Stock reconciliation for the beverages category.
///
/// `total_stock` = current + sold today, i.e. the count at the start of the
/// day. A menu without the category yields an empty report.
pub fn beverage_stock_report(
    menu: &MenuStore,
    sales: &SalesLedger,
    category_id: &str,
) -> Vec<BeverageStockLine> {
    let Some(category) = menu.category(category_id) else {
        return Vec::new();
    };

    let sold: HashMap<String, u32> = sales
        .sold_report()
        .into_iter()
        .map(|row| (row.item_id, row.quantity))
        .collect();

    category
        .items
        .iter()
        .map(|item| {
            let sold_today = sold.get(&item.id).copied().unwrap_or(0);
            BeverageStockLine {
                item_id: item.id.clone(),
                name: item.name.clone(),
                current_stock: item.stock,
                sold_today,
                total_stock: item.stock.saturating_add(sold_today.min(i32::MAX as u32) as i32),
            }
        })
        .collect()
}

/// Day figures from the ledger plus what is still open
pub fn daily_summary(
    sales: &SalesLedger,
    tables: &TableRegistry,
    orders: &OrderLedger,
) -> DailySummary {
    DailySummary {
        sale_count: sales.len(),
        revenue: sales.revenue(),
        adults: sales.all().iter().map(|s| s.adults).sum(),
        children: sales.all().iter().map(|s| s.children).sum(),
        open_tables: tables.occupied().count(),
        active_orders: orders.len(),
    }
}
