//! PosEngine - sequencing, persistence and notification
//!
//! This module handles:
//! - Validation of every mutating operation (declines leave state untouched)
//! - Driving the state components in the right order
//! - Persisting menu / orders / tables / sales in one atomic commit
//! - Broadcasting named change events
//!
//! # Placement Flow
//!
//! ```text
//! place_order(table, adults, children)
//!     ├─ 1. Cart non-empty?            → Decline::EmptyCart
//!     ├─ 2. adults + children > 0?     → Decline::ZeroPartySize
//!     ├─ 3. Table number configured?   → Decline::UnknownTable
//!     ├─ 4. Decrement stock per cart line
//!     ├─ 5. Create pending Order (cart snapshot)
//!     ├─ 6. Merge into table tab (free → occupied)
//!     ├─ 7. Clear cart
//!     ├─ 8. Commit menu + orders + tables
//!     └─ 9. Broadcast order-placed, cart-updated
//! ```
//!
//! Every operation runs to completion on the caller's thread; there is no
//! interleaving to guard against.

mod error;
pub use error::*;

use crate::core::Config;
use crate::state::{
    CartManager, MenuStore, OrderLedger, PartySize, PosState, SalesLedger, TableRegistry, reports,
};
use crate::storage::{self, KEY_MENU, KEY_ORDERS, KEY_SALES, KEY_TABLES, StateStorage};
use rust_decimal::Decimal;
use shared::StateEvent;
use shared::models::{
    BeverageStockLine, CartLine, DailySummary, DiningTable, Menu, MenuItem, Order, Sale, SoldItem,
};
use std::collections::BTreeMap;
use tokio::sync::broadcast;

/// Event broadcast channel capacity
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Engine knobs taken from [`Config`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    /// Tables are numbered `1..=total_tables`
    pub total_tables: u32,
    /// Category id the beverage stock report reads
    pub beverage_category_id: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            total_tables: 10,
            beverage_category_id: "beverages".to_string(),
        }
    }
}

impl From<&Config> for EngineSettings {
    fn from(config: &Config) -> Self {
        Self {
            total_tables: config.total_tables,
            beverage_category_id: config.beverage_category_id.clone(),
        }
    }
}

/// Single owner of the restaurant state
pub struct PosEngine {
    state: PosState,
    storage: StateStorage,
    event_tx: broadcast::Sender<StateEvent>,
    settings: EngineSettings,
    /// Instance id, logged so restarts are visible in the logs
    epoch: String,
}

impl std::fmt::Debug for PosEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PosEngine")
            .field("storage", &"<StateStorage>")
            .field("event_tx", &"<broadcast::Sender>")
            .field("settings", &self.settings)
            .field("epoch", &self.epoch)
            .finish()
    }
}

impl PosEngine {
    /// Build the engine around an acquired menu, replaying orders, tables and
    /// sales from storage.
    ///
    /// Anything unreadable in storage falls back to its empty value.
    pub fn replay(
        menu: Menu,
        storage: StateStorage,
        settings: EngineSettings,
        event_tx: broadcast::Sender<StateEvent>,
    ) -> EngineResult<Self> {
        let epoch = uuid::Uuid::new_v4().to_string();
        let (orders, tables, sales) = load_collections(&storage, settings.total_tables)?;

        tracing::info!(
            epoch = %epoch,
            menu_items = menu.item_count(),
            orders = orders.len(),
            open_tables = tables.occupied().count(),
            sales = sales.len(),
            "PosEngine state replayed"
        );

        Ok(Self {
            state: PosState {
                menu: MenuStore::new(menu),
                cart: CartManager::new(),
                orders,
                tables,
                sales,
            },
            storage,
            event_tx,
            settings,
            epoch,
        })
    }

    /// Create an engine over an in-memory store (for testing)
    #[cfg(test)]
    pub fn with_menu(menu: Menu, total_tables: u32) -> Self {
        let storage = StateStorage::open_in_memory().unwrap();
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let settings = EngineSettings {
            total_tables,
            ..EngineSettings::default()
        };
        Self::replay(menu, storage, settings, event_tx).unwrap()
    }

    // ========== Observers ==========

    /// Subscribe to change events
    pub fn subscribe(&self) -> broadcast::Receiver<StateEvent> {
        self.event_tx.subscribe()
    }

    fn emit(&self, event: StateEvent) {
        // No subscribers is fine
        let _ = self.event_tx.send(event);
        tracing::debug!(event = %event, "State event");
    }

    // ========== Read access ==========

    pub fn epoch(&self) -> &str {
        &self.epoch
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn storage(&self) -> &StateStorage {
        &self.storage
    }

    pub fn menu(&self) -> &Menu {
        self.state.menu.menu()
    }

    pub fn find_item(&self, item_id: &str) -> Option<&MenuItem> {
        self.state.menu.find_item(item_id)
    }

    pub fn cart(&self) -> &[CartLine] {
        self.state.cart.lines()
    }

    pub fn cart_total(&self) -> Decimal {
        self.state.cart.total()
    }

    pub fn orders(&self) -> &[Order] {
        self.state.orders.all()
    }

    pub fn order(&self, order_id: i64) -> Option<&Order> {
        self.state.orders.get(order_id)
    }

    /// Pending orders, oldest first
    pub fn kitchen_queue(&self) -> Vec<&Order> {
        self.state.orders.kitchen_queue()
    }

    pub fn table(&self, table_id: u32) -> Option<&DiningTable> {
        self.state.tables.get(table_id)
    }

    pub fn tables(&self) -> &BTreeMap<u32, DiningTable> {
        self.state.tables.all()
    }

    pub fn sales(&self) -> &[Sale] {
        self.state.sales.all()
    }

    // ========== Cart ==========

    /// Add one unit of a menu item to the cart, checked against live stock
    pub fn add_to_cart(&mut self, item_id: &str) -> EngineResult<()> {
        let item = self
            .state
            .menu
            .find_item(item_id)
            .ok_or_else(|| Decline::ItemNotFound(item_id.to_string()))?;

        if let Err(decline) = self.state.cart.add(item) {
            tracing::info!(item_id, reason = %decline, "Add to cart declined");
            return Err(decline.into());
        }
        self.emit(StateEvent::CartUpdated);
        Ok(())
    }

    /// Remove the line at `index`; out of range is a no-op
    pub fn remove_from_cart(&mut self, index: usize) -> Option<CartLine> {
        let removed = self.state.cart.remove(index);
        self.emit(StateEvent::CartUpdated);
        removed
    }

    // ========== Orders ==========

    /// Submit the cart as a kitchen order for `table_id`.
    ///
    /// Party counts come from raw form input; see [`PartySize::parse`].
    pub fn place_order(
        &mut self,
        table_id: u32,
        adults: &str,
        children: &str,
    ) -> EngineResult<Order> {
        if self.state.cart.is_empty() {
            return Err(Decline::EmptyCart.into());
        }
        let party = PartySize::parse(adults, children);
        if party.total() == 0 {
            return Err(Decline::ZeroPartySize.into());
        }
        if !self.state.tables.is_valid_id(table_id) {
            return Err(Decline::UnknownTable(table_id).into());
        }

        let lines = self.state.cart.take();

        for line in &lines {
            if !self.state.menu.decrement_stock(&line.id) {
                tracing::warn!(item_id = %line.id, "Cart line has no menu item, stock untouched");
            }
        }

        let order = self.state.orders.create(table_id, lines.clone()).clone();
        let was_free = !self.state.tables.is_occupied(table_id);
        let table = self.state.tables.accumulate(table_id, &lines, party);

        tracing::info!(
            order_id = order.id,
            table_id,
            items = lines.len(),
            table_total = %table.total,
            adults = party.adults,
            children = party.children,
            opened = was_free,
            "Order placed"
        );

        self.persist_state()?;
        self.emit(StateEvent::CartUpdated);
        self.emit(StateEvent::OrderPlaced);
        Ok(order)
    }

    /// Kitchen marks an order as ready. Unknown (or already ready) ids are a
    /// silent no-op; returns whether anything changed.
    pub fn mark_order_ready(&mut self, order_id: i64) -> EngineResult<bool> {
        if !self.state.orders.mark_ready(order_id) {
            tracing::debug!(order_id, "mark_order_ready ignored");
            return Ok(false);
        }
        tracing::info!(order_id, "Order ready");
        self.persist_state()?;
        self.emit(StateEvent::OrdersUpdated);
        Ok(true)
    }

    // ========== Stock ==========

    /// Manual stock edit. Returns whether the item exists.
    pub fn set_stock(&mut self, item_id: &str, raw: &str) -> EngineResult<bool> {
        let before = self.state.menu.stock_of(item_id);
        if !self.state.menu.set_stock(item_id, raw) {
            tracing::info!(item_id, "Stock edit for unknown item");
            return Ok(false);
        }
        tracing::info!(
            target: "audit",
            item_id,
            before = ?before,
            after = ?self.state.menu.stock_of(item_id),
            "Stock edited"
        );
        self.persist_state()?;
        self.emit(StateEvent::MenuUpdated);
        Ok(true)
    }

    // ========== Tables ==========

    /// Close an occupied table: archive the tab as a Sale, free the table and
    /// discard its kitchen orders whatever their status.
    pub fn close_table(&mut self, table_id: u32) -> EngineResult<Sale> {
        let closed = match self.state.tables.close(table_id) {
            Ok(table) => table,
            Err(decline) => {
                tracing::warn!(table_id, "Cannot close table: not found or already free");
                return Err(decline.into());
            }
        };

        let sale = self.state.sales.append(table_id, &closed).clone();
        let dropped = self.state.orders.remove_for_table(table_id);

        tracing::info!(
            target: "audit",
            sale_id = sale.id,
            table_id,
            total = %sale.total,
            items = sale.items.len(),
            dropped_orders = dropped,
            "Table closed"
        );

        self.persist_state()?;
        self.emit(StateEvent::TablesUpdated);
        self.emit(StateEvent::OrdersUpdated);
        Ok(sale)
    }

    /// End-of-day reset: clear sales and orders, free every table. Stock is
    /// NOT replenished. Returns the summary of the day being closed.
    ///
    /// Asking the operator for confirmation is the caller's job.
    pub fn close_day(&mut self) -> EngineResult<DailySummary> {
        let summary = self.daily_summary();

        self.state.sales.clear();
        self.state.orders.clear();
        self.state.tables.reset_all();

        tracing::info!(
            target: "audit",
            sales = summary.sale_count,
            revenue = %summary.revenue,
            covers = summary.covers(),
            abandoned_tables = summary.open_tables,
            "Day closed"
        );

        self.persist_state()?;
        self.emit(StateEvent::SalesUpdated);
        self.emit(StateEvent::TablesUpdated);
        self.emit(StateEvent::OrdersUpdated);
        Ok(summary)
    }

    // ========== Reports ==========

    pub fn sold_report(&self) -> Vec<SoldItem> {
        self.state.sales.sold_report()
    }

    pub fn beverage_stock_report(&self) -> Vec<BeverageStockLine> {
        reports::beverage_stock_report(
            &self.state.menu,
            &self.state.sales,
            &self.settings.beverage_category_id,
        )
    }

    pub fn daily_summary(&self) -> DailySummary {
        reports::daily_summary(&self.state.sales, &self.state.tables, &self.state.orders)
    }

    // ========== Persistence ==========

    /// Re-read orders, tables and sales from storage (another writer, manual
    /// repair). Menu and cart are kept.
    pub fn reload_state(&mut self) -> EngineResult<()> {
        let (orders, tables, sales) = load_collections(&self.storage, self.settings.total_tables)?;
        self.state.orders = orders;
        self.state.tables = tables;
        self.state.sales = sales;
        tracing::info!("State reloaded from storage");
        self.emit(StateEvent::StateReloaded);
        Ok(())
    }

    /// Commit menu, orders, tables and sales in one transaction
    fn persist_state(&self) -> EngineResult<()> {
        let entries = vec![
            storage::encode(KEY_MENU, self.state.menu.menu())?,
            storage::encode(KEY_ORDERS, self.state.orders.all())?,
            storage::encode(KEY_TABLES, self.state.tables.all())?,
            storage::encode(KEY_SALES, self.state.sales.all())?,
        ];
        if let Err(e) = self.storage.commit_blobs(&entries) {
            tracing::error!(error = %e, "Failed to persist state, in-memory state is ahead of disk");
            return Err(e.into());
        }
        Ok(())
    }
}

fn load_collections(
    storage: &StateStorage,
    total_tables: u32,
) -> EngineResult<(OrderLedger, TableRegistry, SalesLedger)> {
    let orders: Vec<Order> = storage.load_json(KEY_ORDERS)?.unwrap_or_default();
    let tables: BTreeMap<u32, DiningTable> = storage.load_json(KEY_TABLES)?.unwrap_or_default();
    let sales: Vec<Sale> = storage.load_json(KEY_SALES)?.unwrap_or_default();
    Ok((
        OrderLedger::from_orders(orders),
        TableRegistry::from_persisted(tables, total_tables),
        SalesLedger::from_sales(sales),
    ))
}

#[cfg(test)]
mod tests;
