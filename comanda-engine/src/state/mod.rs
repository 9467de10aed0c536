//! Process-wide state container and its components
//!
//! ```text
//! MenuStore ← CartManager → OrderLedger
//!                  ↓             ↓
//!            TableRegistry → SalesLedger → reports
//! ```
//!
//! Components only hold data and enforce their own invariants. Sequencing
//! (stock decrement, merge, persist, notify) lives in [`crate::engine`].

pub mod cart;
pub mod menu_store;
pub mod order_ledger;
pub mod reports;
pub mod sales_ledger;
pub mod table_registry;

pub use cart::CartManager;
pub use menu_store::MenuStore;
pub use order_ledger::OrderLedger;
pub use sales_ledger::SalesLedger;
pub use table_registry::TableRegistry;

use shared::util::parse_int_lenient;

/// Adults/children of one submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PartySize {
    pub adults: u32,
    pub children: u32,
}

impl PartySize {
    pub fn new(adults: u32, children: u32) -> Self {
        Self { adults, children }
    }

    /// Parse raw form input. Missing or unparsable counts become 0, and so do
    /// negative ones.
    pub fn parse(adults: &str, children: &str) -> Self {
        let count = |raw: &str| {
            parse_int_lenient(raw)
                .map(|n| n.clamp(0, u32::MAX as i64) as u32)
                .unwrap_or(0)
        };
        Self {
            adults: count(adults),
            children: count(children),
        }
    }

    pub fn total(&self) -> u32 {
        self.adults.saturating_add(self.children)
    }
}

/// Everything the engine owns
#[derive(Debug)]
pub struct PosState {
    pub menu: MenuStore,
    pub cart: CartManager,
    pub orders: OrderLedger,
    pub tables: TableRegistry,
    pub sales: SalesLedger,
}
