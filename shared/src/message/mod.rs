//! 状态变更事件
//!
//! Every mutating engine operation ends by publishing one or more of these so
//! observers (kitchen screen, cashier view) can re-render. Names are the wire
//! names the presentation layer already listens for.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Named change notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StateEvent {
    /// Menu acquired at startup
    MenuLoaded,
    /// Cart contents changed
    CartUpdated,
    /// Order submitted to the kitchen
    OrderPlaced,
    /// Kitchen orders changed (status or removal)
    OrdersUpdated,
    /// Table occupancy or tabs changed
    TablesUpdated,
    /// Sales ledger changed
    SalesUpdated,
    /// Menu stock edited
    MenuUpdated,
    /// Collections re-read from storage
    StateReloaded,
}

impl StateEvent {
    pub const ALL: [StateEvent; 8] = [
        StateEvent::MenuLoaded,
        StateEvent::CartUpdated,
        StateEvent::OrderPlaced,
        StateEvent::OrdersUpdated,
        StateEvent::TablesUpdated,
        StateEvent::SalesUpdated,
        StateEvent::MenuUpdated,
        StateEvent::StateReloaded,
    ];

    /// Wire name (`order-placed`, ...)
    pub const fn name(&self) -> &'static str {
        match self {
            StateEvent::MenuLoaded => "menu-loaded",
            StateEvent::CartUpdated => "cart-updated",
            StateEvent::OrderPlaced => "order-placed",
            StateEvent::OrdersUpdated => "orders-updated",
            StateEvent::TablesUpdated => "tables-updated",
            StateEvent::SalesUpdated => "sales-updated",
            StateEvent::MenuUpdated => "menu-updated",
            StateEvent::StateReloaded => "state-reloaded",
        }
    }
}

impl TryFrom<&str> for StateEvent {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        StateEvent::ALL
            .into_iter()
            .find(|e| e.name() == value)
            .ok_or(())
    }
}

impl fmt::Display for StateEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
