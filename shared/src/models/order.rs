//! Kitchen Order Model

use super::cart::CartLine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kitchen status. `Pending → Ready` is the only transition.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Ready,
}

/// One kitchen-facing submission of cart contents for a table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Time-derived id, unique per engine
    pub id: i64,
    pub table_id: u32,
    pub items: Vec<CartLine>,
    pub status: OrderStatus,
    pub timestamp: DateTime<Utc>,
}

impl Order {
    pub fn is_pending(&self) -> bool {
        self.status == OrderStatus::Pending
    }
}
