//! TableRegistry - occupancy and running tabs
//!
//! ```text
//!   free ──first order──▶ occupied ──more orders──▶ occupied
//!    ▲                        │
//!    └──────── close ─────────┘
//! ```

use super::PartySize;
use crate::engine::Decline;
use shared::models::{CartLine, DiningTable, TableStatus, lines_total};
use std::collections::BTreeMap;

/// Tables keyed by their number, `1..=total_tables`
#[derive(Debug, Clone)]
pub struct TableRegistry {
    tables: BTreeMap<u32, DiningTable>,
    total_tables: u32,
}

impl TableRegistry {
    /// Every table free
    pub fn new(total_tables: u32) -> Self {
        Self::from_persisted(BTreeMap::new(), total_tables)
    }

    /// Rebuild from persisted records, backfilling any missing table number
    /// with a free one
    pub fn from_persisted(mut tables: BTreeMap<u32, DiningTable>, total_tables: u32) -> Self {
        for id in 1..=total_tables {
            tables.entry(id).or_insert_with(DiningTable::free);
        }
        for (id, table) in tables.iter_mut() {
            if !table.is_consistent() {
                let recomputed = lines_total(&table.items);
                tracing::warn!(
                    table_id = id,
                    stored = %table.total,
                    recomputed = %recomputed,
                    "Persisted table total out of sync, recomputing"
                );
                table.total = recomputed;
            }
        }
        Self {
            tables,
            total_tables,
        }
    }

    pub fn total_tables(&self) -> u32 {
        self.total_tables
    }

    /// Whether `table_id` is a configured table number
    pub fn is_valid_id(&self, table_id: u32) -> bool {
        (1..=self.total_tables).contains(&table_id)
    }

    pub fn get(&self, table_id: u32) -> Option<&DiningTable> {
        self.tables.get(&table_id)
    }

    pub fn all(&self) -> &BTreeMap<u32, DiningTable> {
        &self.tables
    }

    pub fn occupied(&self) -> impl Iterator<Item = (u32, &DiningTable)> {
        self.tables
            .iter()
            .filter(|(_, t)| !t.is_free())
            .map(|(id, t)| (*id, t))
    }

    pub fn is_occupied(&self, table_id: u32) -> bool {
        self.tables.get(&table_id).is_some_and(|t| !t.is_free())
    }

    /// Merge an order into the table's tab.
    ///
    /// A free (or absent) table starts from empty accumulators. Items and total
    /// accumulate; party counts are overwritten by the latest submission.
    pub fn accumulate(&mut self, table_id: u32, lines: &[CartLine], party: PartySize) -> &DiningTable {
        let table = self.tables.entry(table_id).or_insert_with(DiningTable::free);
        if table.is_free() {
            *table = DiningTable::free();
        }
        table.items.extend_from_slice(lines);
        table.total += lines_total(lines);
        table.adults = party.adults;
        table.children = party.children;
        table.status = TableStatus::Occupied;
        table
    }

    /// Free an occupied table, returning the tab as it was
    pub fn close(&mut self, table_id: u32) -> Result<DiningTable, Decline> {
        match self.tables.get_mut(&table_id) {
            Some(table) if !table.is_free() => Ok(std::mem::replace(table, DiningTable::free())),
            _ => Err(Decline::TableNotOccupied(table_id)),
        }
    }

    /// Free every table, configured or not
    pub fn reset_all(&mut self) {
        for table in self.tables.values_mut() {
            *table = DiningTable::free();
        }
        for id in 1..=self.total_tables {
            self.tables.entry(id).or_insert_with(DiningTable::free);
        }
    }

    /// Every table's total matches its items
    pub fn is_consistent(&self) -> bool {
        self.tables.values().all(DiningTable::is_consistent)
    }
}
