//! OrderLedger - active kitchen orders

use chrono::Utc;
use shared::models::{CartLine, Order, OrderStatus};
use shared::util::next_unique_id;

#[derive(Debug, Clone, Default)]
pub struct OrderLedger {
    orders: Vec<Order>,
    /// Last issued id, keeps ids unique within one millisecond
    last_id: i64,
}

impl OrderLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted orders
    pub fn from_orders(orders: Vec<Order>) -> Self {
        let last_id = orders.iter().map(|o| o.id).max().unwrap_or(0);
        Self { orders, last_id }
    }

    /// New pending order for `table_id` holding a copy of `items`
    pub fn create(&mut self, table_id: u32, items: Vec<CartLine>) -> &Order {
        let order = Order {
            id: next_unique_id(&mut self.last_id),
            table_id,
            items,
            status: OrderStatus::Pending,
            timestamp: Utc::now(),
        };
        self.orders.push(order);
        &self.orders[self.orders.len() - 1]
    }

    pub fn get(&self, order_id: i64) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == order_id)
    }

    /// `pending → ready`. Returns true only when the status actually changed;
    /// unknown ids and already-ready orders are left alone.
    pub fn mark_ready(&mut self, order_id: i64) -> bool {
        match self.orders.iter_mut().find(|o| o.id == order_id) {
            Some(order) if order.status == OrderStatus::Pending => {
                order.status = OrderStatus::Ready;
                true
            }
            _ => false,
        }
    }

    /// Drop every order of a table, whatever its status. Returns how many.
    pub fn remove_for_table(&mut self, table_id: u32) -> usize {
        let before = self.orders.len();
        self.orders.retain(|o| o.table_id != table_id);
        before - self.orders.len()
    }

    pub fn clear(&mut self) {
        self.orders.clear();
    }

    pub fn all(&self) -> &[Order] {
        &self.orders
    }

    pub fn for_table(&self, table_id: u32) -> impl Iterator<Item = &Order> {
        self.orders.iter().filter(move |o| o.table_id == table_id)
    }

    /// Pending orders, oldest first
    pub fn kitchen_queue(&self) -> Vec<&Order> {
        let mut pending: Vec<&Order> = self.orders.iter().filter(|o| o.is_pending()).collect();
        pending.sort_by_key(|o| (o.timestamp, o.id));
        pending
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn line(id: &str) -> CartLine {
        CartLine {
            id: id.into(),
            name: id.into(),
            price: Decimal::from(100),
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let mut ledger = OrderLedger::new();
        let ids: Vec<i64> = (0..200).map(|_| ledger.create(1, vec![line("a")]).id).collect();
        let mut dedup = ids.clone();
        dedup.sort();
        dedup.dedup();
        assert_eq!(dedup.len(), ids.len());
    }

    #[test]
    fn test_ids_continue_after_reload() {
        let mut ledger = OrderLedger::new();
        let first = ledger.create(1, vec![line("a")]).id;
        let mut reloaded = OrderLedger::from_orders(ledger.all().to_vec());
        let second = reloaded.create(2, vec![line("b")]).id;
        assert!(second > first);
    }

    #[test]
    fn test_mark_ready() {
        let mut ledger = OrderLedger::new();
        let id = ledger.create(1, vec![line("a")]).id;
        assert!(ledger.mark_ready(id));
        assert_eq!(ledger.get(id).unwrap().status, OrderStatus::Ready);
        // no way back, and a second call changes nothing
        assert!(!ledger.mark_ready(id));
        assert_eq!(ledger.get(id).unwrap().status, OrderStatus::Ready);
        assert!(!ledger.mark_ready(id + 1));
    }

    #[test]
    fn test_remove_for_table_ignores_status() {
        let mut ledger = OrderLedger::new();
        let a = ledger.create(3, vec![line("a")]).id;
        ledger.create(3, vec![line("b")]);
        ledger.create(4, vec![line("c")]);
        ledger.mark_ready(a);

        assert_eq!(ledger.remove_for_table(3), 2);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.for_table(4).count(), 1);
        assert_eq!(ledger.remove_for_table(3), 0);
    }

    #[test]
    fn test_kitchen_queue_only_pending() {
        let mut ledger = OrderLedger::new();
        let a = ledger.create(1, vec![line("a")]).id;
        let b = ledger.create(2, vec![line("b")]).id;
        let c = ledger.create(3, vec![line("c")]).id;
        ledger.mark_ready(b);
        let queue: Vec<i64> = ledger.kitchen_queue().iter().map(|o| o.id).collect();
        assert_eq!(queue, vec![a, c]);
    }
}
