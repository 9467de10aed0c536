//! CartManager - the selection being built for the next order

use crate::engine::Decline;
use rust_decimal::Decimal;
use shared::models::{CartLine, MenuItem, lines_total};

/// Ephemeral, never persisted. Emptied only by a successful placement.
#[derive(Debug, Clone, Default)]
pub struct CartManager {
    lines: Vec<CartLine>,
}

impl CartManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a copy of `item`, gated by its live stock.
    ///
    /// Declined when the item has no stock, or when the cart already holds as
    /// many units of it as there are in stock.
    pub fn add(&mut self, item: &MenuItem) -> Result<(), Decline> {
        if item.stock <= 0 {
            return Err(Decline::OutOfStock {
                item_id: item.id.clone(),
                name: item.name.clone(),
            });
        }
        if self.count_of(&item.id) >= item.stock as usize {
            return Err(Decline::InsufficientStock {
                item_id: item.id.clone(),
                name: item.name.clone(),
                available: item.stock,
            });
        }
        self.lines.push(CartLine::from(item));
        Ok(())
    }

    /// Remove by position; out of range does nothing
    pub fn remove(&mut self, index: usize) -> Option<CartLine> {
        (index < self.lines.len()).then(|| self.lines.remove(index))
    }

    /// Empty the cart, returning its lines
    pub fn take(&mut self) -> Vec<CartLine> {
        std::mem::take(&mut self.lines)
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn count_of(&self, item_id: &str) -> usize {
        self.lines.iter().filter(|l| l.id == item_id).count()
    }

    pub fn total(&self) -> Decimal {
        lines_total(&self.lines)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(stock: i32) -> MenuItem {
        MenuItem::new("A", "Milanesa", Decimal::from(500), stock)
    }

    #[test]
    fn test_add_zero_stock_is_declined() {
        let mut cart = CartManager::new();
        let err = cart.add(&item(0)).unwrap_err();
        assert!(matches!(err, Decline::OutOfStock { .. }));
        assert!(cart.is_empty());

        assert!(cart.add(&item(-1)).is_err());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_succeeds_min_n_s_times() {
        for stock in 0..5 {
            for attempts in 0..7usize {
                let mut cart = CartManager::new();
                let ok = (0..attempts).filter(|_| cart.add(&item(stock)).is_ok()).count();
                assert_eq!(ok, attempts.min(stock as usize), "stock={stock} attempts={attempts}");
                assert_eq!(cart.len(), ok);
            }
        }
    }

    #[test]
    fn test_insufficient_stock_reports_available() {
        let mut cart = CartManager::new();
        cart.add(&item(2)).unwrap();
        cart.add(&item(2)).unwrap();
        assert_eq!(
            cart.add(&item(2)),
            Err(Decline::InsufficientStock {
                item_id: "A".into(),
                name: "Milanesa".into(),
                available: 2,
            })
        );
    }

    #[test]
    fn test_line_is_a_copy() {
        let mut cart = CartManager::new();
        let mut menu_item = item(3);
        cart.add(&menu_item).unwrap();
        menu_item.price = Decimal::from(9999);
        menu_item.name = "Renamed".into();
        assert_eq!(cart.lines()[0].price, Decimal::from(500));
        assert_eq!(cart.lines()[0].name, "Milanesa");
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut cart = CartManager::new();
        cart.add(&item(3)).unwrap();
        assert!(cart.remove(5).is_none());
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.remove(0).map(|l| l.id), Some("A".to_string()));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total_and_take() {
        let mut cart = CartManager::new();
        cart.add(&item(3)).unwrap();
        cart.add(&MenuItem::new("B", "Agua", Decimal::new(12050, 2), 1)).unwrap();
        assert_eq!(cart.total(), Decimal::new(62050, 2));
        let lines = cart.take();
        assert_eq!(lines.len(), 2);
        assert!(cart.is_empty());
    }
}
