//! MenuStore - menu categories and per-item stock

use shared::models::{Category, Menu, MenuItem};
use shared::util::parse_int_lenient;

/// Owns the menu; the only place stock counters change.
///
/// Availability checks and decrements are separate calls. That is safe while
/// a single writer owns the engine; a multi-session build needs a combined
/// compare-and-decrement here instead.
#[derive(Debug, Clone)]
pub struct MenuStore {
    menu: Menu,
}

impl MenuStore {
    pub fn new(menu: Menu) -> Self {
        let dups = menu.duplicate_ids();
        if !dups.is_empty() {
            tracing::warn!(ids = ?dups, "Menu has duplicate item ids, first match wins");
        }
        Self { menu }
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.menu.category(id)
    }

    /// Linear scan across categories. Not finding an id is a normal outcome.
    pub fn find_item(&self, id: &str) -> Option<&MenuItem> {
        self.menu.items().find(|item| item.id == id)
    }

    fn find_item_mut(&mut self, id: &str) -> Option<&mut MenuItem> {
        self.menu
            .categories
            .iter_mut()
            .flat_map(|c| c.items.iter_mut())
            .find(|item| item.id == id)
    }

    pub fn stock_of(&self, id: &str) -> Option<i32> {
        self.find_item(id).map(|item| item.stock)
    }

    /// Take one unit, unconditionally. Returns whether the id exists.
    pub fn decrement_stock(&mut self, id: &str) -> bool {
        match self.find_item_mut(id) {
            Some(item) => {
                item.stock -= 1;
                if item.stock < 0 {
                    tracing::warn!(item_id = %id, stock = item.stock, "Stock went negative");
                }
                true
            }
            None => false,
        }
    }

    /// Manual stock edit from raw input. Returns whether the id was found.
    pub fn set_stock(&mut self, id: &str, raw: &str) -> bool {
        let value = parse_stock(raw);
        match self.find_item_mut(id) {
            Some(item) => {
                item.stock = value;
                true
            }
            None => false,
        }
    }
}

/// `parseInt`-style stock input, defaulting to 0 and clamped at 0
pub fn parse_stock(raw: &str) -> i32 {
    parse_int_lenient(raw)
        .map(|n| n.clamp(0, i32::MAX as i64) as i32)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn store() -> MenuStore {
        MenuStore::new(Menu {
            categories: vec![
                Category {
                    id: "food".into(),
                    name: "Comidas".into(),
                    items: vec![MenuItem::new("emp", "Empanada", Decimal::from(800), 12)],
                },
                Category {
                    id: "beverages".into(),
                    name: "Bebidas".into(),
                    items: vec![
                        MenuItem::new("coke", "Coca-Cola", Decimal::from(1500), 2),
                        MenuItem::new("emp", "Shadowed", Decimal::from(1), 99),
                    ],
                },
            ],
        })
    }

    #[test]
    fn test_find_item() {
        let store = store();
        assert_eq!(store.find_item("coke").map(|i| i.stock), Some(2));
        assert!(store.find_item("nope").is_none());
        // first match wins on duplicated ids
        assert_eq!(store.find_item("emp").map(|i| i.name.as_str()), Some("Empanada"));
    }

    #[test]
    fn test_decrement_is_unconditional() {
        let mut store = store();
        assert!(store.decrement_stock("coke"));
        assert!(store.decrement_stock("coke"));
        assert!(store.decrement_stock("coke"));
        assert_eq!(store.stock_of("coke"), Some(-1));
        assert!(!store.decrement_stock("nope"));
    }

    #[test]
    fn test_decrement_touches_first_match_only() {
        let mut store = store();
        store.decrement_stock("emp");
        assert_eq!(store.stock_of("emp"), Some(11));
        let shadowed = store.category("beverages").unwrap().items[1].stock;
        assert_eq!(shadowed, 99);
    }

    #[test]
    fn test_set_stock() {
        let mut store = store();
        assert!(store.set_stock("coke", "24"));
        assert_eq!(store.stock_of("coke"), Some(24));
        assert!(store.set_stock("coke", "-5"));
        assert_eq!(store.stock_of("coke"), Some(0));
        assert!(store.set_stock("coke", "ten"));
        assert_eq!(store.stock_of("coke"), Some(0));
        assert!(store.set_stock("coke", "7 cajas"));
        assert_eq!(store.stock_of("coke"), Some(7));
        assert!(!store.set_stock("nope", "3"));
    }

    #[test]
    fn test_parse_stock() {
        assert_eq!(parse_stock(""), 0);
        assert_eq!(parse_stock("3.9"), 3);
        assert_eq!(parse_stock("99999999999"), i32::MAX);
        assert_eq!(parse_stock("99999999999999999999"), i32::MAX);
        assert_eq!(parse_stock("-99999999999999999999"), 0);
    }
}
