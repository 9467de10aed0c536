use super::*;
use rust_decimal::Decimal;
use shared::models::{Category, OrderStatus, TableStatus};

// ========================================================================
// Helpers
// ========================================================================

fn dec(n: i64) -> Decimal {
    Decimal::from(n)
}

/// Two categories: food (item "a" has price 500, stock 2) and beverages
fn test_menu() -> Menu {
    Menu {
        categories: vec![
            Category {
                id: "food".into(),
                name: "Comidas".into(),
                items: vec![
                    MenuItem::new("a", "Item A", dec(500), 2),
                    MenuItem::new("emp", "Empanada", dec(1200), 10),
                    MenuItem::new("flan", "Flan", Decimal::new(35005, 1), 0),
                ],
            },
            Category {
                id: "beverages".into(),
                name: "Bebidas".into(),
                items: vec![
                    MenuItem::new("coke", "Coca-Cola", dec(2000), 5),
                    MenuItem::new("agua", "Agua", dec(1500), 3),
                ],
            },
        ],
    }
}

fn create_test_engine() -> PosEngine {
    PosEngine::with_menu(test_menu(), 10)
}

/// Add `item_id` `n` times, returning how many adds succeeded
fn add_times(engine: &mut PosEngine, item_id: &str, n: usize) -> usize {
    (0..n)
        .filter(|_| engine.add_to_cart(item_id).is_ok())
        .count()
}

/// Fill the cart and place it for two adults
fn place(engine: &mut PosEngine, table_id: u32, items: &[&str]) -> Order {
    for id in items {
        engine.add_to_cart(id).unwrap();
    }
    engine.place_order(table_id, "2", "0").unwrap()
}

fn drain(rx: &mut broadcast::Receiver<StateEvent>) -> Vec<StateEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

fn stock(engine: &PosEngine, item_id: &str) -> i32 {
    engine.find_item(item_id).unwrap().stock
}

fn assert_tables_consistent(engine: &PosEngine) {
    for (id, table) in engine.tables() {
        assert!(table.is_consistent(), "table {} total drifted", id);
        if table.is_free() {
            assert_eq!(table, &DiningTable::free(), "free table {} not empty", id);
        }
    }
}

fn decline_of(err: EngineError) -> Decline {
    match err {
        EngineError::Declined(decline) => decline,
        other => panic!("expected decline, got {other}"),
    }
}

mod test_reports;
