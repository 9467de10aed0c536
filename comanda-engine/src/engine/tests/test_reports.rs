use super::*;

#[test]
fn test_sold_report_after_closures() {
    let mut engine = create_test_engine();
    place(&mut engine, 1, &["emp", "coke", "emp"]);
    place(&mut engine, 2, &["coke"]);
    engine.close_table(1).unwrap();
    engine.close_table(2).unwrap();

    let report = engine.sold_report();
    assert_eq!(report.len(), 2);
    assert_eq!(report[0].item_id, "emp");
    assert_eq!(report[0].quantity, 2);
    assert_eq!(report[0].revenue, dec(2400));
    assert_eq!(report[1].item_id, "coke");
    assert_eq!(report[1].quantity, 2);
    assert_eq!(report[1].revenue, dec(4000));
}

#[test]
fn test_open_tables_are_not_sold_yet() {
    let mut engine = create_test_engine();
    place(&mut engine, 1, &["emp"]);
    assert!(engine.sold_report().is_empty());
    assert_eq!(engine.daily_summary().open_tables, 1);
}

#[test]
fn test_beverage_stock_report() {
    let mut engine = create_test_engine();
    place(&mut engine, 1, &["coke", "coke", "emp"]);
    place(&mut engine, 2, &["agua"]);
    engine.close_table(1).unwrap();

    let report = engine.beverage_stock_report();
    assert_eq!(report.len(), 2);

    let coke = &report[0];
    assert_eq!(coke.item_id, "coke");
    assert_eq!(coke.current_stock, 3);
    assert_eq!(coke.sold_today, 2);
    assert_eq!(coke.total_stock, 5);

    // Table 2 still open: its agua left stock but is not sold yet
    let agua = &report[1];
    assert_eq!(agua.current_stock, 2);
    assert_eq!(agua.sold_today, 0);
    assert_eq!(agua.total_stock, 2);
}

#[test]
fn test_beverage_report_without_category() {
    let menu = Menu {
        categories: vec![Category {
            id: "food".into(),
            name: "Comidas".into(),
            items: vec![MenuItem::new("emp", "Empanada", dec(1200), 3)],
        }],
    };
    let engine = PosEngine::with_menu(menu, 4);
    assert!(engine.beverage_stock_report().is_empty());
}

#[test]
fn test_daily_summary() {
    let mut engine = create_test_engine();
    engine.add_to_cart("emp").unwrap();
    engine.place_order(1, "2", "1").unwrap();
    engine.add_to_cart("coke").unwrap();
    engine.place_order(2, "1", "0").unwrap();
    place(&mut engine, 3, &["agua"]);
    engine.close_table(1).unwrap();
    engine.close_table(2).unwrap();

    let summary = engine.daily_summary();
    assert_eq!(summary.sale_count, 2);
    assert_eq!(summary.revenue, dec(3200));
    assert_eq!(summary.adults, 3);
    assert_eq!(summary.children, 1);
    assert_eq!(summary.covers(), 4);
    assert_eq!(summary.average_ticket(), Some(dec(1600)));
    assert_eq!(summary.open_tables, 1);
    assert_eq!(summary.active_orders, 1);
}

#[test]
fn test_empty_day_summary() {
    let engine = create_test_engine();
    let summary = engine.daily_summary();
    assert_eq!(summary, DailySummary::default());
    assert_eq!(summary.average_ticket(), None);
}
