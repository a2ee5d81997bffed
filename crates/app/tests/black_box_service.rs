//! Black-box tests driving the service through its public API only.

use std::sync::Arc;

use chrono::NaiveDate;

use kaawa_app::{AppError, InventoryService};
use kaawa_core::{DomainError, Money};
use kaawa_notify::{InMemoryNotificationBus, Notification, NotificationBus, NotificationKind};
use kaawa_reports::{DateRange, UNKNOWN_PRODUCT};
use kaawa_store::{InMemoryDatastore, seed};

fn day(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn seeded_service() -> (
    InventoryService<InMemoryDatastore>,
    kaawa_notify::Subscription<Notification>,
) {
    let store = seed::seeded_datastore().unwrap();
    let bus: Arc<InMemoryNotificationBus<Notification>> = Arc::new(InMemoryNotificationBus::new());
    let toasts = bus.subscribe();
    let service = InventoryService::new(store, bus).unwrap();
    (service, toasts)
}

#[test]
fn snapshot_loads_on_construction() {
    let (service, _toasts) = seeded_service();
    assert_eq!(service.products().len(), 4);
    assert_eq!(service.suppliers().len(), 2);
    assert_eq!(service.entries().len(), 2);
    assert_eq!(service.exits().len(), 2);
}

#[test]
fn mutation_refetches_the_snapshot() {
    let (mut service, _toasts) = seeded_service();
    let beans = service.search_products("CAF001")[0].id_typed();

    service
        .record_entry(beans, day("2024-02-01"), 25, None)
        .unwrap();

    // The new row is visible without any manual refresh call.
    assert_eq!(service.entries().len(), 3);
    assert_eq!(service.stock()[&beans].display, 30); // 10 in - 5 out + 25 in
}

#[test]
fn mutations_publish_outcome_notifications() {
    let (mut service, toasts) = seeded_service();
    let beans = service.search_products("CAF001")[0].id_typed();

    service
        .record_exit(beans, day("2024-02-02"), 1, "Ana García", None)
        .unwrap();
    let err = service
        .record_exit(beans, day("2024-02-02"), 0, "Ana García", None)
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Domain(DomainError::Validation(_))
    ));

    let messages = toasts.drain();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].kind, NotificationKind::Success);
    assert_eq!(messages[0].message, "exit recorded");
    assert_eq!(messages[1].kind, NotificationKind::Error);
    assert!(messages[1].message.contains("positive integer"));
}

#[test]
fn rejects_movements_for_unknown_products() {
    let (mut service, _toasts) = seeded_service();
    let ghost = kaawa_core::ProductId::new();

    let err = service
        .record_entry(ghost, day("2024-02-01"), 10, None)
        .unwrap_err();
    assert!(matches!(err, AppError::Domain(DomainError::NotFound)));
}

#[test]
fn duplicate_product_code_is_rejected_by_the_store() {
    let (mut service, toasts) = seeded_service();

    let err = service
        .create_product(
            "CAF001",
            "Otro café",
            Money::from_cents(100),
            Money::from_cents(200),
            None,
            None,
            None,
        )
        .unwrap_err();
    assert!(matches!(err, AppError::Store(_)));
    assert_eq!(toasts.drain()[0].kind, NotificationKind::Error);
}

#[test]
fn deleting_a_product_orphans_its_ledger_rows() {
    let (mut service, _toasts) = seeded_service();
    let beans = service.search_products("CAF001")[0].id_typed();

    service.delete_product(beans).unwrap();
    assert_eq!(service.products().len(), 3);
    // The ledger still holds the rows; reports resolve them to the sentinel.
    assert_eq!(service.entries().len(), 2);

    let report = service.period_report(
        DateRange::new(day("2024-01-01"), day("2024-12-31")).unwrap(),
    );
    assert!(
        report
            .entries
            .iter()
            .any(|line| line.product_name == UNKNOWN_PRODUCT)
    );
}

#[test]
fn dashboard_reflects_seeded_stock() {
    let (service, _toasts) = seeded_service();
    let stats = service.dashboard();

    // Seed stock: CAF001 10-5=5, FIL002 50, ORG003 0-2 => 0, TAC004 0.
    assert_eq!(stats.total_units, 55);
    // CAF001 (5 <= 5), ORG003 (0), TAC004 (0 <= 20) are low; FIL002 is not.
    let codes: Vec<_> = stats.low_stock.iter().map(|p| p.code()).collect();
    assert_eq!(codes.len(), 3);
    assert!(!codes.contains(&"FIL002"));
    // 5 * $150.00 + 50 * $20.00 = $750.00 + $1,000.00
    assert_eq!(stats.total_cost_value, Money::from_cents(175_000));
}

#[test]
fn period_report_margin_over_seed_data() {
    let (service, _toasts) = seeded_service();
    let report = service.period_report(
        DateRange::new(day("2024-01-14"), day("2024-01-20")).unwrap(),
    );

    assert_eq!(report.total_entry_count, 2);
    assert_eq!(report.total_exit_count, 2);
    // Entries: 10*$150 + 50*$20 = $2,500. Exits: 5*$250 + 2*$350 = $1,950.
    assert_eq!(report.total_entry_cost, Money::from_cents(250_000));
    assert_eq!(report.total_sales_revenue, Money::from_cents(195_000));
    assert_eq!(report.margin_cents, -55_000);
}

#[test]
fn search_filters_the_snapshot() {
    let (service, _toasts) = seeded_service();
    assert_eq!(service.search_products("café").len(), 2);
    assert_eq!(service.search_suppliers("import").len(), 1);
    assert_eq!(service.search_exits("bar").len(), 1);
}

#[test]
fn ledger_deletion_is_a_retroactive_correction() {
    let (mut service, _toasts) = seeded_service();
    let beans = service.search_products("CAF001")[0].id_typed();
    let before = service.stock()[&beans].display;

    let exit_id = service.exits()[0].id_typed();
    service.delete_exit(exit_id).unwrap();

    assert_eq!(service.stock()[&beans].display, before + 5);
}

#[test]
fn dropped_toast_subscription_stops_receiving() {
    let store = seed::seeded_datastore().unwrap();
    let bus: Arc<InMemoryNotificationBus<Notification>> = Arc::new(InMemoryNotificationBus::new());
    let dropped = bus.subscribe();
    drop(dropped);

    let mut service = InventoryService::new(store, bus.clone()).unwrap();
    let beans = service.search_products("CAF001")[0].id_typed();
    service
        .record_entry(beans, day("2024-02-01"), 1, None)
        .unwrap();

    // A fresh subscription only sees messages published after it exists.
    let late = bus.subscribe();
    assert!(late.try_recv().is_err());
}
