use std::sync::Arc;

use chrono::Local;

use kaawa_app::InventoryService;
use kaawa_notify::{InMemoryNotificationBus, Notification, NotificationBus};
use kaawa_reports::DateRange;

fn main() -> anyhow::Result<()> {
    kaawa_observability::init();

    let store = kaawa_store::seed::seeded_datastore()?;
    let bus: Arc<InMemoryNotificationBus<Notification>> = Arc::new(InMemoryNotificationBus::new());
    let toasts = bus.subscribe();

    let mut service = InventoryService::new(store, bus)?;

    // Walk the seeded café through a day of movements.
    let today = Local::now().date_naive();
    let beans = service
        .search_products("CAF001")
        .first()
        .map(|p| p.id_typed())
        .ok_or_else(|| anyhow::anyhow!("seed dataset is missing CAF001"))?;

    service.record_entry(beans, today, 25, None)?;
    service.record_exit(beans, today, 8, "Ana García", Some("Bar".to_string()))?;

    let stats = service.dashboard();
    tracing::info!(
        total_units = stats.total_units,
        low_stock = stats.low_stock.len(),
        total_cost_value = %stats.total_cost_value,
        "dashboard"
    );
    println!("{}", serde_json::to_string_pretty(&stats)?);

    let range = DateRange::new(today, today).expect("single-day range is valid");
    let report = service.period_report(range);
    tracing::info!(
        entries = report.total_entry_count,
        exits = report.total_exit_count,
        margin_cents = report.margin_cents,
        "period report"
    );
    println!("{}", serde_json::to_string_pretty(&report)?);

    for toast in toasts.drain() {
        tracing::info!(kind = ?toast.kind, message = toast.message, "notification");
    }

    Ok(())
}
