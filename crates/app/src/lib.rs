//! Application layer: the dashboard service.
//!
//! Ties the store, the aggregator and the notification bus together. All
//! reads are served from an in-memory snapshot that is re-fetched in full
//! after every mutation — consistency by re-reading the source of truth, not
//! by incremental cache patching.

pub mod dashboard;
pub mod service;

pub use dashboard::DashboardStats;
pub use service::{AppError, AppResult, InventoryService};
