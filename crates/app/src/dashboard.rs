//! Dashboard statistics derived from one snapshot.

use serde::Serialize;

use kaawa_catalog::{DEFAULT_MIN_STOCK, Product};
use kaawa_core::Money;
use kaawa_movements::{Entry, Exit};
use kaawa_reports::{
    ExitRanking, ValuationRanking, low_stock_products, top_by_retail_value, top_moved,
    total_cost_value, total_units_on_hand,
};

/// How many rows the dashboard ranking cards show.
const TOP_N: usize = 5;

/// The dashboard's headline numbers and ranking cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    /// Total displayed units across the catalog.
    pub total_units: u64,
    /// Products at or below their low-stock threshold.
    pub low_stock: Vec<Product>,
    /// Inventory investment: Σ displayed stock × unit cost.
    pub total_cost_value: Money,
    /// Top products by total exit quantity.
    pub top_exits: Vec<ExitRanking>,
    /// Top products by displayed stock × unit sale price.
    pub top_retail_value: Vec<ValuationRanking>,
}

impl DashboardStats {
    /// Derive all cards from one snapshot. Empty collections produce zeroed
    /// stats and empty lists.
    pub fn derive(products: &[Product], entries: &[Entry], exits: &[Exit]) -> Self {
        Self {
            total_units: total_units_on_hand(products, entries, exits),
            low_stock: low_stock_products(products, entries, exits, DEFAULT_MIN_STOCK)
                .into_iter()
                .cloned()
                .collect(),
            total_cost_value: total_cost_value(products, entries, exits),
            top_exits: top_moved(products, entries, exits, TOP_N),
            top_retail_value: top_by_retail_value(products, entries, exits, TOP_N),
        }
    }
}
