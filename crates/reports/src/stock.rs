//! Stock-on-hand computation and low-stock detection.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use kaawa_catalog::Product;
use kaawa_core::ProductId;
use kaawa_movements::{Entry, Exit};

/// Derived stock level for one product.
///
/// `raw` may be negative when the ledger records more exits than entries —
/// a data-entry inconsistency operators need to see. `display` is the
/// floor-clamped variant most surfaces render. Neither is ever stored.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct StockInfo {
    pub raw: i64,
    pub display: u64,
}

impl StockInfo {
    pub fn from_raw(raw: i64) -> Self {
        Self {
            raw,
            display: raw.max(0) as u64,
        }
    }

    /// Negative raw stock signals inconsistent ledger data.
    pub fn is_negative(&self) -> bool {
        self.raw < 0
    }
}

fn entry_totals(entries: &[Entry]) -> HashMap<ProductId, i64> {
    let mut totals = HashMap::new();
    for entry in entries {
        *totals.entry(entry.product_id()).or_insert(0) += entry.quantity().as_i64();
    }
    totals
}

fn exit_totals(exits: &[Exit]) -> HashMap<ProductId, i64> {
    let mut totals = HashMap::new();
    for exit in exits {
        *totals.entry(exit.product_id()).or_insert(0) += exit.quantity().as_i64();
    }
    totals
}

/// Derive current stock for every product.
///
/// A product with no recorded movements has stock 0. Movements referencing
/// products absent from `products` contribute to no map entry (their product
/// was deleted; the ledger rows remain and are surfaced by period reports).
pub fn compute_stock(
    products: &[Product],
    entries: &[Entry],
    exits: &[Exit],
) -> BTreeMap<ProductId, StockInfo> {
    let entry_totals = entry_totals(entries);
    let exit_totals = exit_totals(exits);

    products
        .iter()
        .map(|product| {
            let id = product.id_typed();
            let raw = entry_totals.get(&id).copied().unwrap_or(0)
                - exit_totals.get(&id).copied().unwrap_or(0);
            (id, StockInfo::from_raw(raw))
        })
        .collect()
}

/// Derive current stock for a single product.
pub fn stock_for(product_id: ProductId, entries: &[Entry], exits: &[Exit]) -> StockInfo {
    let entered: i64 = entries
        .iter()
        .filter(|e| e.product_id() == product_id)
        .map(|e| e.quantity().as_i64())
        .sum();
    let exited: i64 = exits
        .iter()
        .filter(|x| x.product_id() == product_id)
        .map(|x| x.quantity().as_i64())
        .sum();
    StockInfo::from_raw(entered - exited)
}

/// Products whose displayed stock is at or below their low-stock threshold.
///
/// The threshold is the product's own `min_stock` when set, else `fallback`.
/// A product with no movement history has stock 0 and therefore always
/// appears here for any threshold.
pub fn low_stock_products<'a>(
    products: &'a [Product],
    entries: &[Entry],
    exits: &[Exit],
    fallback: u32,
) -> Vec<&'a Product> {
    let stock = compute_stock(products, entries, exits);
    products
        .iter()
        .filter(|product| {
            let info = stock
                .get(&product.id_typed())
                .copied()
                .unwrap_or_default();
            info.display <= u64::from(product.min_stock_or(fallback))
        })
        .collect()
}

/// Total displayed units across the whole catalog (dashboard stock card).
pub fn total_units_on_hand(products: &[Product], entries: &[Entry], exits: &[Exit]) -> u64 {
    compute_stock(products, entries, exits)
        .values()
        .map(|info| info.display)
        .sum()
}
