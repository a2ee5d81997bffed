//! Inventory valuations and top-N rankings.
//!
//! All rankings break ties by ascending product id so repeated calls over the
//! same snapshot produce identical orderings.

use std::collections::HashMap;

use serde::Serialize;

use kaawa_catalog::Product;
use kaawa_core::{Money, ProductId};
use kaawa_movements::{Entry, Exit};

use crate::period::UNKNOWN_PRODUCT;
use crate::stock::compute_stock;

/// Ranking row: a product with its total exit quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExitRanking {
    pub product_id: ProductId,
    pub product_name: String,
    pub total_exit_quantity: u64,
    pub display_stock: u64,
}

/// Ranking row: a product with its stock valuation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValuationRanking {
    pub product_id: ProductId,
    pub product_name: String,
    pub display_stock: u64,
    pub total_value: Money,
}

/// Ranking row: a product with its combined entry+exit movement volume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovementRanking {
    pub product_id: ProductId,
    pub product_name: String,
    pub total_movements: u64,
}

/// Inventory investment view: Σ displayed stock × unit cost.
pub fn total_cost_value(products: &[Product], entries: &[Entry], exits: &[Exit]) -> Money {
    let stock = compute_stock(products, entries, exits);
    products
        .iter()
        .map(|p| {
            let display = stock.get(&p.id_typed()).map(|s| s.display).unwrap_or(0);
            p.unit_cost().times(display)
        })
        .sum()
}

/// Retail value view: Σ displayed stock × unit sale price.
pub fn total_retail_value(products: &[Product], entries: &[Entry], exits: &[Exit]) -> Money {
    let stock = compute_stock(products, entries, exits);
    products
        .iter()
        .map(|p| {
            let display = stock.get(&p.id_typed()).map(|s| s.display).unwrap_or(0);
            p.unit_price().times(display)
        })
        .sum()
}

/// Top `n` products by total exit quantity, descending.
///
/// Every catalog product participates (a product with no exits ranks with
/// zero), matching the dashboard's behavior on sparse data.
pub fn top_moved(products: &[Product], entries: &[Entry], exits: &[Exit], n: usize) -> Vec<ExitRanking> {
    let stock = compute_stock(products, entries, exits);

    let mut totals: HashMap<ProductId, u64> = HashMap::new();
    for exit in exits {
        *totals.entry(exit.product_id()).or_insert(0) += exit.quantity().as_u64();
    }

    let mut rows: Vec<ExitRanking> = products
        .iter()
        .map(|p| ExitRanking {
            product_id: p.id_typed(),
            product_name: p.name().to_string(),
            total_exit_quantity: totals.get(&p.id_typed()).copied().unwrap_or(0),
            display_stock: stock.get(&p.id_typed()).map(|s| s.display).unwrap_or(0),
        })
        .collect();

    rows.sort_by(|a, b| {
        b.total_exit_quantity
            .cmp(&a.total_exit_quantity)
            .then(a.product_id.cmp(&b.product_id))
    });
    rows.truncate(n);
    rows
}

fn top_valued_by<F>(
    products: &[Product],
    entries: &[Entry],
    exits: &[Exit],
    n: usize,
    unit_value: F,
) -> Vec<ValuationRanking>
where
    F: Fn(&Product) -> Money,
{
    let stock = compute_stock(products, entries, exits);

    let mut rows: Vec<ValuationRanking> = products
        .iter()
        .map(|p| {
            let display = stock.get(&p.id_typed()).map(|s| s.display).unwrap_or(0);
            ValuationRanking {
                product_id: p.id_typed(),
                product_name: p.name().to_string(),
                display_stock: display,
                total_value: unit_value(p).times(display),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.total_value
            .cmp(&a.total_value)
            .then(a.product_id.cmp(&b.product_id))
    });
    rows.truncate(n);
    rows
}

/// Top `n` products by displayed stock × unit cost (cost exposure).
pub fn top_by_cost_exposure(
    products: &[Product],
    entries: &[Entry],
    exits: &[Exit],
    n: usize,
) -> Vec<ValuationRanking> {
    top_valued_by(products, entries, exits, n, Product::unit_cost)
}

/// Top `n` products by displayed stock × unit sale price (retail value).
pub fn top_by_retail_value(
    products: &[Product],
    entries: &[Entry],
    exits: &[Exit],
    n: usize,
) -> Vec<ValuationRanking> {
    top_valued_by(products, entries, exits, n, Product::unit_price)
}

/// The product with the highest combined entry+exit volume, if any movement
/// exists. A movement whose product was deleted still counts; its name
/// resolves to the unknown-product sentinel.
pub fn most_moved(
    products: &[Product],
    entries: &[Entry],
    exits: &[Exit],
) -> Option<MovementRanking> {
    let mut totals: HashMap<ProductId, u64> = HashMap::new();
    for entry in entries {
        *totals.entry(entry.product_id()).or_insert(0) += entry.quantity().as_u64();
    }
    for exit in exits {
        *totals.entry(exit.product_id()).or_insert(0) += exit.quantity().as_u64();
    }

    let (&product_id, &total_movements) = totals
        .iter()
        .max_by(|(id_a, qty_a), (id_b, qty_b)| qty_a.cmp(qty_b).then(id_b.cmp(id_a)))?;

    let product_name = products
        .iter()
        .find(|p| p.id_typed() == product_id)
        .map(|p| p.name().to_string())
        .unwrap_or_else(|| UNKNOWN_PRODUCT.to_string());

    Some(MovementRanking {
        product_id,
        product_name,
        total_movements,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use kaawa_core::{EntryId, ExitId};
    use uuid::Uuid;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn product_with_id(n: u128, code: &str, cost: u64, price: u64) -> Product {
        Product::new(
            ProductId::from_uuid(Uuid::from_u128(n)),
            code,
            format!("Product {code}"),
            Money::from_cents(cost),
            Money::from_cents(price),
        )
        .unwrap()
    }

    fn entry(product_id: ProductId, qty: i64) -> Entry {
        Entry::new(EntryId::new(), product_id, day("2024-10-01"), qty).unwrap()
    }

    fn exit(product_id: ProductId, qty: i64) -> Exit {
        Exit::new(ExitId::new(), product_id, day("2024-10-10"), qty, "Ana García").unwrap()
    }

    #[test]
    fn cost_and_retail_values_over_partial_stock() {
        let p = product_with_id(1, "CAF001", 12_050, 20_000);
        let id = p.id_typed();
        let entries = vec![entry(id, 100)];
        let exits = vec![exit(id, 20)];

        let products = vec![p];
        // 80 units * $120.50 == $9,640.00
        assert_eq!(
            total_cost_value(&products, &entries, &exits),
            Money::from_cents(964_000)
        );
        assert_eq!(
            total_retail_value(&products, &entries, &exits),
            Money::from_cents(1_600_000)
        );
    }

    #[test]
    fn negative_stock_contributes_nothing_to_value() {
        let p = product_with_id(1, "CAF001", 12_050, 20_000);
        let exits = vec![exit(p.id_typed(), 5)];

        let products = vec![p];
        assert_eq!(total_cost_value(&products, &[], &exits), Money::ZERO);
    }

    #[test]
    fn top_moved_ranks_by_exit_quantity() {
        let a = product_with_id(1, "CAF001", 100, 200);
        let b = product_with_id(2, "FIL002", 100, 200);
        let exits = vec![exit(a.id_typed(), 3), exit(b.id_typed(), 9)];

        let products = vec![a.clone(), b.clone()];
        let top = top_moved(&products, &[], &exits, 5);
        assert_eq!(top[0].product_id, b.id_typed());
        assert_eq!(top[0].total_exit_quantity, 9);
        assert_eq!(top[1].product_id, a.id_typed());
    }

    #[test]
    fn top_moved_breaks_ties_by_ascending_product_id() {
        let a = product_with_id(1, "CAF001", 100, 200);
        let b = product_with_id(2, "FIL002", 100, 200);
        let exits = vec![exit(b.id_typed(), 4), exit(a.id_typed(), 4)];

        let products = vec![b.clone(), a.clone()];
        let top = top_moved(&products, &[], &exits, 5);
        assert_eq!(top[0].product_id, a.id_typed());
        assert_eq!(top[1].product_id, b.id_typed());

        // Deterministic across repeated calls.
        assert_eq!(top, top_moved(&products, &[], &exits, 5));
    }

    #[test]
    fn top_rankings_use_the_requested_unit_value() {
        // Same stock, inverted cost/price relationship.
        let cheap_to_buy = product_with_id(1, "CAF001", 100, 90_000);
        let dear_to_buy = product_with_id(2, "ORG003", 80_000, 200);
        let entries = vec![entry(cheap_to_buy.id_typed(), 10), entry(dear_to_buy.id_typed(), 10)];

        let products = vec![cheap_to_buy.clone(), dear_to_buy.clone()];
        let by_cost = top_by_cost_exposure(&products, &entries, &[], 1);
        let by_retail = top_by_retail_value(&products, &entries, &[], 1);

        assert_eq!(by_cost[0].product_id, dear_to_buy.id_typed());
        assert_eq!(by_retail[0].product_id, cheap_to_buy.id_typed());
    }

    #[test]
    fn most_moved_combines_entries_and_exits() {
        let a = product_with_id(1, "CAF001", 100, 200);
        let b = product_with_id(2, "FIL002", 100, 200);
        // a: 10 in; b: 4 in + 7 out = 11 moved.
        let entries = vec![entry(a.id_typed(), 10), entry(b.id_typed(), 4)];
        let exits = vec![exit(b.id_typed(), 7)];

        let products = vec![a, b.clone()];
        let top = most_moved(&products, &entries, &exits).unwrap();
        assert_eq!(top.product_id, b.id_typed());
        assert_eq!(top.total_movements, 11);
    }

    #[test]
    fn most_moved_is_none_without_movements() {
        let products = vec![product_with_id(1, "CAF001", 100, 200)];
        assert!(most_moved(&products, &[], &[]).is_none());
    }

    #[test]
    fn most_moved_resolves_deleted_product_to_sentinel() {
        let orphan = ProductId::from_uuid(Uuid::from_u128(9));
        let entries = vec![entry(orphan, 30)];

        let top = most_moved(&[], &entries, &[]).unwrap();
        assert_eq!(top.product_name, UNKNOWN_PRODUCT);
        assert_eq!(top.total_movements, 30);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Valuation is linear: the total equals the sum of per-product
            /// displayed stock × unit cost.
            #[test]
            fn total_value_is_sum_of_parts(
                stocks in proptest::collection::vec((1i64..500, 1u64..10_000), 1..8),
            ) {
                let mut products = Vec::new();
                let mut entries = Vec::new();
                for (i, &(qty, cost)) in stocks.iter().enumerate() {
                    let p = product_with_id(i as u128 + 1, "GEN000", cost, cost * 2);
                    entries.push(entry(p.id_typed(), qty));
                    products.push(p);
                }

                let expected: u64 = stocks
                    .iter()
                    .map(|&(qty, cost)| qty as u64 * cost)
                    .sum();
                prop_assert_eq!(
                    total_cost_value(&products, &entries, &[]),
                    Money::from_cents(expected)
                );
            }
        }
    }
}
