//! Period-bounded movement reports.
//!
//! A report covers every movement whose calendar date falls inside an
//! inclusive `[start, end]` range. Dates are `NaiveDate` throughout: the
//! wire format is `YYYY-MM-DD` with no time-of-day, so plain date comparison
//! gives exact boundary inclusivity with no timezone off-by-one.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use kaawa_catalog::{Product, Supplier};
use kaawa_core::{DomainError, DomainResult, EntryId, ExitId, Money, ProductId};
use kaawa_movements::{Entry, Exit};

/// Display name for movements whose product has been deleted.
pub const UNKNOWN_PRODUCT: &str = "unknown product";

/// Display name for entries without a resolvable supplier.
pub const NO_SUPPLIER: &str = "no supplier";

/// Inclusive calendar-date range.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> DomainResult<Self> {
        if end < start {
            return Err(DomainError::validation(format!(
                "range end {end} precedes start {start}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn single_day(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Both ends inclusive.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// A period entry with its references resolved against the current catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryLine {
    pub entry_id: EntryId,
    pub product_id: ProductId,
    pub product_name: String,
    pub date: NaiveDate,
    pub quantity: u64,
    pub unit_cost: Money,
    pub total_cost: Money,
    pub supplier_name: String,
}

/// A period exit with its references resolved against the current catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExitLine {
    pub exit_id: ExitId,
    pub product_id: ProductId,
    pub product_name: String,
    pub date: NaiveDate,
    pub quantity: u64,
    pub unit_price: Money,
    pub total_revenue: Money,
    pub recipient: String,
    pub department: Option<String>,
}

/// Ranking row: summed quantity for one product within the period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuantityRank {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u64,
}

/// Per-product cost/profit within the period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductBreakdown {
    pub product_id: ProductId,
    pub product_name: String,
    pub cost: Money,
    /// Exit revenue minus entry cost within the period; negative when the
    /// period bought more than it sold.
    pub profit_cents: i64,
}

/// Aggregated view of all movements within a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodReport {
    pub range: DateRange,
    pub entries: Vec<EntryLine>,
    pub exits: Vec<ExitLine>,
    pub total_entry_count: usize,
    pub total_exit_count: usize,
    pub total_entry_cost: Money,
    pub total_sales_revenue: Money,
    /// Revenue minus cost, in cents; negative on net spend.
    pub margin_cents: i64,
    pub top_entries_by_quantity: Vec<QuantityRank>,
    pub top_exits_by_quantity: Vec<QuantityRank>,
    pub per_product: Vec<ProductBreakdown>,
}

fn rank_by_quantity<I>(movements: I, products: &HashMap<ProductId, &Product>) -> Vec<QuantityRank>
where
    I: IntoIterator<Item = (ProductId, u64)>,
{
    let mut totals: HashMap<ProductId, u64> = HashMap::new();
    for (product_id, qty) in movements {
        *totals.entry(product_id).or_insert(0) += qty;
    }

    let mut rows: Vec<QuantityRank> = totals
        .into_iter()
        .map(|(product_id, quantity)| QuantityRank {
            product_id,
            product_name: products
                .get(&product_id)
                .map(|p| p.name().to_string())
                .unwrap_or_else(|| UNKNOWN_PRODUCT.to_string()),
            quantity,
        })
        .collect();

    rows.sort_by(|a, b| {
        b.quantity
            .cmp(&a.quantity)
            .then(a.product_id.cmp(&b.product_id))
    });
    rows
}

/// Build the report for all movements dated within `range`.
///
/// Costs and prices are looked up from the *current* product records; a
/// movement whose product or supplier no longer exists resolves to the
/// sentinel names and a zero unit value rather than erroring. Empty inputs
/// produce all-zero aggregates and empty lists.
pub fn build_period_report(
    products: &[Product],
    suppliers: &[Supplier],
    entries: &[Entry],
    exits: &[Exit],
    range: DateRange,
) -> PeriodReport {
    let by_product: HashMap<ProductId, &Product> =
        products.iter().map(|p| (p.id_typed(), p)).collect();
    let supplier_names: HashMap<_, _> = suppliers
        .iter()
        .map(|s| (s.id_typed(), s.commercial_name()))
        .collect();

    let entry_lines: Vec<EntryLine> = entries
        .iter()
        .filter(|e| range.contains(e.date()))
        .map(|e| {
            let product = by_product.get(&e.product_id());
            let unit_cost = product.map(|p| p.unit_cost()).unwrap_or(Money::ZERO);
            EntryLine {
                entry_id: e.id_typed(),
                product_id: e.product_id(),
                product_name: product
                    .map(|p| p.name().to_string())
                    .unwrap_or_else(|| UNKNOWN_PRODUCT.to_string()),
                date: e.date(),
                quantity: e.quantity().as_u64(),
                unit_cost,
                total_cost: unit_cost.times(e.quantity().as_u64()),
                supplier_name: e
                    .supplier_id()
                    .and_then(|id| supplier_names.get(&id).copied())
                    .unwrap_or(NO_SUPPLIER)
                    .to_string(),
            }
        })
        .collect();

    let exit_lines: Vec<ExitLine> = exits
        .iter()
        .filter(|x| range.contains(x.date()))
        .map(|x| {
            let product = by_product.get(&x.product_id());
            let unit_price = product.map(|p| p.unit_price()).unwrap_or(Money::ZERO);
            ExitLine {
                exit_id: x.id_typed(),
                product_id: x.product_id(),
                product_name: product
                    .map(|p| p.name().to_string())
                    .unwrap_or_else(|| UNKNOWN_PRODUCT.to_string()),
                date: x.date(),
                quantity: x.quantity().as_u64(),
                unit_price,
                total_revenue: unit_price.times(x.quantity().as_u64()),
                recipient: x.recipient().to_string(),
                department: x.department().map(str::to_string),
            }
        })
        .collect();

    let total_entry_cost: Money = entry_lines.iter().map(|l| l.total_cost).sum();
    let total_sales_revenue: Money = exit_lines.iter().map(|l| l.total_revenue).sum();

    let top_entries_by_quantity = rank_by_quantity(
        entry_lines.iter().map(|l| (l.product_id, l.quantity)),
        &by_product,
    );
    let top_exits_by_quantity = rank_by_quantity(
        exit_lines.iter().map(|l| (l.product_id, l.quantity)),
        &by_product,
    );

    let per_product = products
        .iter()
        .map(|p| {
            let id = p.id_typed();
            let cost: Money = entry_lines
                .iter()
                .filter(|l| l.product_id == id)
                .map(|l| l.total_cost)
                .sum();
            let revenue: Money = exit_lines
                .iter()
                .filter(|l| l.product_id == id)
                .map(|l| l.total_revenue)
                .sum();
            ProductBreakdown {
                product_id: id,
                product_name: p.name().to_string(),
                cost,
                profit_cents: revenue.signed_diff(cost),
            }
        })
        .collect();

    PeriodReport {
        range,
        total_entry_count: entry_lines.len(),
        total_exit_count: exit_lines.len(),
        total_entry_cost,
        total_sales_revenue,
        margin_cents: total_sales_revenue.signed_diff(total_entry_cost),
        top_entries_by_quantity,
        top_exits_by_quantity,
        per_product,
        entries: entry_lines,
        exits: exit_lines,
    }
}
