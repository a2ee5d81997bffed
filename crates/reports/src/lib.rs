//! Derived inventory views (the stock aggregator).
//!
//! Pure, stateless reductions of catalog and movement collections into stock
//! levels, low-stock alerts, valuations, rankings and period reports. No IO:
//! callers fetch fresh snapshots from the store and pass them in; every
//! function is deterministic and leaves its inputs untouched.
//!
//! Valuations and period reports always use the *current* product cost/price,
//! even for old movements — there is no historical price snapshot, so a past
//! period's report shifts if prices are edited later.

pub mod period;
pub mod stock;
pub mod valuation;

pub use period::{
    DateRange, EntryLine, ExitLine, NO_SUPPLIER, PeriodReport, ProductBreakdown, QuantityRank,
    UNKNOWN_PRODUCT, build_period_report,
};
pub use stock::{StockInfo, compute_stock, low_stock_products, stock_for, total_units_on_hand};
pub use valuation::{
    ExitRanking, MovementRanking, ValuationRanking, most_moved, top_by_cost_exposure,
    top_by_retail_value, top_moved, total_cost_value, total_retail_value,
};
