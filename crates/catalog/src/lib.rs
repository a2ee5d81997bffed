//! Catalog domain module (products and suppliers).
//!
//! This crate contains the catalog records and their construction-time
//! invariants, implemented purely as deterministic domain logic (no IO, no
//! HTTP, no storage).

pub mod product;
pub mod supplier;

pub use product::{DEFAULT_MIN_STOCK, Product};
pub use supplier::Supplier;
