//! Deterministic demo dataset.
//!
//! Mirrors the café's starter data so the demo binary and examples have
//! something to chew on. Ids are fixed so output is stable run to run.

use chrono::NaiveDate;
use uuid::Uuid;

use kaawa_catalog::{Product, Supplier};
use kaawa_core::{EntryId, ExitId, Money, ProductId, SupplierId};
use kaawa_movements::{Entry, Exit};

use crate::datastore::{Datastore, InMemoryDatastore};
use crate::error::StoreResult;

fn supplier_id(n: u128) -> SupplierId {
    SupplierId::from_uuid(Uuid::from_u128(n))
}

fn product_id(n: u128) -> ProductId {
    ProductId::from_uuid(Uuid::from_u128(0x1000 + n))
}

fn entry_id(n: u128) -> EntryId {
    EntryId::from_uuid(Uuid::from_u128(0x2000 + n))
}

fn exit_id(n: u128) -> ExitId {
    ExitId::from_uuid(Uuid::from_u128(0x3000 + n))
}

fn day(s: &str) -> NaiveDate {
    s.parse().expect("seed dates are valid ISO dates")
}

/// The demo suppliers.
pub fn suppliers() -> Vec<Supplier> {
    vec![
        Supplier::new(supplier_id(1), "Café Supplier MX")
            .expect("seed supplier is valid")
            .with_legal_name("Proveedor Café S.A. de C.V.")
            .with_tax_id("PSCMX123456789")
            .with_contact_name("Juan Pérez")
            .with_phone("555-123-4567")
            .with_supplied_goods("Granos de café, filtros"),
        Supplier::new(supplier_id(2), "Import Beans Ltd")
            .expect("seed supplier is valid")
            .with_legal_name("Importadora Beans Internacional")
            .with_tax_id("IBLI098765432")
            .with_contact_name("María López")
            .with_phone("555-987-6543")
            .with_supplied_goods("Café orgánico, tazas"),
    ]
}

/// The demo products.
pub fn products() -> Vec<Product> {
    vec![
        Product::new(
            product_id(1),
            "CAF001",
            "Granos de Café Arábica",
            Money::from_cents(15_000),
            Money::from_cents(25_000),
        )
        .expect("seed product is valid")
        .with_supplier(supplier_id(1))
        .with_shelf_life("6 meses"),
        Product::new(
            product_id(2),
            "FIL002",
            "Filtros de Papel",
            Money::from_cents(2_000),
            Money::from_cents(3_500),
        )
        .expect("seed product is valid")
        .with_supplier(supplier_id(1)),
        Product::new(
            product_id(3),
            "ORG003",
            "Café Orgánico Premium",
            Money::from_cents(20_000),
            Money::from_cents(35_000),
        )
        .expect("seed product is valid")
        .with_supplier(supplier_id(2))
        .with_shelf_life("12 meses"),
        Product::new(
            product_id(4),
            "TAC004",
            "Tazas Desechables",
            Money::from_cents(500),
            Money::from_cents(1_000),
        )
        .expect("seed product is valid")
        .with_supplier(supplier_id(2))
        .with_min_stock(20),
    ]
}

/// The demo stock-in ledger.
pub fn entries() -> Vec<Entry> {
    vec![
        Entry::new(entry_id(1), product_id(1), day("2024-01-15"), 10)
            .expect("seed entry is valid")
            .with_supplier(supplier_id(1)),
        Entry::new(entry_id(2), product_id(2), day("2024-01-14"), 50)
            .expect("seed entry is valid")
            .with_supplier(supplier_id(1)),
    ]
}

/// The demo stock-out ledger.
pub fn exits() -> Vec<Exit> {
    vec![
        Exit::new(exit_id(1), product_id(1), day("2024-01-20"), 5, "Ana García")
            .expect("seed exit is valid")
            .with_department("Bar"),
        Exit::new(exit_id(2), product_id(3), day("2024-01-19"), 2, "Luis Ramírez")
            .expect("seed exit is valid")
            .with_department("Almacén"),
    ]
}

/// An in-memory datastore preloaded with the demo dataset.
pub fn seeded_datastore() -> StoreResult<InMemoryDatastore> {
    let store = InMemoryDatastore::new();
    for supplier in suppliers() {
        store.insert_supplier(supplier)?;
    }
    for product in products() {
        store.insert_product(product)?;
    }
    for entry in entries() {
        store.insert_entry(entry)?;
    }
    for exit in exits() {
        store.insert_exit(exit)?;
    }
    Ok(store)
}
