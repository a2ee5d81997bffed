//! The four-table persistence contract.

use std::sync::Arc;

use kaawa_catalog::{Product, Supplier};
use kaawa_core::{Entity, EntryId, ExitId, ProductId, SupplierId};
use kaawa_movements::{Entry, Exit};

use crate::error::{StoreError, StoreResult};
use crate::table_store::{InMemoryTableStore, TableStore};

/// CRUD over the four logical tables.
///
/// Fetches return the full, unfiltered table — consistency comes from
/// re-reading the source of truth after every write, not from incremental
/// cache patching. Movements have no update operation: the ledger is
/// corrected by deleting and re-inserting rows.
pub trait Datastore: Send + Sync {
    fn products(&self) -> StoreResult<Vec<Product>>;
    fn suppliers(&self) -> StoreResult<Vec<Supplier>>;
    fn entries(&self) -> StoreResult<Vec<Entry>>;
    fn exits(&self) -> StoreResult<Vec<Exit>>;

    fn insert_product(&self, product: Product) -> StoreResult<Product>;
    fn update_product(&self, product: Product) -> StoreResult<Product>;
    /// No cascade: the product's movement rows stay in the ledger and
    /// resolve to the unknown-product sentinel in reports.
    fn delete_product(&self, id: ProductId) -> StoreResult<()>;

    fn insert_supplier(&self, supplier: Supplier) -> StoreResult<Supplier>;
    fn update_supplier(&self, supplier: Supplier) -> StoreResult<Supplier>;
    fn delete_supplier(&self, id: SupplierId) -> StoreResult<()>;

    fn insert_entry(&self, entry: Entry) -> StoreResult<Entry>;
    fn delete_entry(&self, id: EntryId) -> StoreResult<()>;

    fn insert_exit(&self, exit: Exit) -> StoreResult<Exit>;
    fn delete_exit(&self, id: ExitId) -> StoreResult<()>;
}

impl<S> Datastore for Arc<S>
where
    S: Datastore + ?Sized,
{
    fn products(&self) -> StoreResult<Vec<Product>> {
        (**self).products()
    }

    fn suppliers(&self) -> StoreResult<Vec<Supplier>> {
        (**self).suppliers()
    }

    fn entries(&self) -> StoreResult<Vec<Entry>> {
        (**self).entries()
    }

    fn exits(&self) -> StoreResult<Vec<Exit>> {
        (**self).exits()
    }

    fn insert_product(&self, product: Product) -> StoreResult<Product> {
        (**self).insert_product(product)
    }

    fn update_product(&self, product: Product) -> StoreResult<Product> {
        (**self).update_product(product)
    }

    fn delete_product(&self, id: ProductId) -> StoreResult<()> {
        (**self).delete_product(id)
    }

    fn insert_supplier(&self, supplier: Supplier) -> StoreResult<Supplier> {
        (**self).insert_supplier(supplier)
    }

    fn update_supplier(&self, supplier: Supplier) -> StoreResult<Supplier> {
        (**self).update_supplier(supplier)
    }

    fn delete_supplier(&self, id: SupplierId) -> StoreResult<()> {
        (**self).delete_supplier(id)
    }

    fn insert_entry(&self, entry: Entry) -> StoreResult<Entry> {
        (**self).insert_entry(entry)
    }

    fn delete_entry(&self, id: EntryId) -> StoreResult<()> {
        (**self).delete_entry(id)
    }

    fn insert_exit(&self, exit: Exit) -> StoreResult<Exit> {
        (**self).insert_exit(exit)
    }

    fn delete_exit(&self, id: ExitId) -> StoreResult<()> {
        (**self).delete_exit(id)
    }
}

/// In-memory datastore: the reference implementation of the contract.
#[derive(Debug, Default)]
pub struct InMemoryDatastore {
    products: InMemoryTableStore<ProductId, Product>,
    suppliers: InMemoryTableStore<SupplierId, Supplier>,
    entries: InMemoryTableStore<EntryId, Entry>,
    exits: InMemoryTableStore<ExitId, Exit>,
}

impl InMemoryDatastore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Product codes are a human-facing unique key.
    fn ensure_code_free(&self, code: &str, exempt: ProductId) -> StoreResult<()> {
        let clash = self
            .products
            .list()?
            .into_iter()
            .any(|p| p.code() == code && p.id_typed() != exempt);
        if clash {
            return Err(StoreError::conflict(format!(
                "product code already in use: {code}"
            )));
        }
        Ok(())
    }
}

impl Datastore for InMemoryDatastore {
    fn products(&self) -> StoreResult<Vec<Product>> {
        self.products.list()
    }

    fn suppliers(&self) -> StoreResult<Vec<Supplier>> {
        self.suppliers.list()
    }

    fn entries(&self) -> StoreResult<Vec<Entry>> {
        self.entries.list()
    }

    fn exits(&self) -> StoreResult<Vec<Exit>> {
        self.exits.list()
    }

    fn insert_product(&self, product: Product) -> StoreResult<Product> {
        let id = product.id_typed();
        if self.products.get(&id)?.is_some() {
            return Err(StoreError::conflict(format!("product already exists: {id}")));
        }
        self.ensure_code_free(product.code(), id)?;
        self.products.upsert(id, product.clone())?;
        Ok(product)
    }

    fn update_product(&self, product: Product) -> StoreResult<Product> {
        let id = product.id_typed();
        if self.products.get(&id)?.is_none() {
            return Err(StoreError::NotFound);
        }
        self.ensure_code_free(product.code(), id)?;
        self.products.upsert(id, product.clone())?;
        Ok(product)
    }

    fn delete_product(&self, id: ProductId) -> StoreResult<()> {
        self.products.remove(&id)
    }

    fn insert_supplier(&self, supplier: Supplier) -> StoreResult<Supplier> {
        let id = supplier.id_typed();
        if self.suppliers.get(&id)?.is_some() {
            return Err(StoreError::conflict(format!(
                "supplier already exists: {id}"
            )));
        }
        self.suppliers.upsert(id, supplier.clone())?;
        Ok(supplier)
    }

    fn update_supplier(&self, supplier: Supplier) -> StoreResult<Supplier> {
        let id = supplier.id_typed();
        if self.suppliers.get(&id)?.is_none() {
            return Err(StoreError::NotFound);
        }
        self.suppliers.upsert(id, supplier.clone())?;
        Ok(supplier)
    }

    fn delete_supplier(&self, id: SupplierId) -> StoreResult<()> {
        self.suppliers.remove(&id)
    }

    fn insert_entry(&self, entry: Entry) -> StoreResult<Entry> {
        let id = entry.id_typed();
        if self.entries.get(&id)?.is_some() {
            return Err(StoreError::conflict(format!("entry already exists: {id}")));
        }
        self.entries.upsert(id, entry.clone())?;
        Ok(entry)
    }

    fn delete_entry(&self, id: EntryId) -> StoreResult<()> {
        self.entries.remove(&id)
    }

    fn insert_exit(&self, exit: Exit) -> StoreResult<Exit> {
        let id = *exit.id();
        if self.exits.get(&id)?.is_some() {
            return Err(StoreError::conflict(format!("exit already exists: {id}")));
        }
        self.exits.upsert(id, exit.clone())?;
        Ok(exit)
    }

    fn delete_exit(&self, id: ExitId) -> StoreResult<()> {
        self.exits.remove(&id)
    }
}
