//! The inventory service: snapshot reads, mutate-then-refetch writes.

use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;

use kaawa_catalog::{Product, Supplier};
use kaawa_core::{DomainError, EntryId, ExitId, Money, ProductId, SupplierId};
use kaawa_movements::{Entry, Exit};
use kaawa_notify::{Notification, NotificationBus};
use kaawa_reports::{DateRange, PeriodReport, StockInfo, build_period_report, compute_stock};
use kaawa_store::{Datastore, StoreError};

use crate::dashboard::DashboardStats;

/// Result type for service operations.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level failure: a domain rejection or a store failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Fully re-fetched table contents.
#[derive(Debug, Default, Clone)]
struct Snapshot {
    products: Vec<Product>,
    suppliers: Vec<Supplier>,
    entries: Vec<Entry>,
    exits: Vec<Exit>,
}

/// Dashboard-facing service over one datastore.
///
/// Every mutation validates at the boundary, writes through the store, then
/// re-fetches all four tables. Outcome notifications go to the bus handed in
/// at construction; the presentation layer renders them as toasts.
pub struct InventoryService<D> {
    store: D,
    notifier: Arc<dyn NotificationBus<Notification>>,
    snapshot: Snapshot,
}

impl<D: Datastore> InventoryService<D> {
    pub fn new(store: D, notifier: Arc<dyn NotificationBus<Notification>>) -> AppResult<Self> {
        let mut service = Self {
            store,
            notifier,
            snapshot: Snapshot::default(),
        };
        service.refresh()?;
        Ok(service)
    }

    /// Re-fetch all four tables from the store.
    pub fn refresh(&mut self) -> AppResult<()> {
        self.snapshot = Snapshot {
            products: self.store.products()?,
            suppliers: self.store.suppliers()?,
            entries: self.store.entries()?,
            exits: self.store.exits()?,
        };
        tracing::debug!(
            products = self.snapshot.products.len(),
            suppliers = self.snapshot.suppliers.len(),
            entries = self.snapshot.entries.len(),
            exits = self.snapshot.exits.len(),
            "snapshot refreshed"
        );
        Ok(())
    }

    fn notify_outcome<T>(&self, result: AppResult<T>, success: &str) -> AppResult<T> {
        match &result {
            Ok(_) => self.notifier.publish(Notification::success(success)),
            Err(err) => self.notifier.publish(Notification::error(err.to_string())),
        }
        result
    }

    // ---- snapshot reads -------------------------------------------------

    pub fn products(&self) -> &[Product] {
        &self.snapshot.products
    }

    pub fn suppliers(&self) -> &[Supplier] {
        &self.snapshot.suppliers
    }

    pub fn entries(&self) -> &[Entry] {
        &self.snapshot.entries
    }

    pub fn exits(&self) -> &[Exit] {
        &self.snapshot.exits
    }

    pub fn stock(&self) -> std::collections::BTreeMap<ProductId, StockInfo> {
        compute_stock(
            &self.snapshot.products,
            &self.snapshot.entries,
            &self.snapshot.exits,
        )
    }

    pub fn dashboard(&self) -> DashboardStats {
        DashboardStats::derive(
            &self.snapshot.products,
            &self.snapshot.entries,
            &self.snapshot.exits,
        )
    }

    pub fn period_report(&self, range: DateRange) -> PeriodReport {
        build_period_report(
            &self.snapshot.products,
            &self.snapshot.suppliers,
            &self.snapshot.entries,
            &self.snapshot.exits,
            range,
        )
    }

    pub fn search_products(&self, query: &str) -> Vec<&Product> {
        self.snapshot
            .products
            .iter()
            .filter(|p| p.matches_query(query))
            .collect()
    }

    pub fn search_suppliers(&self, query: &str) -> Vec<&Supplier> {
        self.snapshot
            .suppliers
            .iter()
            .filter(|s| s.matches_query(query))
            .collect()
    }

    pub fn search_exits(&self, query: &str) -> Vec<&Exit> {
        self.snapshot
            .exits
            .iter()
            .filter(|x| x.matches_query(query))
            .collect()
    }

    // ---- catalog mutations ----------------------------------------------

    #[allow(clippy::too_many_arguments)]
    pub fn create_product(
        &mut self,
        code: &str,
        name: &str,
        unit_cost: Money,
        unit_price: Money,
        supplier_id: Option<SupplierId>,
        shelf_life: Option<String>,
        min_stock: Option<u32>,
    ) -> AppResult<Product> {
        let result = (|| -> AppResult<Product> {
            let mut product = Product::new(ProductId::new(), code, name, unit_cost, unit_price)?;
            if let Some(supplier_id) = supplier_id {
                product = product.with_supplier(supplier_id);
            }
            if let Some(shelf_life) = shelf_life {
                product = product.with_shelf_life(shelf_life);
            }
            if let Some(min_stock) = min_stock {
                product = product.with_min_stock(min_stock);
            }
            let inserted = self.store.insert_product(product)?;
            self.refresh()?;
            tracing::info!(id = %inserted.id_typed(), code = inserted.code(), "product created");
            Ok(inserted)
        })();
        self.notify_outcome(result, "product created")
    }

    #[allow(clippy::too_many_arguments)]
    pub fn update_product(
        &mut self,
        id: ProductId,
        code: &str,
        name: &str,
        unit_cost: Money,
        unit_price: Money,
        supplier_id: Option<SupplierId>,
        shelf_life: Option<String>,
        min_stock: Option<u32>,
    ) -> AppResult<Product> {
        let result = (|| -> AppResult<Product> {
            let mut product = self
                .snapshot
                .products
                .iter()
                .find(|p| p.id_typed() == id)
                .cloned()
                .ok_or(DomainError::NotFound)?;
            product.update(
                code,
                name,
                unit_cost,
                unit_price,
                supplier_id,
                shelf_life,
                min_stock,
            )?;
            let updated = self.store.update_product(product)?;
            self.refresh()?;
            tracing::info!(id = %id, "product updated");
            Ok(updated)
        })();
        self.notify_outcome(result, "product updated")
    }

    pub fn delete_product(&mut self, id: ProductId) -> AppResult<()> {
        let result = (|| -> AppResult<()> {
            self.store.delete_product(id)?;
            self.refresh()?;
            tracing::info!(id = %id, "product deleted; ledger rows kept");
            Ok(())
        })();
        self.notify_outcome(result, "product deleted")
    }

    pub fn create_supplier(
        &mut self,
        commercial_name: &str,
        legal_name: Option<String>,
        tax_id: Option<String>,
        contact_name: Option<String>,
        phone: Option<String>,
        supplied_goods: Option<String>,
    ) -> AppResult<Supplier> {
        let result = (|| -> AppResult<Supplier> {
            let mut supplier = Supplier::new(SupplierId::new(), commercial_name)?;
            if let Some(v) = legal_name {
                supplier = supplier.with_legal_name(v);
            }
            if let Some(v) = tax_id {
                supplier = supplier.with_tax_id(v);
            }
            if let Some(v) = contact_name {
                supplier = supplier.with_contact_name(v);
            }
            if let Some(v) = phone {
                supplier = supplier.with_phone(v);
            }
            if let Some(v) = supplied_goods {
                supplier = supplier.with_supplied_goods(v);
            }
            let inserted = self.store.insert_supplier(supplier)?;
            self.refresh()?;
            tracing::info!(id = %inserted.id_typed(), "supplier created");
            Ok(inserted)
        })();
        self.notify_outcome(result, "supplier created")
    }

    pub fn update_supplier(
        &mut self,
        id: SupplierId,
        commercial_name: &str,
        legal_name: Option<String>,
        tax_id: Option<String>,
        contact_name: Option<String>,
        phone: Option<String>,
        supplied_goods: Option<String>,
    ) -> AppResult<Supplier> {
        let result = (|| -> AppResult<Supplier> {
            let mut supplier = self
                .snapshot
                .suppliers
                .iter()
                .find(|s| s.id_typed() == id)
                .cloned()
                .ok_or(DomainError::NotFound)?;
            supplier.update(
                commercial_name,
                legal_name,
                tax_id,
                contact_name,
                phone,
                supplied_goods,
            )?;
            let updated = self.store.update_supplier(supplier)?;
            self.refresh()?;
            tracing::info!(id = %id, "supplier updated");
            Ok(updated)
        })();
        self.notify_outcome(result, "supplier updated")
    }

    pub fn delete_supplier(&mut self, id: SupplierId) -> AppResult<()> {
        let result = (|| -> AppResult<()> {
            self.store.delete_supplier(id)?;
            self.refresh()?;
            tracing::info!(id = %id, "supplier deleted");
            Ok(())
        })();
        self.notify_outcome(result, "supplier deleted")
    }

    // ---- ledger mutations (insert/delete only, never edit) --------------

    fn ensure_product_exists(&self, id: ProductId) -> AppResult<()> {
        if self.snapshot.products.iter().any(|p| p.id_typed() == id) {
            Ok(())
        } else {
            Err(DomainError::NotFound.into())
        }
    }

    pub fn record_entry(
        &mut self,
        product_id: ProductId,
        date: NaiveDate,
        quantity: i64,
        supplier_id: Option<SupplierId>,
    ) -> AppResult<Entry> {
        let result = (|| -> AppResult<Entry> {
            self.ensure_product_exists(product_id)?;
            let mut entry = Entry::new(EntryId::new(), product_id, date, quantity)?;
            if let Some(supplier_id) = supplier_id {
                entry = entry.with_supplier(supplier_id);
            }
            let inserted = self.store.insert_entry(entry)?;
            self.refresh()?;
            tracing::info!(product = %product_id, %date, quantity, "entry recorded");
            Ok(inserted)
        })();
        self.notify_outcome(result, "entry recorded")
    }

    pub fn delete_entry(&mut self, id: EntryId) -> AppResult<()> {
        let result = (|| -> AppResult<()> {
            self.store.delete_entry(id)?;
            self.refresh()?;
            tracing::info!(id = %id, "entry deleted (retroactive correction)");
            Ok(())
        })();
        self.notify_outcome(result, "entry deleted")
    }

    pub fn record_exit(
        &mut self,
        product_id: ProductId,
        date: NaiveDate,
        quantity: i64,
        recipient: &str,
        department: Option<String>,
    ) -> AppResult<Exit> {
        let result = (|| -> AppResult<Exit> {
            self.ensure_product_exists(product_id)?;
            let mut exit = Exit::new(ExitId::new(), product_id, date, quantity, recipient)?;
            if let Some(department) = department {
                exit = exit.with_department(department);
            }
            let inserted = self.store.insert_exit(exit)?;
            self.refresh()?;
            tracing::info!(product = %product_id, %date, quantity, "exit recorded");
            Ok(inserted)
        })();
        self.notify_outcome(result, "exit recorded")
    }

    pub fn delete_exit(&mut self, id: ExitId) -> AppResult<()> {
        let result = (|| -> AppResult<()> {
            self.store.delete_exit(id)?;
            self.refresh()?;
            tracing::info!(id = %id, "exit deleted (retroactive correction)");
            Ok(())
        })();
        self.notify_outcome(result, "exit deleted")
    }
}
