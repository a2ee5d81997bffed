use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use kaawa_core::{DomainResult, Entity, EntryId, ProductId, Quantity, SupplierId};

/// Ledger record: a stock-in movement.
///
/// Dates are timezone-naive calendar dates (`YYYY-MM-DD` on the wire); an
/// entry has no time-of-day semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    id: EntryId,
    product_id: ProductId,
    date: NaiveDate,
    /// Historical rows with a missing quantity decode as zero and contribute
    /// nothing to aggregates; new rows are validated in [`Entry::new`].
    #[serde(default)]
    quantity: Quantity,
    #[serde(default)]
    supplier_id: Option<SupplierId>,
}

impl Entry {
    /// Record a stock-in movement. Quantity must be a positive integer.
    pub fn new(
        id: EntryId,
        product_id: ProductId,
        date: NaiveDate,
        quantity: i64,
    ) -> DomainResult<Self> {
        Ok(Self {
            id,
            product_id,
            date,
            quantity: Quantity::new(quantity)?,
            supplier_id: None,
        })
    }

    pub fn with_supplier(mut self, supplier_id: SupplierId) -> Self {
        self.supplier_id = Some(supplier_id);
        self
    }

    pub fn id_typed(&self) -> EntryId {
        self.id
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn supplier_id(&self) -> Option<SupplierId> {
        self.supplier_id
    }
}

impl Entity for Entry {
    type Id = EntryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kaawa_core::DomainError;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn create_entry_carries_fields() {
        let supplier = SupplierId::new();
        let entry = Entry::new(EntryId::new(), ProductId::new(), day("2024-01-15"), 10)
            .unwrap()
            .with_supplier(supplier);

        assert_eq!(entry.quantity().get(), 10);
        assert_eq!(entry.date(), day("2024-01-15"));
        assert_eq!(entry.supplier_id(), Some(supplier));
    }

    #[test]
    fn create_entry_rejects_non_positive_quantity() {
        for bad in [0i64, -3] {
            let err =
                Entry::new(EntryId::new(), ProductId::new(), day("2024-01-15"), bad).unwrap_err();
            match err {
                DomainError::Validation(_) => {}
                other => panic!("expected Validation, got {other:?}"),
            }
        }
    }

    #[test]
    fn serializes_date_as_iso_calendar_string() {
        let entry =
            Entry::new(EntryId::new(), ProductId::new(), day("2024-01-15"), 10).unwrap();
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["date"], "2024-01-15");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Any positive in-range quantity is accepted and carried exactly.
            #[test]
            fn accepts_positive_quantities(qty in 1i64..=i64::from(u32::MAX)) {
                let entry = Entry::new(
                    EntryId::new(),
                    ProductId::new(),
                    day("2024-01-15"),
                    qty,
                ).unwrap();
                prop_assert_eq!(entry.quantity().as_i64(), qty);
            }
        }
    }
}
