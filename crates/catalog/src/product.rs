use serde::{Deserialize, Serialize};

use kaawa_core::{DomainError, DomainResult, Entity, Money, ProductId, SupplierId};

/// Low-stock water mark applied to products without an explicit `min_stock`.
pub const DEFAULT_MIN_STOCK: u32 = 5;

/// Catalog record: a product.
///
/// A product never stores its stock level; stock is always derived from the
/// entry/exit ledger. Unit cost and intended sale price are minor-unit money
/// amounts looked up at report time (reports reflect *current* prices, not a
/// snapshot taken when the movement happened).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    code: String,
    name: String,
    #[serde(default)]
    supplier_id: Option<SupplierId>,
    /// Missing cost/price fields on historical rows decode as zero.
    #[serde(default)]
    unit_cost: Money,
    #[serde(default)]
    unit_price: Money,
    #[serde(default)]
    shelf_life: Option<String>,
    #[serde(default)]
    min_stock: Option<u32>,
}

impl Product {
    /// Create a product, enforcing the non-empty code/name invariants.
    pub fn new(
        id: ProductId,
        code: impl Into<String>,
        name: impl Into<String>,
        unit_cost: Money,
        unit_price: Money,
    ) -> DomainResult<Self> {
        let code = code.into();
        let name = name.into();

        if code.trim().is_empty() {
            return Err(DomainError::validation("product code cannot be empty"));
        }
        if name.trim().is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }

        Ok(Self {
            id,
            code,
            name,
            supplier_id: None,
            unit_cost,
            unit_price,
            shelf_life: None,
            min_stock: None,
        })
    }

    pub fn with_supplier(mut self, supplier_id: SupplierId) -> Self {
        self.supplier_id = Some(supplier_id);
        self
    }

    pub fn with_shelf_life(mut self, shelf_life: impl Into<String>) -> Self {
        self.shelf_life = Some(shelf_life.into());
        self
    }

    pub fn with_min_stock(mut self, min_stock: u32) -> Self {
        self.min_stock = Some(min_stock);
        self
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn supplier_id(&self) -> Option<SupplierId> {
        self.supplier_id
    }

    pub fn unit_cost(&self) -> Money {
        self.unit_cost
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn shelf_life(&self) -> Option<&str> {
        self.shelf_life.as_deref()
    }

    pub fn min_stock(&self) -> Option<u32> {
        self.min_stock
    }

    /// Effective low-stock threshold: per-product `min_stock`, else `fallback`.
    pub fn min_stock_or(&self, fallback: u32) -> u32 {
        self.min_stock.unwrap_or(fallback)
    }

    /// Replace the editable fields (form submit), re-checking invariants.
    pub fn update(
        &mut self,
        code: impl Into<String>,
        name: impl Into<String>,
        unit_cost: Money,
        unit_price: Money,
        supplier_id: Option<SupplierId>,
        shelf_life: Option<String>,
        min_stock: Option<u32>,
    ) -> DomainResult<()> {
        let code = code.into();
        let name = name.into();

        if code.trim().is_empty() {
            return Err(DomainError::validation("product code cannot be empty"));
        }
        if name.trim().is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }

        self.code = code;
        self.name = name;
        self.unit_cost = unit_cost;
        self.unit_price = unit_price;
        self.supplier_id = supplier_id;
        self.shelf_life = shelf_life;
        self.min_stock = min_stock;
        Ok(())
    }

    /// Case-insensitive search over name and code (list filter bars).
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query) || self.code.to_lowercase().contains(&query)
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product() -> Product {
        Product::new(
            ProductId::new(),
            "CAF001",
            "Granos de Café Arábica",
            Money::from_cents(15_000),
            Money::from_cents(25_000),
        )
        .unwrap()
    }

    #[test]
    fn create_product_carries_fields() {
        let p = test_product();
        assert_eq!(p.code(), "CAF001");
        assert_eq!(p.name(), "Granos de Café Arábica");
        assert_eq!(p.unit_cost(), Money::from_cents(15_000));
        assert_eq!(p.unit_price(), Money::from_cents(25_000));
        assert_eq!(p.supplier_id(), None);
        assert_eq!(p.min_stock(), None);
    }

    #[test]
    fn create_product_rejects_empty_code() {
        let err = Product::new(
            ProductId::new(),
            "   ",
            "Filtros de Papel",
            Money::ZERO,
            Money::ZERO,
        )
        .unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn create_product_rejects_empty_name() {
        let err = Product::new(ProductId::new(), "FIL002", "", Money::ZERO, Money::ZERO)
            .unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn min_stock_falls_back_to_global_default() {
        let p = test_product();
        assert_eq!(p.min_stock_or(DEFAULT_MIN_STOCK), DEFAULT_MIN_STOCK);

        let p = test_product().with_min_stock(12);
        assert_eq!(p.min_stock_or(DEFAULT_MIN_STOCK), 12);
    }

    #[test]
    fn update_rechecks_invariants() {
        let mut p = test_product();
        let err = p
            .update("", "Name", Money::ZERO, Money::ZERO, None, None, None)
            .unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            other => panic!("expected Validation, got {other:?}"),
        }
        // Failed update leaves the record untouched.
        assert_eq!(p.code(), "CAF001");
    }

    #[test]
    fn matches_query_on_name_or_code() {
        let p = test_product();
        assert!(p.matches_query("caf001"));
        assert!(p.matches_query("arábica"));
        assert!(!p.matches_query("tazas"));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Any non-blank code/name constructs, and the code is always
            /// findable through the case-insensitive search predicate.
            #[test]
            fn construction_and_search_agree(
                code in "[A-Z]{3}[0-9]{3}",
                name in "[A-Za-z][A-Za-z0-9 ]{0,40}",
            ) {
                let p = Product::new(
                    ProductId::new(),
                    code.clone(),
                    name,
                    Money::from_cents(100),
                    Money::from_cents(200),
                ).unwrap();
                prop_assert!(p.matches_query(&code.to_lowercase()));
            }
        }
    }
}
