use serde::{Deserialize, Serialize};

use kaawa_core::{DomainError, DomainResult, Entity, SupplierId};

/// Catalog record: a supplier.
///
/// Only the commercial name is required; tax and contact details are optional
/// free text filled in as the café learns them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    id: SupplierId,
    commercial_name: String,
    #[serde(default)]
    legal_name: Option<String>,
    #[serde(default)]
    tax_id: Option<String>,
    #[serde(default)]
    contact_name: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    supplied_goods: Option<String>,
}

impl Supplier {
    /// Create a supplier, enforcing the non-empty commercial-name invariant.
    pub fn new(id: SupplierId, commercial_name: impl Into<String>) -> DomainResult<Self> {
        let commercial_name = commercial_name.into();
        if commercial_name.trim().is_empty() {
            return Err(DomainError::validation("commercial name cannot be empty"));
        }

        Ok(Self {
            id,
            commercial_name,
            legal_name: None,
            tax_id: None,
            contact_name: None,
            phone: None,
            supplied_goods: None,
        })
    }

    pub fn with_legal_name(mut self, legal_name: impl Into<String>) -> Self {
        self.legal_name = Some(legal_name.into());
        self
    }

    pub fn with_tax_id(mut self, tax_id: impl Into<String>) -> Self {
        self.tax_id = Some(tax_id.into());
        self
    }

    pub fn with_contact_name(mut self, contact_name: impl Into<String>) -> Self {
        self.contact_name = Some(contact_name.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_supplied_goods(mut self, supplied_goods: impl Into<String>) -> Self {
        self.supplied_goods = Some(supplied_goods.into());
        self
    }

    pub fn id_typed(&self) -> SupplierId {
        self.id
    }

    pub fn commercial_name(&self) -> &str {
        &self.commercial_name
    }

    pub fn legal_name(&self) -> Option<&str> {
        self.legal_name.as_deref()
    }

    pub fn tax_id(&self) -> Option<&str> {
        self.tax_id.as_deref()
    }

    pub fn contact_name(&self) -> Option<&str> {
        self.contact_name.as_deref()
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn supplied_goods(&self) -> Option<&str> {
        self.supplied_goods.as_deref()
    }

    /// Replace the editable fields (form submit), re-checking invariants.
    pub fn update(
        &mut self,
        commercial_name: impl Into<String>,
        legal_name: Option<String>,
        tax_id: Option<String>,
        contact_name: Option<String>,
        phone: Option<String>,
        supplied_goods: Option<String>,
    ) -> DomainResult<()> {
        let commercial_name = commercial_name.into();
        if commercial_name.trim().is_empty() {
            return Err(DomainError::validation("commercial name cannot be empty"));
        }

        self.commercial_name = commercial_name;
        self.legal_name = legal_name;
        self.tax_id = tax_id;
        self.contact_name = contact_name;
        self.phone = phone;
        self.supplied_goods = supplied_goods;
        Ok(())
    }

    /// Case-insensitive search over names and contact (list filter bars).
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        let hit = |field: Option<&str>| {
            field
                .map(|v| v.to_lowercase().contains(&query))
                .unwrap_or(false)
        };
        self.commercial_name.to_lowercase().contains(&query)
            || hit(self.legal_name())
            || hit(self.contact_name())
    }
}

impl Entity for Supplier {
    type Id = SupplierId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_supplier_with_details() {
        let s = Supplier::new(SupplierId::new(), "Café Supplier MX")
            .unwrap()
            .with_legal_name("Proveedor Café S.A. de C.V.")
            .with_tax_id("PSCMX123456789")
            .with_contact_name("Juan Pérez")
            .with_phone("555-123-4567")
            .with_supplied_goods("Granos de café, filtros");

        assert_eq!(s.commercial_name(), "Café Supplier MX");
        assert_eq!(s.legal_name(), Some("Proveedor Café S.A. de C.V."));
        assert_eq!(s.tax_id(), Some("PSCMX123456789"));
        assert_eq!(s.contact_name(), Some("Juan Pérez"));
    }

    #[test]
    fn create_supplier_rejects_empty_commercial_name() {
        let err = Supplier::new(SupplierId::new(), "  ").unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn matches_query_on_names_and_contact() {
        let s = Supplier::new(SupplierId::new(), "Import Beans Ltd")
            .unwrap()
            .with_legal_name("Importadora Beans Internacional")
            .with_contact_name("María López");

        assert!(s.matches_query("import"));
        assert!(s.matches_query("maría"));
        assert!(!s.matches_query("nestle"));
    }
}
