use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use kaawa_core::{DomainError, DomainResult, Entity, ExitId, ProductId, Quantity};

/// Ledger record: a stock-out movement.
///
/// Every exit is attributed to the person who received the goods; the
/// department is optional free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exit {
    id: ExitId,
    product_id: ProductId,
    date: NaiveDate,
    #[serde(default)]
    quantity: Quantity,
    recipient: String,
    #[serde(default)]
    department: Option<String>,
}

impl Exit {
    /// Record a stock-out movement. Quantity must be positive and the
    /// recipient non-empty.
    pub fn new(
        id: ExitId,
        product_id: ProductId,
        date: NaiveDate,
        quantity: i64,
        recipient: impl Into<String>,
    ) -> DomainResult<Self> {
        let recipient = recipient.into();
        if recipient.trim().is_empty() {
            return Err(DomainError::validation("recipient cannot be empty"));
        }

        Ok(Self {
            id,
            product_id,
            date,
            quantity: Quantity::new(quantity)?,
            recipient,
            department: None,
        })
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn id_typed(&self) -> ExitId {
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

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn department(&self) -> Option<&str> {
        self.department.as_deref()
    }

    /// Case-insensitive search over recipient and department (list filter bars).
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.recipient.to_lowercase().contains(&query)
            || self
                .department
                .as_deref()
                .map(|d| d.to_lowercase().contains(&query))
                .unwrap_or(false)
    }
}

impl Entity for Exit {
    type Id = ExitId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
