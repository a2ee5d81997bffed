//! Movement quantity: a positive unit count.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// A movement quantity.
///
/// New movements must carry a positive integer quantity; [`Quantity::new`]
/// rejects zero and negative input at the boundary. Historical rows that
/// somehow carry a zero survive deserialization and simply contribute nothing
/// to aggregates.
#[derive(
    Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    /// Validate a user-supplied quantity for a new movement.
    pub fn new(value: i64) -> DomainResult<Self> {
        if value <= 0 {
            return Err(DomainError::validation(format!(
                "quantity must be a positive integer, got {value}"
            )));
        }
        u32::try_from(value)
            .map(Self)
            .map_err(|_| DomainError::validation(format!("quantity out of range: {value}")))
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    pub fn as_u64(&self) -> u64 {
        u64::from(self.0)
    }

    pub fn as_i64(&self) -> i64 {
        i64::from(self.0)
    }
}

impl ValueObject for Quantity {}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}
