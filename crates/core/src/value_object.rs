//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values —
/// `Money { cents: 100 }` equals any other `Money { cents: 100 }`, while two
/// products with the same fields but different ids are different entities.
///
/// To "modify" a value object, build a new one with the new values.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
