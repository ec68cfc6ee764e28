//! Value object trait: equality by value, not identity.
//!
//! Value objects are domain objects that have **no identity** - they are defined entirely
//! by their attribute values. Two value objects with the same values are considered equal.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. They represent
/// concepts where identity doesn't matter - only the values matter. A unit of
/// measure is a value object; a warehouse is an entity.
///
/// The trait requires:
/// - **Clone**: value objects should be cheap to copy
/// - **PartialEq**: value objects are compared by their attribute values
/// - **Debug**: value objects should be debuggable (helpful for logging, testing)
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
