//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attributes, e.g. a price
/// range `[0, 30000]` or an amount of rubles. To "change" one, build a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
