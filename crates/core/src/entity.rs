//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Products are entities of the catalog; cart lines are entities of a
/// session (two lines for the same product are still different lines).
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
