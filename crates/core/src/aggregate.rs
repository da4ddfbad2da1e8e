//! Aggregate root trait.

/// Aggregate root marker + minimal interface.
///
/// The identifier is assigned exactly once, by the aggregate's factory
/// function, and never changes afterwards. Implementations must not expose a
/// setter for it.
pub trait AggregateRoot {
    /// Strongly-typed aggregate identifier.
    type Id: Clone + Eq + Ord + core::hash::Hash + core::fmt::Debug;

    /// Returns the aggregate identifier.
    fn id(&self) -> &Self::Id;
}
