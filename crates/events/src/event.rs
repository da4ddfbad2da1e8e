//! Event and event-kind abstractions.

/// Tag identifying the concrete type of an event.
///
/// Kinds form a small, explicit hierarchy: a kind may name the kinds it is a
/// subtype of. Abstract kinds (ones no event ever reports from
/// [`Event::kind`]) are allowed and only serve as subscription targets.
pub trait EventKind:
    Copy + Eq + Ord + core::hash::Hash + core::fmt::Debug + Send + Sync + 'static
{
    /// Every kind this kind is a subtype of, nearest first.
    ///
    /// The list must be transitively closed: if `A` extends `B` and `B`
    /// extends `C`, then `A::supertypes()` lists both `B` and `C`.
    fn supertypes(self) -> &'static [Self] {
        &[]
    }

    /// `true` if an event of kind `self` should be delivered to subscribers of
    /// `declared`.
    fn is_subtype_of(self, declared: Self) -> bool {
        self == declared || self.supertypes().contains(&declared)
    }
}

/// A domain event.
///
/// Events are:
/// - **immutable** (treat them as facts)
/// - **anonymous** (no identity beyond their content)
/// - **fire-and-forget** (never retried or acknowledged)
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    type Kind: EventKind;

    /// Concrete kind of this event.
    fn kind(&self) -> Self::Kind;

    /// Stable event name (e.g. "BookSoldOut").
    fn event_type(&self) -> &'static str;
}

/// Declared subscription target.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Topic<K> {
    /// A kind and all of its subtypes.
    Kind(K),
    /// Every event published on the bus.
    Any,
}

impl<K: EventKind> Topic<K> {
    /// `true` if an event of `kind` is delivered to this topic.
    pub fn matches(&self, kind: K) -> bool {
        match self {
            Topic::Any => true,
            Topic::Kind(declared) => kind.is_subtype_of(*declared),
        }
    }
}

impl<K: EventKind> From<K> for Topic<K> {
    fn from(kind: K) -> Self {
        Topic::Kind(kind)
    }
}
