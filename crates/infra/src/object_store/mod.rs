//! Generic keyed object store with typed secondary indexes.
//!
//! Aggregates are stored under a primary key extracted from the value. A
//! [`MetadataSchema`] enum declares the secondary indexes ("tags"): each
//! variant maps to an extractor function producing a numeric, boolean, text
//! or timestamp value. Tag values are recomputed on every `add`/`update`, so
//! tag queries always reflect the latest successful mutation.

pub mod in_memory;
pub mod schema;

use std::sync::Arc;

use thiserror::Error;

use portico_core::DomainError;

pub use in_memory::InMemoryObjectStore;
pub use schema::{IndexValue, MetaTag, MetadataSchema, NoTags, TagKind};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("duplicate key {key} in store {store}")]
    DuplicateKey { store: &'static str, key: String },

    #[error("key {key} not found in store {store}")]
    NotFound { store: &'static str, key: String },

    /// Query value of the wrong kind, or an operator the tag's kind does not
    /// support (ranges and ordering on boolean or text tags).
    #[error("tag {tag} mismatch: {detail}")]
    TagMismatch { tag: String, detail: String },

    #[error("store {0} lock poisoned")]
    Poisoned(&'static str),
}

impl From<StoreError> for DomainError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::DuplicateKey { key, .. } => DomainError::duplicate_key(key),
            StoreError::NotFound { key, .. } => DomainError::not_found(key),
            e @ StoreError::TagMismatch { .. } => {
                DomainError::validation(e.to_string())
            }
            e @ StoreError::Poisoned(_) => DomainError::storage(e.to_string()),
        }
    }
}

/// Keyed collection of `A` values with secondary indexes declared by `S`.
///
/// Implementations guarantee that no query observes a partially applied
/// mutation: each mutating call is applied atomically with respect to every
/// other call on the same store.
pub trait ObjectStore<A, K, S>: Send + Sync {
    /// Insert a new value. Fails with `DuplicateKey` (and changes nothing) if
    /// the key is taken.
    fn add(&self, value: A) -> StoreResult<()>;

    /// Replace the stored value for the value's key. Fails with `NotFound` if
    /// the key is absent.
    fn update(&self, value: A) -> StoreResult<()>;

    /// Delete and return the value stored under `key`. Fails with `NotFound`
    /// if the key is absent.
    fn remove(&self, key: &K) -> StoreResult<A>;

    fn remove_all(&self) -> StoreResult<()>;

    fn get(&self, key: &K) -> StoreResult<Option<A>>;

    /// Every stored value, ordered by key.
    fn get_all(&self) -> StoreResult<Vec<A>>;

    fn len(&self) -> StoreResult<usize>;

    fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    fn contains(&self, key: &K) -> StoreResult<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Values whose `tag` equals `value`, ordered by key.
    fn equal_to(&self, tag: S, value: IndexValue) -> StoreResult<Vec<A>>;

    /// Values whose `tag` lies in `[low, high]`, ordered by tag value then key.
    ///
    /// Only numeric and timestamp tags support ranges.
    fn range_closed(&self, tag: S, low: IndexValue, high: IndexValue) -> StoreResult<Vec<A>>;

    /// Up to `limit` values with the highest `tag`, highest first.
    fn descending(&self, tag: S, limit: usize) -> StoreResult<Vec<A>>;

    /// Up to `limit` values with the lowest `tag`, lowest first.
    fn ascending(&self, tag: S, limit: usize) -> StoreResult<Vec<A>>;
}

impl<A, K, S, T> ObjectStore<A, K, S> for Arc<T>
where
    T: ObjectStore<A, K, S> + ?Sized,
{
    fn add(&self, value: A) -> StoreResult<()> {
        (**self).add(value)
    }

    fn update(&self, value: A) -> StoreResult<()> {
        (**self).update(value)
    }

    fn remove(&self, key: &K) -> StoreResult<A> {
        (**self).remove(key)
    }

    fn remove_all(&self) -> StoreResult<()> {
        (**self).remove_all()
    }

    fn get(&self, key: &K) -> StoreResult<Option<A>> {
        (**self).get(key)
    }

    fn get_all(&self) -> StoreResult<Vec<A>> {
        (**self).get_all()
    }

    fn len(&self) -> StoreResult<usize> {
        (**self).len()
    }

    fn equal_to(&self, tag: S, value: IndexValue) -> StoreResult<Vec<A>> {
        (**self).equal_to(tag, value)
    }

    fn range_closed(&self, tag: S, low: IndexValue, high: IndexValue) -> StoreResult<Vec<A>> {
        (**self).range_closed(tag, low, high)
    }

    fn descending(&self, tag: S, limit: usize) -> StoreResult<Vec<A>> {
        (**self).descending(tag, limit)
    }

    fn ascending(&self, tag: S, limit: usize) -> StoreResult<Vec<A>> {
        (**self).ascending(tag, limit)
    }
}
