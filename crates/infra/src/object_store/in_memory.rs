use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Debug;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::schema::{IndexValue, MetadataSchema};
use super::{ObjectStore, StoreError, StoreResult};

struct Entry<A, S> {
    value: A,
    /// Tag values as indexed at the last mutation, for unindexing.
    tags: Vec<(S, IndexValue)>,
}

struct Indexed<A, K, S> {
    entries: BTreeMap<K, Entry<A, S>>,
    indexes: BTreeMap<S, BTreeMap<IndexValue, BTreeSet<K>>>,
}

impl<A, K: Ord + Clone, S: Ord + Copy> Indexed<A, K, S> {
    fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            indexes: BTreeMap::new(),
        }
    }

    fn index(&mut self, key: &K, tags: &[(S, IndexValue)]) {
        for (tag, value) in tags {
            self.indexes
                .entry(*tag)
                .or_default()
                .entry(value.clone())
                .or_default()
                .insert(key.clone());
        }
    }

    fn unindex(&mut self, key: &K, tags: &[(S, IndexValue)]) {
        for (tag, value) in tags {
            let Some(index) = self.indexes.get_mut(tag) else {
                continue;
            };
            if let Some(keys) = index.get_mut(value) {
                keys.remove(key);
                if keys.is_empty() {
                    index.remove(value);
                }
            }
        }
    }

    fn values<'a>(&'a self, keys: impl Iterator<Item = &'a K>) -> impl Iterator<Item = &'a A> {
        keys.filter_map(|k| self.entries.get(k).map(|e| &e.value))
    }
}

/// In-memory [`ObjectStore`] guarded by a single `RwLock`.
///
/// The primary key is extracted from each value with `key_of`. Tag values are
/// computed before the lock is taken, so extractors never run while other
/// callers are blocked.
pub struct InMemoryObjectStore<A, K, S> {
    name: &'static str,
    key_of: fn(&A) -> K,
    inner: RwLock<Indexed<A, K, S>>,
}

impl<A, K, S> InMemoryObjectStore<A, K, S>
where
    K: Ord + Clone,
    S: MetadataSchema<A>,
{
    pub fn new(name: &'static str, key_of: fn(&A) -> K) -> Self {
        Self {
            name,
            key_of,
            inner: RwLock::new(Indexed::new()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    fn tags_of(value: &A) -> Vec<(S, IndexValue)> {
        S::ALL
            .iter()
            .map(|tag| (*tag, tag.tag().extract(value)))
            .collect()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Indexed<A, K, S>>> {
        self.inner.read().map_err(|_| StoreError::Poisoned(self.name))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Indexed<A, K, S>>> {
        self.inner.write().map_err(|_| StoreError::Poisoned(self.name))
    }

    fn check_value(tag: S, value: &IndexValue) -> StoreResult<()> {
        let expected = tag.tag().kind();
        if value.kind() != expected {
            return Err(StoreError::TagMismatch {
                tag: format!("{tag:?}"),
                detail: format!("{expected} tag queried with {} value", value.kind()),
            });
        }
        Ok(())
    }

    fn check_ordered(tag: S, operation: &str) -> StoreResult<()> {
        let kind = tag.tag().kind();
        if !kind.is_ordered() {
            return Err(StoreError::TagMismatch {
                tag: format!("{tag:?}"),
                detail: format!("{operation} is not supported on {kind} tags"),
            });
        }
        Ok(())
    }
}

impl<A, K, S> ObjectStore<A, K, S> for InMemoryObjectStore<A, K, S>
where
    A: Clone + Send + Sync,
    K: Ord + Clone + Debug + Send + Sync,
    S: MetadataSchema<A>,
{
    fn add(&self, value: A) -> StoreResult<()> {
        let key = (self.key_of)(&value);
        let tags = Self::tags_of(&value);

        let mut inner = self.write()?;
        if inner.entries.contains_key(&key) {
            return Err(StoreError::DuplicateKey {
                store: self.name,
                key: format!("{key:?}"),
            });
        }
        inner.index(&key, &tags);
        inner.entries.insert(key.clone(), Entry { value, tags });

        tracing::debug!(store = self.name, key = ?key, "object added");
        Ok(())
    }

    fn update(&self, value: A) -> StoreResult<()> {
        let key = (self.key_of)(&value);
        let tags = Self::tags_of(&value);

        let mut inner = self.write()?;
        let Some(old) = inner.entries.remove(&key) else {
            return Err(StoreError::NotFound {
                store: self.name,
                key: format!("{key:?}"),
            });
        };
        inner.unindex(&key, &old.tags);
        inner.index(&key, &tags);
        inner.entries.insert(key.clone(), Entry { value, tags });

        tracing::debug!(store = self.name, key = ?key, "object updated");
        Ok(())
    }

    fn remove(&self, key: &K) -> StoreResult<A> {
        let mut inner = self.write()?;
        let Some(old) = inner.entries.remove(key) else {
            return Err(StoreError::NotFound {
                store: self.name,
                key: format!("{key:?}"),
            });
        };
        inner.unindex(key, &old.tags);

        tracing::debug!(store = self.name, key = ?key, "object removed");
        Ok(old.value)
    }

    fn remove_all(&self) -> StoreResult<()> {
        let mut inner = self.write()?;
        let removed = inner.entries.len();
        inner.entries.clear();
        inner.indexes.clear();

        tracing::debug!(store = self.name, removed, "store cleared");
        Ok(())
    }

    fn get(&self, key: &K) -> StoreResult<Option<A>> {
        let inner = self.read()?;
        Ok(inner.entries.get(key).map(|e| e.value.clone()))
    }

    fn get_all(&self) -> StoreResult<Vec<A>> {
        let inner = self.read()?;
        Ok(inner.entries.values().map(|e| e.value.clone()).collect())
    }

    fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.entries.len())
    }

    fn contains(&self, key: &K) -> StoreResult<bool> {
        Ok(self.read()?.entries.contains_key(key))
    }

    fn equal_to(&self, tag: S, value: IndexValue) -> StoreResult<Vec<A>> {
        Self::check_value(tag, &value)?;

        let inner = self.read()?;
        let Some(keys) = inner.indexes.get(&tag).and_then(|index| index.get(&value)) else {
            return Ok(Vec::new());
        };
        Ok(inner.values(keys.iter()).cloned().collect())
    }

    fn range_closed(&self, tag: S, low: IndexValue, high: IndexValue) -> StoreResult<Vec<A>> {
        Self::check_ordered(tag, "range")?;
        Self::check_value(tag, &low)?;
        Self::check_value(tag, &high)?;
        if low > high {
            return Ok(Vec::new());
        }

        let inner = self.read()?;
        let Some(index) = inner.indexes.get(&tag) else {
            return Ok(Vec::new());
        };
        let keys = index.range(low..=high).flat_map(|(_, keys)| keys.iter());
        Ok(inner.values(keys).cloned().collect())
    }

    fn descending(&self, tag: S, limit: usize) -> StoreResult<Vec<A>> {
        Self::check_ordered(tag, "descending")?;

        let inner = self.read()?;
        let Some(index) = inner.indexes.get(&tag) else {
            return Ok(Vec::new());
        };
        let keys = index.iter().rev().flat_map(|(_, keys)| keys.iter());
        Ok(inner.values(keys).take(limit).cloned().collect())
    }

    fn ascending(&self, tag: S, limit: usize) -> StoreResult<Vec<A>> {
        Self::check_ordered(tag, "ascending")?;

        let inner = self.read()?;
        let Some(index) = inner.indexes.get(&tag) else {
            return Ok(Vec::new());
        };
        let keys = index.iter().flat_map(|(_, keys)| keys.iter());
        Ok(inner.values(keys).take(limit).cloned().collect())
    }
}

impl<A, K, S> Debug for InMemoryObjectStore<A, K, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryObjectStore")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
