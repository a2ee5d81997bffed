//! Generic key/value storage for one logical table.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, RwLock};

use crate::error::{StoreError, StoreResult};

/// Key/value store abstraction for one logical table.
pub trait TableStore<K, V>: Send + Sync {
    fn get(&self, key: &K) -> StoreResult<Option<V>>;
    fn upsert(&self, key: K, value: V) -> StoreResult<()>;
    /// Remove one row; `NotFound` when the key is absent.
    fn remove(&self, key: &K) -> StoreResult<()>;
    /// Full unfiltered table contents, ordered by key for determinism.
    fn list(&self) -> StoreResult<Vec<V>>;
    fn clear(&self) -> StoreResult<()>;
}

impl<K, V, S> TableStore<K, V> for Arc<S>
where
    S: TableStore<K, V> + ?Sized,
{
    fn get(&self, key: &K) -> StoreResult<Option<V>> {
        (**self).get(key)
    }

    fn upsert(&self, key: K, value: V) -> StoreResult<()> {
        (**self).upsert(key, value)
    }

    fn remove(&self, key: &K) -> StoreResult<()> {
        (**self).remove(key)
    }

    fn list(&self) -> StoreResult<Vec<V>> {
        (**self).list()
    }

    fn clear(&self) -> StoreResult<()> {
        (**self).clear()
    }
}

/// In-memory table store for tests/dev.
#[derive(Debug)]
pub struct InMemoryTableStore<K, V> {
    inner: RwLock<HashMap<K, V>>,
}

impl<K, V> InMemoryTableStore<K, V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl<K, V> Default for InMemoryTableStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> TableStore<K, V> for InMemoryTableStore<K, V>
where
    K: Clone + Ord + Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn get(&self, key: &K) -> StoreResult<Option<V>> {
        let map = self
            .inner
            .read()
            .map_err(|_| StoreError::backend("table lock poisoned"))?;
        Ok(map.get(key).cloned())
    }

    fn upsert(&self, key: K, value: V) -> StoreResult<()> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::backend("table lock poisoned"))?;
        map.insert(key, value);
        Ok(())
    }

    fn remove(&self, key: &K) -> StoreResult<()> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::backend("table lock poisoned"))?;
        map.remove(key).map(|_| ()).ok_or(StoreError::NotFound)
    }

    fn list(&self) -> StoreResult<Vec<V>> {
        let map = self
            .inner
            .read()
            .map_err(|_| StoreError::backend("table lock poisoned"))?;

        let mut rows: Vec<(&K, &V)> = map.iter().collect();
        rows.sort_by(|(a, _), (b, _)| a.cmp(b));
        Ok(rows.into_iter().map(|(_, v)| v.clone()).collect())
    }

    fn clear(&self) -> StoreResult<()> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::backend("table lock poisoned"))?;
        map.clear();
        Ok(())
    }
}
