use crate::application::ports::{CacheView, CacheWrite, QueryCache};
use crate::domain::entities::{CollectionSnapshot, Resource};
use crate::domain::value_objects::{CacheVersion, QueryKey};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};

struct CacheEntry<R> {
    snapshot: CollectionSnapshot<R>,
    version: CacheVersion,
}

struct CacheState<R> {
    entries: LruCache<QueryKey, CacheEntry<R>>,
    // キャッシュ全体で単調増加。退避・無効化後に同じ値が再利用されることはない
    last_version: u64,
}

impl<R> CacheState<R> {
    fn put(&mut self, key: &QueryKey, snapshot: CollectionSnapshot<R>) -> CacheVersion {
        self.last_version += 1;
        let version = CacheVersion::new(self.last_version);
        self.entries.put(key.clone(), CacheEntry { snapshot, version });
        version
    }

    fn version_of(&self, key: &QueryKey) -> CacheVersion {
        self.entries
            .peek(key)
            .map(|entry| entry.version)
            .unwrap_or(CacheVersion::ABSENT)
    }
}

/// クエリキー単位のインメモリキャッシュ（LRU でキー数を制限）
pub struct MemoryQueryCache<R> {
    state: Mutex<CacheState<R>>,
}

impl<R: Resource> MemoryQueryCache<R> {
    pub fn new(max_keys: usize) -> Self {
        let capacity = NonZeroUsize::new(max_keys).unwrap_or(NonZeroUsize::MIN);
        Self {
            state: Mutex::new(CacheState {
                entries: LruCache::new(capacity),
                last_version: 0,
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lock().entries.clear();
    }

    fn lock(&self) -> MutexGuard<'_, CacheState<R>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<R: Resource> QueryCache<R> for MemoryQueryCache<R> {
    fn get(&self, key: &QueryKey) -> Option<CollectionSnapshot<R>> {
        self.lock().entries.get(key).map(|entry| entry.snapshot.clone())
    }

    fn version(&self, key: &QueryKey) -> CacheVersion {
        self.lock().version_of(key)
    }

    fn set(&self, key: &QueryKey, snapshot: CollectionSnapshot<R>) -> CacheVersion {
        self.lock().put(key, snapshot)
    }

    fn invalidate(&self, key: &QueryKey) -> bool {
        self.lock().entries.pop(key).is_some()
    }

    fn invalidate_where(&self, predicate: &dyn Fn(&QueryKey) -> bool) -> usize {
        let mut state = self.lock();
        let matched: Vec<QueryKey> = state
            .entries
            .iter()
            .map(|(key, _)| key)
            .filter(|key| predicate(*key))
            .cloned()
            .collect();
        for key in &matched {
            state.entries.pop(key);
        }
        matched.len()
    }

    fn keys(&self) -> Vec<QueryKey> {
        self.lock().entries.iter().map(|(key, _)| key.clone()).collect()
    }

    fn transact(
        &self,
        key: &QueryKey,
        decide: &mut dyn FnMut(CacheView<'_, R>) -> CacheWrite<R>,
    ) -> CacheVersion {
        let mut state = self.lock();
        let write = match state.entries.get(key) {
            Some(entry) => decide(CacheView {
                snapshot: Some(&entry.snapshot),
                version: entry.version,
            }),
            None => decide(CacheView {
                snapshot: None,
                version: CacheVersion::ABSENT,
            }),
        };

        match write {
            CacheWrite::Keep => state.version_of(key),
            CacheWrite::Replace(snapshot) => state.put(key, snapshot),
        }
    }
}
