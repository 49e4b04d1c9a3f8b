use crate::filter::BloomFilter;
use parking_lot::RwLock;

/// A [`BloomFilter`] shared between concurrent callers.
///
/// Lookups take a read lock and run in parallel with each other. Inserts,
/// including the combined check-then-insert of [`insert_if_absent`], take the
/// write lock, so two callers can never both claim the same key.
///
/// Guards are never held across an `.await`; every method completes
/// synchronously.
///
/// [`insert_if_absent`]: SharedBloomFilter::insert_if_absent
#[derive(Debug)]
pub struct SharedBloomFilter {
    inner: RwLock<BloomFilter>,
}

impl SharedBloomFilter {
    pub fn new(filter: BloomFilter) -> Self {
        Self {
            inner: RwLock::new(filter),
        }
    }

    /// Returns `false` if `key` was definitely never inserted.
    pub fn might_contain(&self, key: &[u8]) -> bool {
        self.inner.read().might_contain(key)
    }

    pub fn insert(&self, key: &[u8]) {
        self.inner.write().insert(key);
    }

    /// Inserts `key` unless the filter already reports it as possibly present.
    ///
    /// Returns `true` if the key was definitely absent and is now inserted,
    /// `false` if it might already be present (nothing is changed).
    pub fn insert_if_absent(&self, key: &[u8]) -> bool {
        let mut guard = self.inner.write();
        if guard.might_contain(key) {
            return false;
        }
        guard.insert(key);
        true
    }

    pub fn false_positive_rate(&self) -> f64 {
        self.inner.read().false_positive_rate()
    }

    /// Number of insertions performed so far.
    pub fn len(&self) -> u64 {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

impl From<BloomFilter> for SharedBloomFilter {
    fn from(filter: BloomFilter) -> Self {
        Self::new(filter)
    }
}
