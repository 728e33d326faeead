use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::types::FeedDocument;

/// In-process cache slot for the feed document, with a fixed time-to-live.
///
/// The cache is an explicit injected object so tests can construct, prime,
/// and expire one directly. Lock discipline: the inner mutex is only ever
/// held for a field read or swap, never across I/O.
#[derive(Debug, Clone)]
pub struct FeedCache {
    ttl: Duration,
    slot: Arc<Mutex<Option<CachedFeed>>>,
}

#[derive(Debug)]
struct CachedFeed {
    document: Arc<FeedDocument>,
    fetched_at: Instant,
}

impl FeedCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Arc::new(Mutex::new(None)),
        }
    }

    /// Returns the cached document if a fresh entry is present.
    #[must_use]
    pub fn get(&self) -> Option<Arc<FeedDocument>> {
        self.get_at(Instant::now())
    }

    /// Stores a document stamped with the current instant and returns the
    /// shared handle to it.
    pub fn put(&self, document: FeedDocument) -> Arc<FeedDocument> {
        self.put_at(document, Instant::now())
    }

    /// Drops any cached entry, fresh or not.
    pub fn clear(&self) {
        *self.lock_slot() = None;
    }

    fn get_at(&self, now: Instant) -> Option<Arc<FeedDocument>> {
        let slot = self.lock_slot();
        let cached = slot.as_ref()?;
        if now.duration_since(cached.fetched_at) < self.ttl {
            Some(Arc::clone(&cached.document))
        } else {
            None
        }
    }

    fn put_at(&self, document: FeedDocument, now: Instant) -> Arc<FeedDocument> {
        let document = Arc::new(document);
        *self.lock_slot() = Some(CachedFeed {
            document: Arc::clone(&document),
            fetched_at: now,
        });
        document
    }

    fn lock_slot(&self) -> std::sync::MutexGuard<'_, Option<CachedFeed>> {
        self.slot
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
