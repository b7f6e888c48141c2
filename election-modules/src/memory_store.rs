use lease_election::{AcquireOutcome, CoordinationStore, ElectionError, RenewOutcome, Result};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Basic in-memory implementation of the CoordinationStore trait. Every call
/// runs under one lock, which makes the three operations atomic with respect
/// to each other. Leases expire lazily when touched.
///
/// Clones share the same state, so several elections in one process can
/// contend for the same keys.
#[derive(Clone, Debug, Default)]
pub struct MemoryCoordinationStore {
    store: Arc<Mutex<MemoryStoreInternal>>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct MemoryLease {
    owner: String,
    expires_at: Instant,
}

#[derive(Clone, Debug)]
struct MemoryStoreInternal {
    leases: HashMap<String, MemoryLease>,
    available: bool,
}

impl Default for MemoryStoreInternal {
    fn default() -> Self {
        MemoryStoreInternal {
            leases: HashMap::new(),
            available: true,
        }
    }
}

impl MemoryStoreInternal {
    fn ensure_available(&self, operation: &str) -> Result<()> {
        if !self.available {
            return Err(ElectionError::store_unavailable(
                format!("Memory store is offline. Operation: {}", operation),
                String::new(),
            ));
        }

        Ok(())
    }

    fn live_lease(&mut self, key: &str, now: Instant) -> Option<&mut MemoryLease> {
        let expired = match self.leases.get(key) {
            Some(lease) => lease.expires_at <= now,
            None => return None,
        };

        if expired {
            trace!("Memory store lease expired: {}", key);
            self.leases.remove(key);
            return None;
        }

        self.leases.get_mut(key)
    }
}

impl CoordinationStore for MemoryCoordinationStore {
    fn acquire_if_absent(&self, key: &str, value: &str, ttl: Duration) -> Result<AcquireOutcome> {
        let mut store = self.store.lock();
        store.ensure_available("acquire")?;

        let now = Instant::now();
        if let Some(lease) = store.live_lease(key, now) {
            return Ok(AcquireOutcome::Existing(lease.owner.clone()));
        }

        store.leases.insert(
            key.to_string(),
            MemoryLease {
                owner: value.to_string(),
                expires_at: now + ttl,
            },
        );

        Ok(AcquireOutcome::Created)
    }

    fn renew_if_owned(&self, key: &str, expected_value: &str, ttl: Duration) -> Result<RenewOutcome> {
        let mut store = self.store.lock();
        store.ensure_available("renew")?;

        let now = Instant::now();
        match store.live_lease(key, now) {
            None => Ok(RenewOutcome::Absent),
            Some(lease) if lease.owner == expected_value => {
                lease.expires_at = now + ttl;
                Ok(RenewOutcome::Renewed)
            }
            Some(_) => Ok(RenewOutcome::OwnerMismatch),
        }
    }

    fn read(&self, key: &str) -> Result<Option<String>> {
        let mut store = self.store.lock();
        store.ensure_available("read")?;

        Ok(store
            .live_lease(key, Instant::now())
            .map(|lease| lease.owner.clone()))
    }
}

impl MemoryCoordinationStore {
    /// Creates an empty, available store.
    pub fn new() -> MemoryCoordinationStore {
        MemoryCoordinationStore::default()
    }

    /// Takes the store offline (every call fails with `StoreUnavailable`) or
    /// brings it back. Leases keep expiring while offline.
    pub fn set_available(&self, available: bool) {
        let mut store = self.store.lock();

        info!("Memory store available: {}", available);
        store.available = available;
    }

    /// Removes the lease regardless of owner and expiry. Returns the evicted owner.
    pub fn evict(&self, key: &str) -> Option<String> {
        let mut store = self.store.lock();

        store.leases.remove(key).map(|lease| lease.owner)
    }

    /// Current owner of an unexpired lease, bypassing availability.
    pub fn owner(&self, key: &str) -> Option<String> {
        let mut store = self.store.lock();

        store
            .live_lease(key, Instant::now())
            .map(|lease| lease.owner.clone())
    }

    /// Remaining lease time, bypassing availability.
    pub fn expires_in(&self, key: &str) -> Option<Duration> {
        let mut store = self.store.lock();
        let now = Instant::now();

        store
            .live_lease(key, now)
            .map(|lease| lease.expires_at.saturating_duration_since(now))
    }

    /// Number of unexpired leases across all keys.
    pub fn lease_count(&self) -> usize {
        let store = self.store.lock();
        let now = Instant::now();

        store
            .leases
            .values()
            .filter(|lease| lease.expires_at > now)
            .count()
    }
}
