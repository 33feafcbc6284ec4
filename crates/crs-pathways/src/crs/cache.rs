//! Time-bounded cache for reference tables fetched from the datastore.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use tracing::debug;

use super::calculator::PointsTable;
use super::draws::DrawRecord;
use super::pathways::ProgramRecord;

pub const POINTS_REFERENCE_KEY: &str = "points_reference";
pub const PROGRAMS_KEY: &str = "programs";
pub const DRAWS_KEY: &str = "draws";

/// Time source so cache expiry can be driven deterministically in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    elapsed: Arc<Mutex<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut elapsed = self.elapsed.lock().unwrap_or_else(PoisonError::into_inner);
        *elapsed += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        let elapsed = *self.elapsed.lock().unwrap_or_else(PoisonError::into_inner);
        self.origin + elapsed
    }
}

struct CachedEntry<T> {
    value: Arc<T>,
    loaded_at: Instant,
}

/// Single cached value under a fixed key, reloaded once older than the TTL.
pub struct TtlCell<T> {
    key: &'static str,
    ttl: Duration,
    slot: Mutex<Option<CachedEntry<T>>>,
}

impl<T> TtlCell<T> {
    pub fn new(key: &'static str, ttl: Duration) -> Self {
        Self {
            key,
            ttl,
            slot: Mutex::new(None),
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    fn fresh(&self, now: Instant) -> Option<Arc<T>> {
        let slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        slot.as_ref()
            .filter(|entry| now.saturating_duration_since(entry.loaded_at) < self.ttl)
            .map(|entry| Arc::clone(&entry.value))
    }

    /// Serve the cached value or run `loader`. Loader errors are returned and not cached.
    ///
    /// The loader runs without holding the lock, so two first-time callers may both
    /// reach the datastore; the later write wins.
    pub fn get_or_try_load<E, F>(&self, now: Instant, loader: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        if let Some(value) = self.fresh(now) {
            debug!(key = self.key, "reference cache hit");
            return Ok(value);
        }

        debug!(key = self.key, "reference cache miss; loading");
        let value = Arc::new(loader()?);
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(CachedEntry {
            value: Arc::clone(&value),
            loaded_at: now,
        });
        Ok(value)
    }

    pub fn is_fresh(&self, now: Instant) -> bool {
        self.fresh(now).is_some()
    }

    pub fn invalidate(&self) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = None;
    }
}

/// One TTL cell per reference table, sharing an injected clock.
pub struct ReferenceCache {
    clock: Arc<dyn Clock>,
    ttl: Duration,
    points: TtlCell<PointsTable>,
    programs: TtlCell<Vec<ProgramRecord>>,
    draws: TtlCell<Vec<DrawRecord>>,
}

impl ReferenceCache {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            ttl,
            points: TtlCell::new(POINTS_REFERENCE_KEY, ttl),
            programs: TtlCell::new(PROGRAMS_KEY, ttl),
            draws: TtlCell::new(DRAWS_KEY, ttl),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn points_table<E, F>(&self, loader: F) -> Result<Arc<PointsTable>, E>
    where
        F: FnOnce() -> Result<PointsTable, E>,
    {
        self.points.get_or_try_load(self.clock.now(), loader)
    }

    pub fn programs<E, F>(&self, loader: F) -> Result<Arc<Vec<ProgramRecord>>, E>
    where
        F: FnOnce() -> Result<Vec<ProgramRecord>, E>,
    {
        self.programs.get_or_try_load(self.clock.now(), loader)
    }

    pub fn draws<E, F>(&self, loader: F) -> Result<Arc<Vec<DrawRecord>>, E>
    where
        F: FnOnce() -> Result<Vec<DrawRecord>, E>,
    {
        self.draws.get_or_try_load(self.clock.now(), loader)
    }

    /// Drop one table by key. Returns false for an unknown key.
    pub fn invalidate(&self, key: &str) -> bool {
        match key {
            POINTS_REFERENCE_KEY => self.points.invalidate(),
            PROGRAMS_KEY => self.programs.invalidate(),
            DRAWS_KEY => self.draws.invalidate(),
            _ => return false,
        }
        true
    }

    pub fn invalidate_all(&self) {
        self.points.invalidate();
        self.programs.invalidate();
        self.draws.invalidate();
    }

    /// Keys currently served from memory.
    pub fn cached_keys(&self) -> Vec<&'static str> {
        let now = self.clock.now();
        let mut keys = Vec::new();
        if self.points.is_fresh(now) {
            keys.push(self.points.key());
        }
        if self.programs.is_fresh(now) {
            keys.push(self.programs.key());
        }
        if self.draws.is_fresh(now) {
            keys.push(self.draws.key());
        }
        keys
    }
}
