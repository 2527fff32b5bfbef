//! Upload dedupe cache and rate limiter
//!
//! The upload layer around receipt processing deduplicates concurrent
//! uploads of the same file. Instead of module-level maps, both services
//! are explicitly constructed and injected by the caller; entries expire
//! after a TTL and are evicted lazily on access.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::models::ReceiptParseResult;

/// Dedupe key for an uploaded receipt file: name, size, and modification
/// time. Cheap to compute and stable across retries of the same file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    pub name: String,
    pub size: u64,
    /// Modification time, seconds since the Unix epoch
    pub modified: u64,
}

impl Fingerprint {
    pub fn new(name: impl Into<String>, size: u64, modified: u64) -> Self {
        Self {
            name: name.into(),
            size,
            modified,
        }
    }
}

/// Time-bounded cache of parse results keyed by file fingerprint.
pub struct UploadCache {
    ttl: Duration,
    entries: Mutex<HashMap<Fingerprint, (Instant, ReceiptParseResult)>>,
}

impl UploadCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Look up an unexpired cached result.
    pub fn get(&self, fingerprint: &Fingerprint) -> Option<ReceiptParseResult> {
        let mut entries = self.entries.lock().unwrap();

        if let Some((inserted, result)) = entries.get(fingerprint) {
            if inserted.elapsed() < self.ttl {
                debug!(name = %fingerprint.name, "upload cache hit");
                return Some(result.clone());
            }
        }

        // Expired or absent; either way the slot is dead
        entries.remove(fingerprint);
        None
    }

    /// Store a result, evicting any expired entries while we hold the lock.
    pub fn insert(&self, fingerprint: Fingerprint, result: ReceiptParseResult) {
        let mut entries = self.entries.lock().unwrap();
        let ttl = self.ttl;
        entries.retain(|_, (inserted, _)| inserted.elapsed() < ttl);
        entries.insert(fingerprint, (Instant::now(), result));
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Minimum-interval rate limiter (default use: 1 upload per second).
pub struct RateLimiter {
    min_interval: Duration,
    last: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last: Mutex::new(None),
        }
    }

    /// Returns true and records the attempt if enough time has passed
    /// since the last accepted call.
    pub fn try_acquire(&self) -> bool {
        let mut last = self.last.lock().unwrap();
        let now = Instant::now();

        match *last {
            Some(prev) if now.duration_since(prev) < self.min_interval => false,
            _ => {
                *last = Some(now);
                true
            }
        }
    }
}
