//! URL-keyed freshness cache for fetched sheets.
//!
//! Entries are fresh while their age is strictly below the TTL. The cache
//! itself is not synchronized; [`crate::source::SheetSource`] owns it behind
//! an async mutex.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Default freshness window (5 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

struct CacheEntry<T> {
    value: T,
    inserted_at: Instant,
}

impl<T: Clone> CacheEntry<T> {
    fn get_at(&self, ttl: Duration, now: Instant) -> Option<T> {
        let age = now.saturating_duration_since(self.inserted_at);
        (age < ttl).then(|| self.value.clone())
    }
}

pub struct SheetCache<T> {
    entries: HashMap<String, CacheEntry<T>>,
    ttl: Duration,
}

impl<T: Clone> SheetCache<T> {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    /// The value cached for `url`, if still fresh.
    #[must_use]
    pub fn get(&self, url: &str) -> Option<T> {
        self.get_at(url, Instant::now())
    }

    #[must_use]
    pub fn get_at(&self, url: &str, now: Instant) -> Option<T> {
        self.entries.get(url)?.get_at(self.ttl, now)
    }

    pub fn insert(&mut self, url: &str, value: T) {
        self.insert_at(url, value, Instant::now());
    }

    pub fn insert_at(&mut self, url: &str, value: T, inserted_at: Instant) {
        self.entries
            .insert(url.to_owned(), CacheEntry { value, inserted_at });
    }

    pub fn invalidate(&mut self, url: &str) {
        self.entries.remove(url);
    }
}

impl<T: Clone> Default for SheetCache<T> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
