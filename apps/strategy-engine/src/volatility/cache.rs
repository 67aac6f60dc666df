//! Read-through volatility context cache.
//!
//! Entries are keyed by (symbol, date). The map lock is held only long
//! enough to fetch or insert the slot for a key; the slot itself is a
//! `OnceLock`, so concurrent callers for the same key block on the single
//! computation instead of recomputing. Contexts are daily: inserting a key
//! for a new date evicts every key dated before it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use chrono::NaiveDate;
use tracing::debug;

use super::context::VolatilityContext;
use crate::observability::record_volatility_cache_lookup;

type CacheKey = (String, NaiveDate);

/// Single-flight cache of computed volatility contexts.
#[derive(Debug, Default)]
pub struct VolatilityCache {
    entries: Mutex<HashMap<CacheKey, Arc<OnceLock<VolatilityContext>>>>,
}

impl VolatilityCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached context for (symbol, as_of), computing it on a miss.
    pub fn get_or_compute<F>(&self, symbol: &str, as_of: NaiveDate, compute: F) -> VolatilityContext
    where
        F: FnOnce() -> VolatilityContext,
    {
        let (context, hit) = self.lookup(symbol, as_of, compute);
        record_volatility_cache_lookup(hit);
        context
    }

    /// Context plus whether this caller was served without running `compute`.
    ///
    /// Callers that wait on another caller's in-flight computation are hits.
    fn lookup<F>(&self, symbol: &str, as_of: NaiveDate, compute: F) -> (VolatilityContext, bool)
    where
        F: FnOnce() -> VolatilityContext,
    {
        let slot = self.slot(symbol, as_of);
        let mut computed = false;
        let context = slot
            .get_or_init(|| {
                computed = true;
                compute()
            })
            .clone();
        (context, !computed)
    }

    /// Cached context, if already computed.
    #[must_use]
    pub fn get(&self, symbol: &str, as_of: NaiveDate) -> Option<VolatilityContext> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(&(symbol.to_string(), as_of))
            .and_then(|slot| slot.get().cloned())
    }

    /// Drop one entry so the next lookup recomputes it.
    pub fn invalidate(&self, symbol: &str, as_of: NaiveDate) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(&(symbol.to_string(), as_of));
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Number of keys with a slot (computed or in flight).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, symbol: &str, as_of: NaiveDate) -> Arc<OnceLock<VolatilityContext>> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let key = (symbol.to_string(), as_of);
        if let Some(slot) = entries.get(&key) {
            return Arc::clone(slot);
        }

        let before = entries.len();
        entries.retain(|(_, date), _| *date >= as_of);
        if entries.len() < before {
            debug!(%as_of, evicted = before - entries.len(), "Evicted stale volatility contexts");
        }
        Arc::clone(entries.entry(key).or_default())
    }
}
