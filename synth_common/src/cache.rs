//! Memoized snapshots keyed by ticker.
//!
//! The first lookup of a ticker generates its snapshot; later lookups return
//! the same `Arc` until the entry is invalidated. Because snapshots carry a
//! time-of-generation stamp, a cached entry keeps the stamp of its first
//! lookup.
//!
//! The cache is `Sync`: entries live behind a `Mutex`. Generation happens
//! outside the lock, so two threads racing on a cold ticker may both generate;
//! the first insert wins and both get the stored value.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use log::debug;

use crate::clock::{Clock, SystemClock};
use crate::generator::generate_at;
use crate::model::SyntheticPriceData;
use crate::result::Result;
use crate::tickers::Ticker;

/// Ticker-keyed snapshot memo.
pub struct SnapshotCache<C: Clock = SystemClock> {
    entries: Mutex<HashMap<Ticker, Arc<SyntheticPriceData>>>,
    clock: C,
}

impl SnapshotCache<SystemClock> {
    /// Empty cache stamping snapshots with the wall clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for SnapshotCache<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> SnapshotCache<C> {
    /// Empty cache stamping snapshots with `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Cached snapshot for `ticker`, generated on first use.
    pub fn get(&self, ticker: &str) -> Result<Arc<SyntheticPriceData>> {
        let key = Ticker::new(ticker);
        if let Some(hit) = self.entries.lock()?.get(&key) {
            return Ok(Arc::clone(hit));
        }

        let fresh = Arc::new(generate_at(key.as_str(), self.clock.now()));
        let mut entries = self.entries.lock()?;
        let stored = entries.entry(key).or_insert_with(|| {
            debug!("Cached snapshot for {}", fresh.ticker);
            Arc::clone(&fresh)
        });
        Ok(Arc::clone(stored))
    }

    /// Drop the entry for `ticker`; returns whether one existed.
    pub fn invalidate(&self, ticker: &str) -> Result<bool> {
        Ok(self.entries.lock()?.remove(&Ticker::new(ticker)).is_some())
    }

    /// Drop every entry.
    pub fn clear(&self) -> Result<()> {
        self.entries.lock()?.clear();
        Ok(())
    }

    /// Number of cached tickers.
    pub fn len(&self) -> Result<usize> {
        Ok(self.entries.lock()?.len())
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}
