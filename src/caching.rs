//! Keeps resampled frames around for a while so page loads and selector changes don't refetch.
//! Bounded in size, entries expire after a fixed lifespan.

use std::{fmt::Display, future::Future, sync::Mutex};

use anyhow::Result;
use cached::{Cached, TimedSizedCache};
use tracing::{debug, trace};

use crate::{frame::Frame, granularity::Granularity};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Dataset {
    DaiMarket,
}

impl Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DaiMarket => write!(f, "dai-market"),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct CacheKey {
    pub dataset: Dataset,
    pub granularity: Granularity,
}

impl CacheKey {
    pub fn new(dataset: Dataset, granularity: Granularity) -> Self {
        Self {
            dataset,
            granularity,
        }
    }
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.dataset, self.granularity)
    }
}

pub struct FrameCache(Mutex<TimedSizedCache<CacheKey, Frame>>);

impl FrameCache {
    pub fn new(size: usize, lifespan_seconds: u64) -> Self {
        Self(Mutex::new(TimedSizedCache::with_size_and_lifespan(
            size,
            lifespan_seconds,
        )))
    }

    pub fn get(&self, key: &CacheKey) -> Option<Frame> {
        self.0.lock().unwrap().cache_get(key).cloned()
    }

    pub fn insert(&self, key: CacheKey, frame: Frame) {
        self.0.lock().unwrap().cache_set(key, frame);
    }

    pub fn len(&self) -> usize {
        self.0.lock().unwrap().cache_size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the cached frame for `key`, or loads, caches and returns it. Empty frames, what a
    /// failing upstream gives us, are returned but not cached.
    pub async fn get_or_load<F, Fut>(&self, key: CacheKey, load: F) -> Result<Frame>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Frame>>,
    {
        if let Some(frame) = self.get(&key) {
            trace!(%key, "cache hit");
            return Ok(frame);
        }

        debug!(%key, "cache miss, loading");
        let frame = load().await?;

        if frame.is_empty() {
            debug!(%key, "loaded empty frame, not caching");
        } else {
            self.insert(key, frame.clone());
        }

        Ok(frame)
    }
}
