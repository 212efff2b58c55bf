use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use anyhow::Result;

use super::loader::load_dataset;
use super::model::Dataset;

/// Name of the sample the dashboard analyses.
pub const SAMPLE_NAME: &str = "iris";

static SAMPLE: DatasetCache = DatasetCache::new(SAMPLE_NAME);

/// The process-wide dataset, fetched on first call and shared afterwards.
pub fn load_data() -> Result<Arc<Dataset>> {
    SAMPLE.get()
}

// ---------------------------------------------------------------------------
// DatasetCache – fetch-once memo around the sample registry
// ---------------------------------------------------------------------------

/// Memoizes one named sample for the lifetime of the cache.
///
/// Successful fetches are stored and every later [`get`](Self::get) hands out
/// the same `Arc`. A failed fetch stores nothing, so the next call retries.
pub struct DatasetCache {
    name: &'static str,
    cell: OnceLock<Arc<Dataset>>,
    fetches: AtomicUsize,
}

impl DatasetCache {
    pub const fn new(name: &'static str) -> Self {
        DatasetCache {
            name,
            cell: OnceLock::new(),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn get(&self) -> Result<Arc<Dataset>> {
        if let Some(ds) = self.cell.get() {
            return Ok(Arc::clone(ds));
        }

        let fetched = Arc::new(load_dataset(self.name)?);
        self.fetches.fetch_add(1, Ordering::Relaxed);
        log::info!(
            "Fetched sample '{}': {} rows, columns {:?}",
            self.name,
            fetched.len(),
            fetched.columns.iter().map(|c| &c.name).collect::<Vec<_>>()
        );

        // A concurrent first call may have won; keep whichever landed first.
        Ok(Arc::clone(self.cell.get_or_init(|| fetched)))
    }

    /// How many times the underlying registry was actually read.
    #[cfg(test)]
    fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_get_returns_the_same_instance() {
        let cache = DatasetCache::new("iris");
        let first = cache.get().unwrap();
        let second = cache.get().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.fetch_count(), 1);
    }

    #[test]
    fn failed_fetch_is_not_cached() {
        let cache = DatasetCache::new("does-not-exist");
        assert!(cache.get().is_err());
        assert!(cache.get().is_err());
        assert_eq!(cache.fetch_count(), 0);
    }

    #[test]
    fn global_loader_is_idempotent() {
        let a = load_data().unwrap();
        let b = load_data().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(*a, *b);
    }
}
