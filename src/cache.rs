use crate::error::FinderError;
use crate::index::CategoryIndex;
use moka::future::Cache;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// How long a category index is served before it is rebuilt.
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);
/// Longest TTL accepted; longer values are clamped.
pub const MAX_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Time-bounded holder for one category index.
///
/// The index is only ever swapped wholesale. Concurrent misses share a single
/// load, so finders sharing one cache fetch the category list once.
#[derive(Clone)]
pub struct IndexCache {
    inner: Cache<(), Arc<CategoryIndex>>,
}

impl IndexCache {
    pub fn new(ttl: Duration) -> Self {
        IndexCache {
            inner: Cache::builder()
                .max_capacity(1)
                .time_to_live(ttl.min(MAX_TTL))
                .build(),
        }
    }

    /// The cached index, or the result of `load` when nothing fresh is held.
    ///
    /// A failed load is not cached; the next call runs the loader again.
    pub async fn get_or_load<F>(&self, load: F) -> Result<Arc<CategoryIndex>, Arc<FinderError>>
    where
        F: Future<Output = Result<CategoryIndex, FinderError>>,
    {
        self.inner
            .try_get_with((), async { load.await.map(Arc::new) })
            .await
    }
}

impl Default for IndexCache {
    fn default() -> Self {
        IndexCache::new(DEFAULT_TTL)
    }
}
