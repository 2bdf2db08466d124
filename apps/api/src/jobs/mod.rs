//! Job postings: the cached search index plus the posting/lookup
//! handlers. The index is loaded from the store exactly once per process
//! and never refreshed or retried; filtering is a pure function over
//! that cached set.

pub mod handlers;
pub mod search;

pub use search::{JobIndex, JobRecord};

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::error;

use crate::errors::AppError;
use crate::store::DocumentStore;

enum CacheState {
    Unloaded,
    Ready(Arc<JobIndex>),
    /// The initial fetch failed. Stays failed for the process lifetime:
    /// callers get the error state and an empty list, never a retry.
    Failed,
}

/// Holds the one-per-process `JobIndex`.
pub struct JobCache {
    state: RwLock<CacheState>,
}

impl Default for JobCache {
    fn default() -> Self {
        Self::new()
    }
}

impl JobCache {
    pub fn new() -> Self {
        JobCache {
            state: RwLock::new(CacheState::Unloaded),
        }
    }

    pub async fn get_or_load(
        &self,
        store: &dyn DocumentStore,
    ) -> Result<Arc<JobIndex>, AppError> {
        {
            let state = self.state.read().await;
            match &*state {
                CacheState::Ready(index) => return Ok(index.clone()),
                CacheState::Failed => return Err(load_failed()),
                CacheState::Unloaded => {}
            }
        }

        let mut state = self.state.write().await;
        // Another caller may have loaded while we waited for the lock.
        match &*state {
            CacheState::Ready(index) => return Ok(index.clone()),
            CacheState::Failed => return Err(load_failed()),
            CacheState::Unloaded => {}
        }

        match JobIndex::load(store).await {
            Ok(index) => {
                let index = Arc::new(index);
                *state = CacheState::Ready(index.clone());
                Ok(index)
            }
            Err(e) => {
                error!("Error fetching jobs: {e}");
                *state = CacheState::Failed;
                Err(load_failed())
            }
        }
    }
}

fn load_failed() -> AppError {
    AppError::Internal(anyhow::anyhow!("Failed to load jobs"))
}
