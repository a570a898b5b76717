//! Shared dataset handle
//!
//! Wraps one `DatasetStore` so several tasks can submit feedback at once.
//! Writers serialize on the lock, so concurrent appends never lose a count.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use super::store::{DatasetStats, DatasetStore};
use crate::error::Result;
use crate::learning::{apply_feedback, FeedbackEvent, LearningOutcome};
use crate::types::{Sample, SampleDraft};

/// Cloneable handle to one in-memory dataset
#[derive(Debug, Clone, Default)]
pub struct SharedDataset {
    inner: Arc<RwLock<DatasetStore>>,
}

impl SharedDataset {
    pub fn new(store: DatasetStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Create a handle over a freshly seeded dataset.
    ///
    /// Returns the handle and whether seeding succeeded.
    pub fn load_initial() -> (Self, bool) {
        let mut store = DatasetStore::new();
        let loaded = store.load_initial();
        (Self::new(store), loaded)
    }

    pub async fn append(&self, draft: SampleDraft) -> Sample {
        let mut store = self.inner.write().await;
        store.append(draft)
    }

    pub async fn record_feedback(&self, event: FeedbackEvent) -> LearningOutcome {
        let mut store = self.inner.write().await;
        let outcome = apply_feedback(&mut store, event);
        debug!("Feedback applied, total samples: {}", outcome.stats.total_samples);
        outcome
    }

    pub async fn stats(&self) -> DatasetStats {
        self.inner.read().await.stats()
    }

    pub async fn list(&self) -> Vec<Sample> {
        self.inner.read().await.list()
    }

    pub async fn to_csv(&self) -> String {
        self.inner.read().await.to_csv()
    }

    pub async fn write_csv(&self, dir: &Path) -> Result<PathBuf> {
        self.inner.read().await.write_csv(dir)
    }

    /// Owned copy of the current store
    pub async fn snapshot(&self) -> DatasetStore {
        self.inner.read().await.clone()
    }
}
