use moka::sync::Cache;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::AppError;
use crate::models::Dataset;
use crate::services::decoder::utils::clean_dataset_name;
use crate::services::profile::DatasetProfile;

/// An uploaded dataset and the profile computed for it. Never mutated; a
/// re-upload becomes a new entry with a new id.
#[derive(Debug)]
pub struct StoredDataset {
    pub id: String,
    pub dataset: Dataset,
    pub profile: DatasetProfile,
}

/// Bounded in-memory home for uploaded datasets, owned by the app state.
pub struct DatasetStore {
    cache: Cache<String, Arc<StoredDataset>>,
    sequence: AtomicU64,
}

impl DatasetStore {
    pub fn new(max_datasets: u64) -> Self {
        Self {
            cache: Cache::builder().max_capacity(max_datasets).build(),
            sequence: AtomicU64::new(0),
        }
    }

    pub fn insert(&self, dataset: Dataset, profile: DatasetProfile) -> Arc<StoredDataset> {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        let id = format!(
            "{}_{}_{}",
            clean_dataset_name(dataset.name.as_deref().unwrap_or("dataset")),
            chrono::Utc::now().timestamp_millis(),
            seq
        );

        let stored = Arc::new(StoredDataset {
            id: id.clone(),
            dataset,
            profile,
        });
        self.cache.insert(id.clone(), stored.clone());
        tracing::info!("Stored dataset {} ({} rows)", id, stored.profile.row_count);
        stored
    }

    pub fn get(&self, id: &str) -> Result<Arc<StoredDataset>, AppError> {
        self.cache
            .get(id)
            .ok_or_else(|| AppError::DatasetNotFound(id.to_string()))
    }

    pub fn remove(&self, id: &str) -> bool {
        let removed = self.cache.remove(id).is_some();
        if removed {
            tracing::info!("Removed dataset {}", id);
        }
        removed
    }

    pub fn len(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }
}
