use crate::domain::model::{Entity, ListingEntry};
use crate::domain::ports::{Storage, Transport};
use crate::utils::error::{EtlError, Result};
use std::sync::Arc;

/// Fetches one detail record and checkpoints it as `<entity_dir>/<index>.json`.
pub struct DetailFetcher<T: Transport, S: Storage> {
    transport: Arc<T>,
    storage: Arc<S>,
    entity_dir: String,
}

impl<T: Transport, S: Storage> DetailFetcher<T, S> {
    pub fn new(transport: Arc<T>, storage: Arc<S>, entity_dir: impl Into<String>) -> Self {
        Self {
            transport,
            storage,
            entity_dir: entity_dir.into(),
        }
    }

    pub fn artifact_path(&self, index: usize) -> String {
        format!("{}/{}.json", self.entity_dir.trim_end_matches('/'), index)
    }

    /// The checkpoint file is written before the entity is returned.
    pub async fn fetch_detail(&self, entry: &ListingEntry, index: usize) -> Result<Entity> {
        tracing::debug!("Fetching {} (#{}) from {}", entry.name, index, entry.detail_url);

        let body = self.transport.get(&entry.detail_url).await?;
        let entity: Entity = serde_json::from_slice(&body)
            .map_err(|e| EtlError::decode(format!("detail for {}", entry.detail_url), e))?;

        let encoded = serde_json::to_vec(&entity)?;
        self.storage
            .write_file(&self.artifact_path(index), &encoded)
            .await?;

        Ok(entity)
    }
}
