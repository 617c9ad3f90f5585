use crate::domain::model::Entity;
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::sync::Arc;

/// Orders the fetched entities by `id` and writes them as one JSON array.
pub struct Aggregator<S: Storage> {
    storage: Arc<S>,
    aggregate_file: String,
}

impl<S: Storage> Aggregator<S> {
    pub fn new(storage: Arc<S>, aggregate_file: impl Into<String>) -> Self {
        Self {
            storage,
            aggregate_file: aggregate_file.into(),
        }
    }

    pub async fn write(&self, entities: Vec<Entity>) -> Result<String> {
        let count = entities.len();
        let encoded = aggregate(entities)?;

        tracing::info!("Writing {} ({} entities)", self.aggregate_file, count);
        self.storage
            .write_file(&self.aggregate_file, &encoded)
            .await?;

        Ok(self.aggregate_file.clone())
    }
}

/// Sorts by ascending `id` and encodes as one JSON array.
///
/// The sort is stable, so entities sharing an `id` keep their arrival order.
pub fn aggregate(mut entities: Vec<Entity>) -> Result<Vec<u8>> {
    entities.sort_by_key(|entity| entity.id);

    let duplicates = entities.windows(2).filter(|w| w[0].id == w[1].id).count();
    if duplicates > 0 {
        tracing::warn!("{} entities share an id with their neighbour", duplicates);
    }

    Ok(serde_json::to_vec(&entities)?)
}
