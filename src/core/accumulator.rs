use crate::domain::model::Entity;
use tokio::sync::Mutex;

/// Collects entities from concurrently running fetch tasks.
///
/// During the fetch phase the only operation is [`append`](Self::append).
/// The contents become readable through [`into_entities`](Self::into_entities),
/// which consumes the accumulator, so whoever reads it must hold the last
/// reference and no writer can still be running.
#[derive(Debug, Default)]
pub struct SharedAccumulator {
    entities: Mutex<Vec<Entity>>,
}

impl SharedAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: Mutex::new(Vec::with_capacity(capacity)),
        }
    }

    pub async fn append(&self, entity: Entity) {
        let mut entities = self.entities.lock().await;
        entities.push(entity);
    }

    pub fn into_entities(self) -> Vec<Entity> {
        self.entities.into_inner()
    }
}
