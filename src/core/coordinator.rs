use crate::core::accumulator::SharedAccumulator;
use crate::core::detail::DetailFetcher;
use crate::domain::model::{Entity, ListingEntry};
use crate::domain::ports::{Storage, Transport};
use crate::utils::error::{EtlError, Result};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Fans out one fetch task per listing entry and waits for all of them.
///
/// Without a concurrency limit every task is in flight at once. The first
/// failing task aborts its siblings and its error is returned; the collected
/// entities are only handed out once every task has finished successfully.
pub struct FetchCoordinator<T: Transport, S: Storage> {
    fetcher: Arc<DetailFetcher<T, S>>,
    admission: Option<Arc<Semaphore>>,
}

impl<T, S> FetchCoordinator<T, S>
where
    T: Transport + 'static,
    S: Storage + 'static,
{
    pub fn new(fetcher: DetailFetcher<T, S>) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            admission: None,
        }
    }

    pub fn with_concurrency_limit(mut self, limit: Option<usize>) -> Self {
        self.admission = limit
            .map(|permits| Arc::new(Semaphore::new(permits.clamp(1, Semaphore::MAX_PERMITS))));
        self
    }

    pub async fn run(&self, entries: Vec<ListingEntry>) -> Result<Vec<Entity>> {
        let total = entries.len();
        let started = Instant::now();
        let accumulator = Arc::new(SharedAccumulator::with_capacity(total));

        tracing::info!(
            "Launching {} detail fetches ({})",
            total,
            match &self.admission {
                Some(semaphore) => format!("at most {} in flight", semaphore.available_permits()),
                None => "unbounded".to_string(),
            }
        );

        let mut tasks = JoinSet::new();
        for (index, entry) in entries.into_iter().enumerate() {
            let fetcher = Arc::clone(&self.fetcher);
            let accumulator = Arc::clone(&accumulator);
            let admission = self.admission.clone();

            tasks.spawn(async move {
                let _permit = match admission {
                    Some(semaphore) => Some(semaphore.acquire_owned().await.map_err(|_| {
                        EtlError::ProcessingError {
                            message: "fetch admission closed".to_string(),
                        }
                    })?),
                    None => None,
                };

                let entity = fetcher.fetch_detail(&entry, index).await?;
                accumulator.append(entity).await;
                Ok::<(), EtlError>(())
            });
        }

        let mut completed = 0usize;
        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined.map_err(EtlError::from).and_then(|outcome| outcome) {
                tracing::error!(
                    "Detail fetch failed after {}/{} completed: {}",
                    completed,
                    total,
                    e
                );
                tasks.abort_all();
                return Err(e);
            }

            completed += 1;
            if completed % 100 == 0 {
                tracing::debug!("{}/{} detail fetches done", completed, total);
            }
        }

        // every task has been joined, so this is the last reference
        let accumulator = Arc::try_unwrap(accumulator).map_err(|_| EtlError::ProcessingError {
            message: "accumulator still shared after all fetch tasks finished".to_string(),
        })?;
        let entities = accumulator.into_entities();

        tracing::info!(
            "Fetched {} entities in {:.2?}",
            entities.len(),
            started.elapsed()
        );
        Ok(entities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fakes::{detail_json, MockStorage, ScriptedTransport};
    use std::collections::HashSet;
    use std::time::Duration;

    fn entries(count: usize) -> Vec<ListingEntry> {
        (0..count)
            .map(|i| ListingEntry {
                name: format!("mon-{}", i),
                detail_url: format!("http://api.test/pokemon/{}/", i + 1),
            })
            .collect()
    }

    fn coordinator(
        transport: ScriptedTransport,
        storage: MockStorage,
    ) -> FetchCoordinator<ScriptedTransport, MockStorage> {
        FetchCoordinator::new(DetailFetcher::new(
            Arc::new(transport),
            Arc::new(storage),
            "monsters",
        ))
    }

    fn catalog(count: usize) -> ScriptedTransport {
        let mut builder = ScriptedTransport::builder();
        for i in 0..count {
            let id = i as i64 + 1;
            // later entries answer sooner, so completion order is reversed
            let delay = Duration::from_millis(((count - i) % 7) as u64 * 3);
            builder = builder.delayed_json(
                &format!("http://api.test/pokemon/{}/", id),
                detail_json(&format!("mon-{}", i), id),
                delay,
            );
        }
        builder.build()
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_run_collects_every_entity_once() {
        let storage = MockStorage::new();
        let coordinator = coordinator(catalog(60), storage.clone());

        let entities = coordinator.run(entries(60)).await.unwrap();

        let ids: HashSet<i64> = entities.iter().map(|e| e.id).collect();
        assert_eq!(entities.len(), 60);
        assert_eq!(ids.len(), 60);
        assert_eq!(storage.paths().await.len(), 60);
        assert!(storage.get_file("monsters/59.json").await.is_some());
    }

    #[tokio::test]
    async fn test_empty_listing_resolves_immediately() {
        let transport = ScriptedTransport::default();
        let storage = MockStorage::new();
        let coordinator = coordinator(transport.clone(), storage.clone());

        let entities = coordinator.run(vec![]).await.unwrap();

        assert!(entities.is_empty());
        assert_eq!(transport.calls(), 0);
        assert!(storage.paths().await.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_single_failure_fails_the_run() {
        let mut builder = ScriptedTransport::builder();
        for i in 0..10 {
            let url = format!("http://api.test/pokemon/{}/", i + 1);
            builder = if i == 4 {
                builder.status(&url, 500)
            } else {
                builder.delayed_json(
                    &url,
                    detail_json("mon", i as i64 + 1),
                    Duration::from_millis(20),
                )
            };
        }
        let coordinator = coordinator(builder.build(), MockStorage::new());

        let err = coordinator.run(entries(10)).await.unwrap_err();

        assert!(matches!(err, EtlError::HttpStatusError { status: 500, .. }));
    }

    fn slow_catalog(count: usize) -> ScriptedTransport {
        let mut builder = ScriptedTransport::builder();
        for i in 0..count {
            let id = i as i64 + 1;
            builder = builder.delayed_json(
                &format!("http://api.test/pokemon/{}/", id),
                detail_json(&format!("mon-{}", i), id),
                Duration::from_millis(40),
            );
        }
        builder.build()
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrency_limit_caps_in_flight_requests() {
        let transport = slow_catalog(25);
        let coordinator = coordinator(transport.clone(), MockStorage::new())
            .with_concurrency_limit(Some(3));

        let entities = coordinator.run(entries(25)).await.unwrap();

        assert_eq!(entities.len(), 25);
        assert!(transport.peak_in_flight() <= 3);
        assert!(transport.peak_in_flight() >= 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_unbounded_fan_out_runs_requests_together() {
        let transport = slow_catalog(25);
        let coordinator = coordinator(transport.clone(), MockStorage::new());

        let entities = coordinator.run(entries(25)).await.unwrap();

        assert_eq!(entities.len(), 25);
        assert!(transport.peak_in_flight() > 3);
    }

    #[tokio::test]
    async fn test_oversized_limit_is_clamped() {
        let coordinator = coordinator(catalog(2), MockStorage::new())
            .with_concurrency_limit(Some(usize::MAX));

        let entities = coordinator.run(entries(2)).await.unwrap();

        assert_eq!(entities.len(), 2);
    }

    #[tokio::test]
    async fn test_checkpoint_failure_aborts_run() {
        let coordinator = coordinator(catalog(5), MockStorage::failing_under("monsters/"));

        let err = coordinator.run(entries(5)).await.unwrap_err();

        assert!(matches!(err, EtlError::FilesystemError { .. }));
    }
}
