use crate::core::aggregator::Aggregator;
use crate::core::coordinator::FetchCoordinator;
use crate::core::detail::DetailFetcher;
use crate::core::listing::ListingClient;
use crate::core::{ConfigProvider, Entity, ListingEntry, Pipeline, Storage, Transport};
use crate::utils::error::Result;
use std::sync::Arc;

/// listing -> concurrent detail fetch -> sorted aggregate.
pub struct PokedexPipeline<T: Transport, S: Storage> {
    listing: ListingClient<T>,
    coordinator: FetchCoordinator<T, S>,
    aggregator: Aggregator<S>,
}

impl<T, S> PokedexPipeline<T, S>
where
    T: Transport + 'static,
    S: Storage + 'static,
{
    pub fn new<C: ConfigProvider>(transport: T, storage: S, config: &C) -> Self {
        let transport = Arc::new(transport);
        let storage = Arc::new(storage);

        let fetcher = DetailFetcher::new(
            Arc::clone(&transport),
            Arc::clone(&storage),
            config.entity_dir(),
        );

        Self {
            listing: ListingClient::new(transport, config.listing_url()),
            coordinator: FetchCoordinator::new(fetcher)
                .with_concurrency_limit(config.max_concurrent_requests()),
            aggregator: Aggregator::new(storage, config.aggregate_file()),
        }
    }
}

#[async_trait::async_trait]
impl<T, S> Pipeline for PokedexPipeline<T, S>
where
    T: Transport + 'static,
    S: Storage + 'static,
{
    async fn extract(&self) -> Result<Vec<ListingEntry>> {
        self.listing.fetch_listing().await
    }

    async fn transform(&self, entries: Vec<ListingEntry>) -> Result<Vec<Entity>> {
        self.coordinator.run(entries).await
    }

    async fn load(&self, entities: Vec<Entity>) -> Result<String> {
        self.aggregator.write(entities).await
    }
}
