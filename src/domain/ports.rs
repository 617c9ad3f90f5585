use crate::domain::model::{Entity, ListingEntry};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Fetch capability: GET a URL and hand back the body bytes.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn listing_url(&self) -> &str;
    fn output_root(&self) -> &str;
    fn entity_dir(&self) -> &str;
    fn aggregate_file(&self) -> &str;
    /// `None` launches one task per listing entry at once.
    fn max_concurrent_requests(&self) -> Option<usize>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<ListingEntry>>;
    async fn transform(&self, entries: Vec<ListingEntry>) -> Result<Vec<Entity>>;
    async fn load(&self, entities: Vec<Entity>) -> Result<String>;
}
