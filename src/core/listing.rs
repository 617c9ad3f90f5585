use crate::domain::model::{ListingEntry, ListingPage};
use crate::domain::ports::Transport;
use crate::utils::error::{EtlError, Result};
use std::sync::Arc;

/// Reads the catalog from the listing endpoint in a single request.
pub struct ListingClient<T: Transport> {
    transport: Arc<T>,
    listing_url: String,
}

impl<T: Transport> ListingClient<T> {
    pub fn new(transport: Arc<T>, listing_url: impl Into<String>) -> Self {
        Self {
            transport,
            listing_url: listing_url.into(),
        }
    }

    pub async fn fetch_listing(&self) -> Result<Vec<ListingEntry>> {
        tracing::info!("Fetching catalog listing from {}", self.listing_url);

        let body = self.transport.get(&self.listing_url).await?;
        let page: ListingPage = serde_json::from_slice(&body)
            .map_err(|e| EtlError::decode(format!("listing from {}", self.listing_url), e))?;

        tracing::info!("Listing returned {} entries", page.results.len());
        Ok(page.results)
    }
}
