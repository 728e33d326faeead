use std::sync::Arc;

use varsel_core::catalog::{ProductId, ProductVariations};

use crate::cache::FeedCache;
use crate::client::FeedClient;
use crate::error::FeedError;
use crate::types::FeedDocument;

/// Serves per-product variation data out of the cache, fetching the feed on
/// a miss.
///
/// Every upstream failure mode (network, status, malformed body) collapses
/// to "no data": readers only ever see a present or absent record, and the
/// selector renders as unavailable rather than erroring.
pub struct VariationProvider {
    client: FeedClient,
    cache: FeedCache,
}

impl VariationProvider {
    #[must_use]
    pub fn new(client: FeedClient, cache: FeedCache) -> Self {
        Self { client, cache }
    }

    /// Returns the current feed document, fetching and caching on a miss.
    ///
    /// `None` means the cache was empty or stale and the fetch failed; the
    /// failure is logged here and not surfaced further.
    pub async fn document(&self) -> Option<Arc<FeedDocument>> {
        if let Some(document) = self.cache.get() {
            return Some(document);
        }

        match self.client.fetch().await {
            Ok(document) => Some(self.cache.put(document)),
            Err(error) => {
                tracing::warn!(error = %error, url = self.client.url(), "variation feed fetch failed");
                None
            }
        }
    }

    /// Variation data for one product, if the feed knows it.
    pub async fn product(&self, id: ProductId) -> Option<ProductVariations> {
        self.document().await?.product(id).cloned()
    }

    /// Fetches the feed now and replaces the cached document on success.
    ///
    /// # Errors
    ///
    /// Propagates the fetch error; a failed refresh leaves any existing
    /// cached entry in place.
    pub async fn refresh(&self) -> Result<Arc<FeedDocument>, FeedError> {
        let document = self.client.fetch().await?;
        Ok(self.cache.put(document))
    }

    /// Forces the next read to fetch by dropping the cached document.
    pub fn invalidate(&self) {
        self.cache.clear();
    }
}
