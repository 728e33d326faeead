use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use varsel_core::catalog::{ProductId, ProductVariations};

/// The whole variation feed: a JSON object keyed by product ID, one
/// [`ProductVariations`] record per product.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeedDocument {
    pub products: BTreeMap<ProductId, ProductVariations>,
}

impl FeedDocument {
    /// Returns the variation record for `id`, if the feed carries one.
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&ProductVariations> {
        self.products.get(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
