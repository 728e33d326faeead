pub mod cache;
pub mod client;
pub mod error;
pub mod provider;
pub mod types;

pub use cache::FeedCache;
pub use client::FeedClient;
pub use error::FeedError;
pub use provider::VariationProvider;
pub use types::FeedDocument;
