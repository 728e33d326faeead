use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The server answered with its structured error envelope.
    #[error("request rejected ({code}): {message}")]
    Rejected { code: String, message: String },

    #[error("unexpected HTTP status {status} from storefront")]
    UnexpectedStatus { status: u16 },
}
