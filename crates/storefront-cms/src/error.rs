use thiserror::Error;

/// Failures talking to the content delivery API.
///
/// URLs carried by these variants have the access token stripped.
#[derive(Debug, Error)]
pub enum CmsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("resource not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid CMS base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

/// Outcome of a single-product lookup that did not yield a product.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The backend has no entry with this id.
    #[error("product {id} not found")]
    NotFound { id: String },

    /// Any other failure, with a message fit for display.
    #[error("{0}")]
    Fetch(String),
}
