//! Error types for the event crawler

use thiserror::Error;

/// Result type for crawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Fatal crawl failures. A 404 is never one of these; it surfaces as
/// [`Page::NotFound`](crate::crawler::Page::NotFound) instead.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// HTTP client or transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a failure status other than 404
    #[error("request for {url} failed with status {status}")]
    Status { url: String, status: u16 },

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The seed page itself returned 404
    #[error("seed page not found: {0}")]
    SeedNotFound(String),

    /// The seed page has no interesting nodes to compare against
    #[error("seed page {0} has no interesting nodes")]
    EmptyFingerprint(String),

    /// No ancestor of the seed, down to the site root, could be fetched
    #[error("no existing parent page found for {0}")]
    ParentNotFound(String),

    /// A fetch task panicked or was cancelled
    #[error("fetch task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
