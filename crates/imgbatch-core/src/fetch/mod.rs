//! Fetch capability: one GET per job, returning status and body.

mod curl_fetcher;

pub use curl_fetcher::CurlFetcher;

use crate::error::FetchError;
use std::io::Read;

/// A successful (2xx) response. The body is read once by the persist step.
pub struct FetchResponse {
    pub status: u32,
    pub body: Box<dyn Read + Send>,
}

impl std::fmt::Debug for FetchResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchResponse")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// Blocking GET. Implementations must return `FetchError::Status` for any non-2xx
/// status and must not touch the filesystem.
pub trait Fetch: Send + Sync {
    fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError>;
}

/// True for 200..=299.
pub fn is_success(status: u32) -> bool {
    (200..300).contains(&status)
}
