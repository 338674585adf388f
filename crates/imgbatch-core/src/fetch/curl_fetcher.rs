//! libcurl-backed fetcher: one Easy handle per request, body buffered in memory.

use std::io::Cursor;
use std::time::Duration;

use super::{is_success, Fetch, FetchResponse};
use crate::config::HttpConfig;
use crate::error::FetchError;

/// Blocking HTTP GET via libcurl. Cheap to share; each call builds its own handle.
#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    http: HttpConfig,
}

impl CurlFetcher {
    pub fn new(http: HttpConfig) -> Self {
        Self { http }
    }

    fn configure(&self, easy: &mut curl::easy::Easy, url: &str) -> Result<(), curl::Error> {
        easy.url(url)?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.max_redirections(self.http.max_redirections)?;
        easy.useragent(&self.http.user_agent)?;
        easy.connect_timeout(Duration::from_secs(self.http.connect_timeout_secs))?;
        // Abort stalled transfers rather than waiting out the hard timeout.
        easy.low_speed_limit(self.http.low_speed_limit)?;
        easy.low_speed_time(Duration::from_secs(self.http.low_speed_time_secs))?;
        easy.timeout(Duration::from_secs(self.http.timeout_secs))?;
        Ok(())
    }
}

impl Fetch for CurlFetcher {
    fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError> {
        let mut easy = curl::easy::Easy::new();
        self.configure(&mut easy, url)?;

        let limit = self.http.max_body_bytes;
        let mut body = Vec::new();
        let mut over_limit = false;
        let performed = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                if limit > 0 && (body.len() + data.len()) as u64 > limit {
                    // A short count makes curl abort with a write error.
                    over_limit = true;
                    return Ok(0);
                }
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            let result = transfer.perform();
            result
        };
        if over_limit {
            // Error pages are reported by status even when they are oversized.
            if let Ok(status) = easy.response_code() {
                if status != 0 && !is_success(status) {
                    return Err(FetchError::Status(status));
                }
            }
            tracing::debug!(url, limit, "body exceeded size limit");
            return Err(FetchError::BodyTooLarge { limit });
        }
        performed?;

        let status = easy.response_code()?;
        if !is_success(status) {
            tracing::debug!(url, status, "GET returned non-success status");
            return Err(FetchError::Status(status));
        }
        tracing::trace!(url, status, bytes = body.len(), "GET complete");

        Ok(FetchResponse {
            status,
            body: Box::new(Cursor::new(body)),
        })
    }
}
