//! Bounded fetch of finalized save content
//!
//! The engine hands over a URL; this side owns the transport limits:
//! scheme check, request timeout, and a size cap enforced while the
//! body streams in. Anything outside those bounds becomes a
//! [`FetchError`] the callback handler logs and swallows.

use std::time::Duration;

use super::errors::{FetchError, FetchResult};

/// Longest URL fragment quoted back in error messages
const URL_ERROR_LEN: usize = 120;

/// HTTP client for pulling saved document content from the engine
pub struct ContentFetcher {
    client: reqwest::Client,
    timeout_secs: u64,
    max_bytes: u64,
}

impl ContentFetcher {
    pub fn new(timeout_secs: u64, max_bytes: u64) -> FetchResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| FetchError::ClientInit(e.to_string()))?;

        Ok(Self {
            client,
            timeout_secs,
            max_bytes,
        })
    }

    /// Download the finalized bytes behind `url`.
    ///
    /// Rejects non-HTTP schemes up front and stops reading the moment
    /// the body crosses the size cap.
    pub async fn fetch(&self, url: &str) -> FetchResult<Vec<u8>> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(FetchError::InvalidUrl(truncate(url, URL_ERROR_LEN)));
        }

        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        // Advertised length lets us bail before reading anything
        if let Some(length) = response.content_length() {
            if length > self.max_bytes {
                return Err(FetchError::TooLarge(self.max_bytes));
            }
        }

        let mut body: Vec<u8> = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| self.classify(e))? {
            if (body.len() + chunk.len()) as u64 > self.max_bytes {
                return Err(FetchError::TooLarge(self.max_bytes));
            }
            body.extend_from_slice(&chunk);
        }

        Ok(body)
    }

    fn classify(&self, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout(self.timeout_secs)
        } else {
            FetchError::Network(error.to_string())
        }
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}
