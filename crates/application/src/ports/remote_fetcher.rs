//! Remote fetcher port
//!
//! Downloads shared token tables over HTTPS with caller-provided trust.

use std::path::PathBuf;

use async_trait::async_trait;
use substvar_domain::TrustConfig;
use url::Url;

/// Errors that can occur while downloading a remote file.
#[derive(Debug, thiserror::Error)]
pub enum RemoteFetchError {
    /// A trust anchor could not be read or decoded.
    #[error("Invalid CA certificate {}: {reason}", path.display())]
    InvalidCertificate {
        /// Certificate file, or `<inline>` for PEM content.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },

    /// The HTTP client could not be built from the trust settings.
    #[error("Failed to configure HTTP client: {0}")]
    Client(String),

    /// The request failed before a response arrived.
    #[error("Request to {url} failed: {reason}")]
    Request {
        /// Requested URL.
        url: String,
        /// Transport error.
        reason: String,
    },

    /// The server answered with a non-success status.
    #[error("Request to {url} returned HTTP {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },
}

/// Port for downloading files.
#[async_trait]
pub trait RemoteFetcher: Send + Sync {
    /// Downloads the body behind `url`, trusting only what `trust` allows.
    ///
    /// # Errors
    ///
    /// Returns an error if the trust anchors are invalid, the transfer fails
    /// or the server does not answer with a success status.
    async fn fetch(&self, url: &Url, trust: &TrustConfig) -> Result<Vec<u8>, RemoteFetchError>;
}
