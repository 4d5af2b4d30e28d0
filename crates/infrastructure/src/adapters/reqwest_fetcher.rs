//! Remote fetcher implementation using reqwest.
//!
//! A client is built per download from the caller's [`TrustConfig`], so trust
//! anchors never leak into process-wide TLS state.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Certificate, Client};
use substvar_application::ports::{RemoteFetchError, RemoteFetcher};
use substvar_domain::trust::{CertificateSource, TrustConfig};
use tracing::debug;
use url::Url;

/// Default time allowed for a whole download.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Downloads files over HTTP(S) with rustls.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    timeout: Duration,
}

impl Default for ReqwestFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ReqwestFetcher {
    /// Creates a fetcher with the default timeout.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the time allowed for a whole download.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn build_client(&self, trust: &TrustConfig) -> Result<Client, RemoteFetchError> {
        let mut builder = Client::builder()
            .user_agent(concat!("substvar/", env!("CARGO_PKG_VERSION")))
            .timeout(self.timeout);

        for source in &trust.ca_certificates {
            builder = builder.add_root_certificate(load_certificate(source).await?);
        }

        if !trust.verify_certificates || trust.danger_accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        builder
            .build()
            .map_err(|e| RemoteFetchError::Client(e.to_string()))
    }
}

async fn read_certificate_file(path: &Path) -> Result<Vec<u8>, RemoteFetchError> {
    tokio::fs::read(path)
        .await
        .map_err(|e| RemoteFetchError::InvalidCertificate {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

async fn load_certificate(source: &CertificateSource) -> Result<Certificate, RemoteFetchError> {
    let (path, parsed) = match source {
        CertificateSource::PemFile { path } => {
            let bytes = read_certificate_file(path).await?;
            (path.clone(), Certificate::from_pem(&bytes))
        }
        CertificateSource::DerFile { path } => {
            let bytes = read_certificate_file(path).await?;
            (path.clone(), Certificate::from_der(&bytes))
        }
        CertificateSource::PemContent { content } => (
            PathBuf::from("<inline>"),
            Certificate::from_pem(content.as_bytes()),
        ),
    };

    debug!(path = %path.display(), "Adding trust anchor");
    parsed.map_err(|e| RemoteFetchError::InvalidCertificate {
        path,
        reason: e.to_string(),
    })
}

#[async_trait]
impl RemoteFetcher for ReqwestFetcher {
    async fn fetch(&self, url: &Url, trust: &TrustConfig) -> Result<Vec<u8>, RemoteFetchError> {
        let client = self.build_client(trust).await?;

        let request_error = |e: reqwest::Error| RemoteFetchError::Request {
            url: url.to_string(),
            reason: e.to_string(),
        };

        let response = client
            .get(url.as_str())
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteFetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(request_error)?;
        debug!(%url, bytes = body.len(), "Downloaded");
        Ok(body.to_vec())
    }
}
