//! Trust settings for downloading remote token files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which server certificates a remote download accepts.
///
/// Built by the caller and handed to the fetcher; nothing here touches the
/// process-wide TLS configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrustConfig {
    /// Whether to verify server certificates.
    #[serde(default = "default_true")]
    pub verify_certificates: bool,

    /// Extra CA certificates to trust on top of the built-in roots.
    #[serde(default)]
    pub ca_certificates: Vec<CertificateSource>,

    /// Accept invalid or self-signed certificates.
    #[serde(default)]
    pub danger_accept_invalid_certs: bool,
}

impl Default for TrustConfig {
    fn default() -> Self {
        Self {
            verify_certificates: true,
            ca_certificates: Vec::new(),
            danger_accept_invalid_certs: false,
        }
    }
}

const fn default_true() -> bool {
    true
}

impl TrustConfig {
    /// Creates a config that verifies certificates against the built-in roots.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config that accepts any certificate. Only for tests and
    /// throwaway environments.
    #[must_use]
    pub fn insecure() -> Self {
        Self {
            verify_certificates: false,
            danger_accept_invalid_certs: true,
            ..Self::default()
        }
    }

    /// Returns true when certificates are verified.
    #[must_use]
    pub const fn is_secure(&self) -> bool {
        self.verify_certificates && !self.danger_accept_invalid_certs
    }

    /// Adds a CA certificate from a PEM file.
    #[must_use]
    pub fn with_ca_pem_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.ca_certificates
            .push(CertificateSource::PemFile { path: path.into() });
        self
    }

    /// Adds a CA certificate from a DER file.
    #[must_use]
    pub fn with_ca_der_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.ca_certificates
            .push(CertificateSource::DerFile { path: path.into() });
        self
    }

    /// Adds a CA certificate, picking the encoding from the file extension.
    /// `.der` and `.cer` are read as DER, anything else as PEM.
    #[must_use]
    pub fn with_ca_file(self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let is_der = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("der") || e.eq_ignore_ascii_case("cer"));
        if is_der {
            self.with_ca_der_file(path)
        } else {
            self.with_ca_pem_file(path)
        }
    }
}

/// Source for a certificate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CertificateSource {
    /// Load from a PEM file.
    PemFile {
        /// Path to the PEM file.
        path: PathBuf,
    },
    /// Load from a DER file.
    DerFile {
        /// Path to the DER file.
        path: PathBuf,
    },
    /// Inline PEM content.
    PemContent {
        /// PEM-encoded certificate content.
        content: String,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_is_secure() {
        let config = TrustConfig::default();
        assert!(config.verify_certificates);
        assert!(config.is_secure());
        assert!(config.ca_certificates.is_empty());
    }

    #[test]
    fn test_insecure() {
        assert!(!TrustConfig::insecure().is_secure());
    }

    #[test]
    fn test_with_ca_file_picks_encoding() {
        let config = TrustConfig::new()
            .with_ca_file("certs/corp.pem")
            .with_ca_file("certs/root.DER");

        assert_eq!(
            config.ca_certificates,
            vec![
                CertificateSource::PemFile {
                    path: PathBuf::from("certs/corp.pem")
                },
                CertificateSource::DerFile {
                    path: PathBuf::from("certs/root.DER")
                },
            ]
        );
    }

    #[test]
    fn test_deserialize_defaults() {
        let config: TrustConfig =
            serde_json::from_str(r#"{"ca_certificates":[{"type":"pem_file","path":"a.pem"}]}"#)
                .unwrap();
        assert!(config.verify_certificates);
        assert_eq!(config.ca_certificates.len(), 1);
    }
}
