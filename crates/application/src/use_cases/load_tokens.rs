//! Load tokens use case
//!
//! Builds the override layers from the common and application token files.

use std::path::{Path, PathBuf};

use substvar_domain::{TokenLayers, TokenScope, TokenTable, TrustConfig};
use tracing::{info, warn};
use url::Url;

use crate::ports::{
    FileSystem, FileSystemError, PropertiesError, PropertiesRepository, RemoteFetchError,
    RemoteFetcher,
};

/// Where the shared common tokens come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommonTokens {
    /// A local file. A missing file yields an empty table.
    Local(PathBuf),
    /// A file downloaded to `destination` before it is read.
    Remote {
        /// Location of the shared table.
        url: Url,
        /// Local copy of the download.
        destination: PathBuf,
        /// Certificates accepted for the download.
        trust: TrustConfig,
    },
}

/// Errors that can occur when loading tokens.
#[derive(Debug, thiserror::Error)]
pub enum LoadTokensError {
    /// The application tokens file does not exist.
    #[error("Mandatory application tokens file not found: {}", .0.display())]
    ApplicationTokensNotFound(PathBuf),

    /// The remote common table could not be downloaded.
    #[error("Failed to download common tokens from {url}: {source}")]
    Download {
        /// Requested URL.
        url: String,
        /// Fetch failure.
        #[source]
        source: RemoteFetchError,
    },

    /// The downloaded common table could not be stored.
    #[error("Failed to store downloaded common tokens at {}: {source}", path.display())]
    Store {
        /// Download destination.
        path: PathBuf,
        /// Write failure.
        #[source]
        source: FileSystemError,
    },

    /// A token file could not be read or parsed.
    #[error("Failed to read {scope} tokens: {source}")]
    Read {
        /// Table being read.
        scope: TokenScope,
        /// Read failure.
        #[source]
        source: PropertiesError,
    },
}

/// Input for the load tokens use case.
#[derive(Debug, Clone)]
pub struct LoadTokensInput {
    /// Source of the common table.
    pub common: CommonTokens,
    /// Mandatory application tokens file.
    pub application: PathBuf,
}

/// Reads both token tables and layers them by precedence.
pub struct LoadTokens<P, R, F> {
    properties: P,
    fetcher: R,
    fs: F,
}

impl<P, R, F> LoadTokens<P, R, F>
where
    P: PropertiesRepository,
    R: RemoteFetcher,
    F: FileSystem,
{
    /// Creates a new `LoadTokens` use case.
    pub const fn new(properties: P, fetcher: R, fs: F) -> Self {
        Self {
            properties,
            fetcher,
            fs,
        }
    }

    /// Executes the use case.
    ///
    /// # Errors
    /// Returns an error if the application tokens file is missing, a download
    /// fails or a token file cannot be parsed.
    pub async fn execute(&self, input: &LoadTokensInput) -> Result<TokenLayers, LoadTokensError> {
        let common = self.load_common(&input.common).await?;
        let application = self.load_application(&input.application).await?;

        let layers = TokenLayers::from_tables(common, application);
        info!(
            tokens = layers.total_token_count(),
            "Token tables loaded"
        );
        Ok(layers)
    }

    async fn load_common(&self, source: &CommonTokens) -> Result<TokenTable, LoadTokensError> {
        match source {
            CommonTokens::Local(path) => {
                if !self.properties.exists(path).await {
                    warn!(
                        path = %path.display(),
                        "Common tokens file not found, continuing without common tokens"
                    );
                    return Ok(TokenTable::new(TokenScope::Common, path.display().to_string()));
                }
                self.read_table(TokenScope::Common, path).await
            }
            CommonTokens::Remote {
                url,
                destination,
                trust,
            } => {
                info!(%url, destination = %destination.display(), "Downloading common tokens");
                if !trust.is_secure() {
                    warn!(%url, "Certificate verification is disabled for the common tokens download");
                }

                let bytes = self.fetcher.fetch(url, trust).await.map_err(|source| {
                    LoadTokensError::Download {
                        url: url.to_string(),
                        source,
                    }
                })?;
                self.fs
                    .write_file(destination, &bytes)
                    .await
                    .map_err(|source| LoadTokensError::Store {
                        path: destination.clone(),
                        source,
                    })?;

                self.read_table(TokenScope::Common, destination).await
            }
        }
    }

    async fn load_application(&self, path: &Path) -> Result<TokenTable, LoadTokensError> {
        if !self.properties.exists(path).await {
            return Err(LoadTokensError::ApplicationTokensNotFound(
                path.to_path_buf(),
            ));
        }
        self.read_table(TokenScope::Application, path).await
    }

    async fn read_table(
        &self,
        scope: TokenScope,
        path: &Path,
    ) -> Result<TokenTable, LoadTokensError> {
        let tokens = self
            .properties
            .load(path)
            .await
            .map_err(|source| LoadTokensError::Read { scope, source })?;

        let table = TokenTable::from_tokens(scope, path.display().to_string(), tokens);
        info!(
            %scope,
            path = %path.display(),
            count = table.len(),
            "Loaded tokens"
        );
        Ok(table)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::use_cases::testing::{MemoryFileSystem, MemoryPropertiesRepository, StubFetcher};
    use pretty_assertions::assert_eq;

    fn use_case(
        fs: &MemoryFileSystem,
        fetcher: StubFetcher,
    ) -> LoadTokens<MemoryPropertiesRepository, StubFetcher, MemoryFileSystem> {
        LoadTokens::new(MemoryPropertiesRepository::new(fs.clone()), fetcher, fs.clone())
    }

    #[tokio::test]
    async fn test_local_common_and_application() {
        let fs = MemoryFileSystem::new();
        fs.insert("common.properties", "region=eu-west-1\ndbHost=common-db\n");
        fs.insert("app.properties", "dbHost=prod-db.internal\n");

        let layers = use_case(&fs, StubFetcher::failing())
            .execute(&LoadTokensInput {
                common: CommonTokens::Local(PathBuf::from("common.properties")),
                application: PathBuf::from("app.properties"),
            })
            .await
            .unwrap();

        assert_eq!(layers.total_token_count(), 3);
        let hit = layers.lookup("dbHost").unwrap();
        assert_eq!(hit.value, "prod-db.internal");
        assert_eq!(hit.scope, TokenScope::Application);
        assert_eq!(layers.lookup("region").unwrap().scope, TokenScope::Common);
    }

    #[tokio::test]
    async fn test_missing_local_common_is_empty() {
        let fs = MemoryFileSystem::new();
        fs.insert("app.properties", "dbHost=prod-db.internal\n");

        let layers = use_case(&fs, StubFetcher::failing())
            .execute(&LoadTokensInput {
                common: CommonTokens::Local(PathBuf::from("missing.properties")),
                application: PathBuf::from("app.properties"),
            })
            .await
            .unwrap();

        assert!(layers.table(TokenScope::Common).unwrap().is_empty());
        assert_eq!(layers.total_token_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_application_tokens_is_error() {
        let fs = MemoryFileSystem::new();

        let err = use_case(&fs, StubFetcher::failing())
            .execute(&LoadTokensInput {
                common: CommonTokens::Local(PathBuf::from("common.properties")),
                application: PathBuf::from("app.properties"),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, LoadTokensError::ApplicationTokensNotFound(_)));
        assert!(err.to_string().starts_with("Mandatory application tokens file not found"));
    }

    #[tokio::test]
    async fn test_remote_common_is_downloaded_then_read() {
        let fs = MemoryFileSystem::new();
        fs.insert("app.properties", "apiKey=s3cr3t\n");

        let layers = use_case(&fs, StubFetcher::serving("region=us-east-1\n"))
            .execute(&LoadTokensInput {
                common: CommonTokens::Remote {
                    url: Url::parse("https://config.example.com/common.properties").unwrap(),
                    destination: PathBuf::from("target/downloaded-common.properties"),
                    trust: TrustConfig::default(),
                },
                application: PathBuf::from("app.properties"),
            })
            .await
            .unwrap();

        assert_eq!(
            fs.contents("target/downloaded-common.properties").as_deref(),
            Some("region=us-east-1\n")
        );
        assert_eq!(layers.lookup("region").unwrap().value, "us-east-1");
    }

    #[tokio::test]
    async fn test_remote_failure_names_url() {
        let fs = MemoryFileSystem::new();
        fs.insert("app.properties", "apiKey=s3cr3t\n");

        let err = use_case(&fs, StubFetcher::failing())
            .execute(&LoadTokensInput {
                common: CommonTokens::Remote {
                    url: Url::parse("https://config.example.com/common.properties").unwrap(),
                    destination: PathBuf::from("downloaded.properties"),
                    trust: TrustConfig::default(),
                },
                application: PathBuf::from("app.properties"),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, LoadTokensError::Download { .. }));
        assert!(err.to_string().contains("https://config.example.com/common.properties"));
        assert!(!fs.exists_sync("downloaded.properties"));
    }

    #[tokio::test]
    async fn test_malformed_application_tokens_names_scope() {
        let fs = MemoryFileSystem::new();
        fs.insert("app.properties", "apiKey=\\uZZZZ\n");

        let err = use_case(&fs, StubFetcher::failing())
            .execute(&LoadTokensInput {
                common: CommonTokens::Local(PathBuf::from("common.properties")),
                application: PathBuf::from("app.properties"),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            LoadTokensError::Read {
                scope: TokenScope::Application,
                source: PropertiesError::Format { .. },
            }
        ));
        assert!(err.to_string().contains("application"));
    }
}
