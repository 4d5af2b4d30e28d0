//! Layered configuration.
//!
//! `defaults/substvar.default.toml` is embedded into the binary. A
//! `substvar.toml` in the working directory (or the file passed with
//! `--config`), `SUBSTVAR_*` environment variables and command line flags are
//! layered on top, in that order, before deserializing into [`Settings`].

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat, ValueKind};
use serde::Deserialize;
use substvar_application::{CommonTokens, LoadTokensInput};
use substvar_domain::TrustConfig;
use substvar_infrastructure::{FileProfileRepository, TokioFileSystem};
use url::Url;

const DEFAULT_TOML: &str = include_str!("../defaults/substvar.default.toml");

/// Configuration file picked up from the working directory when present.
pub const LOCAL_CONFIG_FILE: &str = "substvar.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "SUBSTVAR";

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
    /// Folder holding `META-INF/` and `resources/`.
    pub application_folder: PathBuf,
    /// Settings of the `tokenize` command.
    pub tokenize: TokenizeSettings,
    /// Settings of the `extract-properties` command.
    pub extract: ExtractSettings,
}

/// Settings of the `tokenize` command.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenizeSettings {
    /// Profile read from `META-INF/`.
    pub profile_source: String,
    /// Profile written to `META-INF/`.
    pub profile_target: String,
    /// Local common tokens file.
    #[serde(default)]
    pub common_tokens: Option<PathBuf>,
    /// Application tokens file.
    #[serde(default)]
    pub app_tokens: Option<PathBuf>,
    /// Remote common tokens file. Takes precedence over `common_tokens`.
    #[serde(default)]
    pub common_remote_url: Option<String>,
    /// Where the remote common tokens file is stored.
    pub common_download_path: PathBuf,
    /// Extra PEM or DER trust anchors for the download.
    #[serde(default)]
    pub ca_certificates: Vec<PathBuf>,
    /// Skip certificate verification for the download.
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

/// Settings of the `extract-properties` command.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractSettings {
    /// Profile to extract.
    #[serde(default)]
    pub source_file: Option<PathBuf>,
    /// Properties file to write.
    pub output_file: PathBuf,
}

impl Settings {
    /// Returns the path of a named profile of the application.
    #[must_use]
    pub fn profile_path(&self, profile: &str) -> PathBuf {
        FileProfileRepository::<TokioFileSystem>::profile_path(&self.application_folder, profile)
    }

    fn resource(&self, name: &str) -> PathBuf {
        self.application_folder.join("resources").join(name)
    }

    /// Returns the profile read by `tokenize`.
    #[must_use]
    pub fn tokenize_source(&self) -> PathBuf {
        self.profile_path(&self.tokenize.profile_source)
    }

    /// Returns the profile written by `tokenize`.
    #[must_use]
    pub fn tokenize_target(&self) -> PathBuf {
        self.profile_path(&self.tokenize.profile_target)
    }

    /// Returns the profile read by `extract-properties`.
    #[must_use]
    pub fn extract_source(&self) -> PathBuf {
        self.extract
            .source_file
            .clone()
            .unwrap_or_else(|| self.profile_path("default"))
    }

    /// Returns the trust settings for the common tokens download.
    #[must_use]
    pub fn trust(&self) -> TrustConfig {
        let mut trust = if self.tokenize.accept_invalid_certs {
            TrustConfig::insecure()
        } else {
            TrustConfig::new()
        };
        for path in &self.tokenize.ca_certificates {
            trust = trust.with_ca_file(path);
        }
        trust
    }

    /// Returns where the token tables are read from.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote URL cannot be parsed.
    pub fn tokens_input(&self) -> Result<LoadTokensInput, url::ParseError> {
        let common = match &self.tokenize.common_remote_url {
            Some(url) => CommonTokens::Remote {
                url: Url::parse(url)?,
                destination: self.tokenize.common_download_path.clone(),
                trust: self.trust(),
            },
            None => CommonTokens::Local(
                self.tokenize
                    .common_tokens
                    .clone()
                    .unwrap_or_else(|| self.resource("common-tokens.properties")),
            ),
        };

        Ok(LoadTokensInput {
            common,
            application: self
                .tokenize
                .app_tokens
                .clone()
                .unwrap_or_else(|| self.resource("app-tokens.properties")),
        })
    }
}

/// Helper for layering overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Starts a loader seeded with the embedded defaults.
    #[must_use]
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layers a configuration file. A missing file is an error.
    #[must_use]
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layers a configuration file that may be absent.
    #[must_use]
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layers `SUBSTVAR_*` environment variables. Nested keys use `__`, as in
    /// `SUBSTVAR_TOKENIZE__PROFILE_TARGET`.
    #[must_use]
    pub fn with_environment(mut self) -> Self {
        self.builder = self.builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        );
        self
    }

    /// Applies a single key/value override.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not a valid path expression.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Applies an override when a value is present.
    ///
    /// # Errors
    ///
    /// Same as [`Self::set_override`].
    pub fn set_override_option<I>(self, key: &str, value: Option<I>) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        match value {
            Some(value) => self.set_override(key, value),
            None => Ok(self),
        }
    }

    /// Finalizes the builder and deserializes the resulting configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or a value has the wrong type.
    pub fn build(self) -> Result<Settings, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts a path to a configuration value.
#[must_use]
pub fn path_value(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
