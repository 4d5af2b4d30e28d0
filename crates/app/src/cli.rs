//! Command line interface.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use config::ConfigError;

use crate::settings::{LOCAL_CONFIG_FILE, Loader, Settings, path_value};

/// Tokenize and extract BW6 substitution variable profiles.
#[derive(Parser, Debug)]
#[command(name = "substvar")]
#[command(about = "Tokenize and extract BW6 substitution variable profiles")]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to ./substvar.toml when present)
    #[arg(long, global = true, env = "SUBSTVAR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `substvar_application=debug`
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replace variable values in a profile with tokens and write a new profile
    Tokenize(TokenizeArgs),
    /// Flatten the variables of a profile into a properties file
    ExtractProperties(ExtractArgs),
}

/// Output format of the tokenize report.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Pretty-printed JSON on stdout, password values masked
    Json,
}

/// Options of the `tokenize` command.
#[derive(Args, Debug, Default)]
pub struct TokenizeArgs {
    /// Folder holding META-INF/ and resources/ [default: .]
    #[arg(long)]
    pub application_folder: Option<PathBuf>,

    /// Profile to read [default: default]
    #[arg(long)]
    pub profile_source: Option<String>,

    /// Profile to write [default: token]
    #[arg(long)]
    pub profile_target: Option<String>,

    /// Local common tokens file [default: <folder>/resources/common-tokens.properties]
    #[arg(long)]
    pub common_tokens: Option<PathBuf>,

    /// Application tokens file [default: <folder>/resources/app-tokens.properties]
    #[arg(long)]
    pub app_tokens: Option<PathBuf>,

    /// Download the common tokens from this URL instead of a local file
    #[arg(long)]
    pub common_remote_url: Option<String>,

    /// Where the downloaded common tokens are stored
    /// [default: target/downloaded-common.properties]
    #[arg(long)]
    pub common_download_path: Option<PathBuf>,

    /// Extra trust anchor for the download (PEM, or DER with a .der/.cer extension)
    #[arg(long = "ca-cert")]
    pub ca_certs: Vec<PathBuf>,

    /// Skip certificate verification for the download
    #[arg(long)]
    pub accept_invalid_certs: bool,

    /// Print the per-variable report
    #[arg(long, value_enum)]
    pub report: Option<ReportFormat>,
}

/// Options of the `extract-properties` command.
#[derive(Args, Debug, Default)]
pub struct ExtractArgs {
    /// Folder holding META-INF/ [default: .]
    #[arg(long)]
    pub application_folder: Option<PathBuf>,

    /// Profile to extract [default: <folder>/META-INF/default.substvar]
    #[arg(long)]
    pub source_file: Option<PathBuf>,

    /// Properties file to write [default: target/extracted-config.properties]
    #[arg(long)]
    pub output_file: Option<PathBuf>,
}

fn path_override(path: Option<&PathBuf>) -> Option<String> {
    path.map(|p| path_value(p))
}

impl TokenizeArgs {
    fn apply(&self, loader: Loader) -> Result<Loader, ConfigError> {
        let mut loader = loader
            .set_override_option(
                "application_folder",
                path_override(self.application_folder.as_ref()),
            )?
            .set_override_option("tokenize.profile_source", self.profile_source.clone())?
            .set_override_option("tokenize.profile_target", self.profile_target.clone())?
            .set_override_option("tokenize.common_tokens", path_override(self.common_tokens.as_ref()))?
            .set_override_option("tokenize.app_tokens", path_override(self.app_tokens.as_ref()))?
            .set_override_option("tokenize.common_remote_url", self.common_remote_url.clone())?
            .set_override_option(
                "tokenize.common_download_path",
                path_override(self.common_download_path.as_ref()),
            )?;

        if !self.ca_certs.is_empty() {
            let certs: Vec<String> = self.ca_certs.iter().map(|p| path_value(p)).collect();
            loader = loader.set_override("tokenize.ca_certificates", certs)?;
        }
        if self.accept_invalid_certs {
            loader = loader.set_override("tokenize.accept_invalid_certs", true)?;
        }
        Ok(loader)
    }
}

impl ExtractArgs {
    fn apply(&self, loader: Loader) -> Result<Loader, ConfigError> {
        loader
            .set_override_option(
                "application_folder",
                path_override(self.application_folder.as_ref()),
            )?
            .set_override_option("extract.source_file", path_override(self.source_file.as_ref()))?
            .set_override_option("extract.output_file", path_override(self.output_file.as_ref()))
    }
}

impl Cli {
    /// Builds the settings for this invocation from every configuration layer.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is unreadable or a value has
    /// the wrong type.
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        let loader = match &self.config {
            Some(path) => Loader::new().with_file(path),
            None => Loader::new().with_optional_file(Path::new(LOCAL_CONFIG_FILE)),
        };
        self.apply(loader.with_environment())?.build()
    }

    /// Applies the flags of this invocation on top of `loader`.
    ///
    /// # Errors
    ///
    /// Returns an error if an override key is rejected.
    pub fn apply(&self, loader: Loader) -> Result<Loader, ConfigError> {
        let loader = loader.set_override_option("log_level", self.log_level.clone())?;
        match &self.command {
            Command::Tokenize(args) => args.apply(loader),
            Command::ExtractProperties(args) => args.apply(loader),
        }
    }
}
