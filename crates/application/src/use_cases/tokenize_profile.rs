//! Tokenize profile use case
//!
//! Reads the source profile, resolves every variable against the token
//! layers and writes the rewritten profile to the target path.

use std::path::{Path, PathBuf};

use substvar_domain::tokenize::{TokenizeReport, Tokenizer};
use substvar_domain::{DomainError, TokenLayers};
use tracing::{debug, info, warn};

use crate::ports::{ProfileError, ProfileRepository};

/// Errors that can occur when tokenizing a profile.
#[derive(Debug, thiserror::Error)]
pub enum TokenizeProfileError {
    /// The source profile could not be read or parsed.
    #[error("Failed to read source profile: {0}")]
    Read(#[source] ProfileError),

    /// A variable cannot be processed.
    #[error("Failed to tokenize {}: {source}", path.display())]
    Schema {
        /// Source profile.
        path: PathBuf,
        /// Offending variable.
        #[source]
        source: DomainError,
    },

    /// The target profile could not be written.
    #[error("Failed to write target profile: {0}")]
    Write(#[source] ProfileError),
}

/// Output of the tokenize profile use case.
#[derive(Debug, Clone)]
pub struct TokenizeProfileOutput {
    /// Path the rewritten profile was written to.
    pub target: PathBuf,
    /// Per-variable outcome, password values included.
    pub report: TokenizeReport,
}

/// Tokenizes a profile and writes the result.
pub struct TokenizeProfile<R> {
    repository: R,
}

impl<R: ProfileRepository> TokenizeProfile<R> {
    /// Creates a new `TokenizeProfile` use case.
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Executes the use case.
    ///
    /// The target is only written once every variable has been resolved.
    ///
    /// # Errors
    /// Returns an error if the source cannot be read, a variable lacks a
    /// type, or the target cannot be written.
    pub async fn execute(
        &self,
        source: &Path,
        target: &Path,
        layers: &TokenLayers,
    ) -> Result<TokenizeProfileOutput, TokenizeProfileError> {
        let mut profile = self
            .repository
            .load(source)
            .await
            .map_err(TokenizeProfileError::Read)?;
        info!(
            path = %source.display(),
            variables = profile.len(),
            "Read source profile"
        );

        let report = Tokenizer::new(layers)
            .tokenize(&mut profile)
            .map_err(|source_error| TokenizeProfileError::Schema {
                path: source.to_path_buf(),
                source: source_error,
            })?;
        log_outcomes(&report);

        self.repository
            .save(target, &profile)
            .await
            .map_err(TokenizeProfileError::Write)?;

        info!(
            path = %target.display(),
            variables = report.variable_count(),
            tokenized = report.tokenized_count(),
            lookups = report.lookup_conversion_count(),
            skipped_empty = report.skipped_empty_count(),
            "Wrote tokenized profile"
        );

        Ok(TokenizeProfileOutput {
            target: target.to_path_buf(),
            report,
        })
    }
}

fn log_outcomes(report: &TokenizeReport) {
    for outcome in report.masked().outcomes {
        if outcome.skipped_empty {
            debug!(name = %outcome.name, "Skipping variable without value");
        } else {
            debug!(
                name = %outcome.name,
                original = %outcome.original_value,
                effective = %outcome.effective_value,
                scope = ?outcome.scope,
                tokenized = outcome.tokenized,
                lookup = outcome.converted_to_lookup,
                "Resolved variable"
            );
        }

        if outcome.effective_value.is_empty() {
            warn!(name = %outcome.name, "Variable resolves to an empty value");
        }
    }
}
