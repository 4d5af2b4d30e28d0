//! Profile repository port
//!
//! Defines the interface for reading and writing `.substvar` profiles.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use substvar_domain::{DomainError, variable::Profile};

/// Errors that can occur during profile operations.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    /// Profile file not found.
    #[error("Profile not found: {}", .0.display())]
    NotFound(PathBuf),

    /// I/O error.
    #[error("I/O error on {}: {reason}", path.display())]
    Io {
        /// Profile file.
        path: PathBuf,
        /// Underlying error.
        reason: String,
    },

    /// The file is not a valid profile.
    #[error("Invalid profile {}: {source}", path.display())]
    Invalid {
        /// Profile file.
        path: PathBuf,
        /// Parse failure.
        #[source]
        source: DomainError,
    },
}

/// Repository trait for profile persistence.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Loads and parses a profile.
    ///
    /// # Errors
    /// Returns `ProfileError::NotFound` if the file doesn't exist and
    /// `ProfileError::Invalid` if it is malformed.
    async fn load(&self, path: &Path) -> Result<Profile, ProfileError>;

    /// Serializes a profile, creating parent directories as needed.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    async fn save(&self, path: &Path, profile: &Profile) -> Result<(), ProfileError>;

    /// Checks if a profile file exists.
    async fn exists(&self, path: &Path) -> bool;
}
