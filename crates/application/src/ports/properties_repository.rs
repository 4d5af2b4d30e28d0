//! Properties repository port
//!
//! Flat `key=value` tables: token tables on input, extracted variables on output.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use substvar_domain::PropertyMap;

/// Errors that can occur during properties operations.
#[derive(Debug, thiserror::Error)]
pub enum PropertiesError {
    /// Properties file not found.
    #[error("Properties file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// I/O error.
    #[error("I/O error on {}: {reason}", path.display())]
    Io {
        /// Properties file.
        path: PathBuf,
        /// Underlying error.
        reason: String,
    },

    /// The content is not a valid properties file.
    #[error("Malformed properties file {}: {reason}", path.display())]
    Format {
        /// Properties file.
        path: PathBuf,
        /// Parser message, with the line when known.
        reason: String,
    },
}

/// Repository trait for properties files.
#[async_trait]
pub trait PropertiesRepository: Send + Sync {
    /// Reads a properties file. Later duplicates of a key win.
    ///
    /// # Errors
    /// Returns `PropertiesError::NotFound` if the file doesn't exist and
    /// `PropertiesError::Format` if it cannot be parsed.
    async fn load(&self, path: &Path) -> Result<HashMap<String, String>, PropertiesError>;

    /// Writes a properties file in key order, preceded by one `#` line per
    /// comment. Parent directories are created as needed.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    async fn save(
        &self,
        path: &Path,
        properties: &PropertyMap,
        comments: &[String],
    ) -> Result<(), PropertiesError>;

    /// Checks if a properties file exists.
    async fn exists(&self, path: &Path) -> bool;
}
