//! File-based profile repository.
//!
//! Profiles are stored as XML under the application folder:
//! ```text
//! application/
//!   META-INF/
//!     default.substvar
//!     token.substvar
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use substvar_application::ports::{FileSystem, FileSystemError, ProfileError, ProfileRepository};
use substvar_domain::variable::Profile;
use tracing::debug;

use crate::serialization::{parse_document, write_document};

/// Directory holding the profiles of an application.
pub const PROFILE_DIR: &str = "META-INF";

/// File extension of profiles.
pub const PROFILE_EXTENSION: &str = "substvar";

fn to_profile_error(path: &Path, error: FileSystemError) -> ProfileError {
    match error {
        FileSystemError::NotFound(path) => ProfileError::NotFound(path),
        other => ProfileError::Io {
            path: path.to_path_buf(),
            reason: other.to_string(),
        },
    }
}

/// Reads and writes `.substvar` profiles through a [`FileSystem`].
#[derive(Debug, Clone)]
pub struct FileProfileRepository<F> {
    fs: F,
}

impl<F: FileSystem> FileProfileRepository<F> {
    /// Creates a new file-based profile repository.
    pub const fn new(fs: F) -> Self {
        Self { fs }
    }

    /// Returns the path of a named profile inside an application folder.
    #[must_use]
    pub fn profile_path(application_folder: &Path, profile: &str) -> PathBuf {
        application_folder
            .join(PROFILE_DIR)
            .join(format!("{profile}.{PROFILE_EXTENSION}"))
    }
}

#[async_trait]
impl<F: FileSystem> ProfileRepository for FileProfileRepository<F> {
    async fn load(&self, path: &Path) -> Result<Profile, ProfileError> {
        let bytes = self
            .fs
            .read_file(path)
            .await
            .map_err(|e| to_profile_error(path, e))?;

        let invalid = |source| ProfileError::Invalid {
            path: path.to_path_buf(),
            source,
        };
        let document = parse_document(&bytes).map_err(invalid)?;
        let profile = Profile::from_document(document).map_err(invalid)?;

        debug!(path = %path.display(), variables = profile.len(), "Parsed profile");
        Ok(profile)
    }

    async fn save(&self, path: &Path, profile: &Profile) -> Result<(), ProfileError> {
        let text = write_document(profile.document());
        self.fs
            .write_file(path, text.as_bytes())
            .await
            .map_err(|e| to_profile_error(path, e))?;

        debug!(path = %path.display(), bytes = text.len(), "Wrote profile");
        Ok(())
    }

    async fn exists(&self, path: &Path) -> bool {
        self.fs.is_file(path).await
    }
}
