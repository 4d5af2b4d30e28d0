//! File-based properties repository.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use substvar_application::ports::{
    FileSystem, FileSystemError, PropertiesError, PropertiesRepository,
};
use substvar_domain::PropertyMap;
use tracing::debug;

use crate::serialization::{read_properties, write_properties};

fn to_properties_error(path: &Path, error: FileSystemError) -> PropertiesError {
    match error {
        FileSystemError::NotFound(path) => PropertiesError::NotFound(path),
        other => PropertiesError::Io {
            path: path.to_path_buf(),
            reason: other.to_string(),
        },
    }
}

/// Reads and writes Java `.properties` files through a [`FileSystem`].
#[derive(Debug, Clone)]
pub struct FilePropertiesRepository<F> {
    fs: F,
}

impl<F: FileSystem> FilePropertiesRepository<F> {
    /// Creates a new file-based properties repository.
    pub const fn new(fs: F) -> Self {
        Self { fs }
    }
}

#[async_trait]
impl<F: FileSystem> PropertiesRepository for FilePropertiesRepository<F> {
    async fn load(&self, path: &Path) -> Result<HashMap<String, String>, PropertiesError> {
        let bytes = self
            .fs
            .read_file(path)
            .await
            .map_err(|e| to_properties_error(path, e))?;

        let properties = read_properties(&bytes).map_err(|e| PropertiesError::Format {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        debug!(path = %path.display(), count = properties.len(), "Read properties");
        Ok(properties)
    }

    async fn save(
        &self,
        path: &Path,
        properties: &PropertyMap,
        comments: &[String],
    ) -> Result<(), PropertiesError> {
        let bytes = write_properties(properties, comments).map_err(|e| PropertiesError::Format {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        self.fs
            .write_file(path, &bytes)
            .await
            .map_err(|e| to_properties_error(path, e))?;

        debug!(path = %path.display(), count = properties.len(), "Wrote properties");
        Ok(())
    }

    async fn exists(&self, path: &Path) -> bool {
        self.fs.is_file(path).await
    }
}
