//! Extract properties use case

use std::path::{Path, PathBuf};

use substvar_domain::{PropertyMap, flatten};
use tracing::info;

use crate::ports::{Clock, ProfileError, ProfileRepository, PropertiesError, PropertiesRepository};

/// First comment line of every extracted properties file.
pub const EXTRACT_HEADER: &str = "BW6 Global Variables extracted by substvar";

/// Errors that can occur when extracting properties.
#[derive(Debug, thiserror::Error)]
pub enum ExtractPropertiesError {
    /// The source profile does not exist.
    #[error("Source profile not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// The source profile could not be read or parsed.
    #[error("Failed to read source profile: {0}")]
    Read(#[source] ProfileError),

    /// The properties file could not be written.
    #[error("Failed to write properties: {0}")]
    Write(#[from] PropertiesError),
}

impl From<ProfileError> for ExtractPropertiesError {
    fn from(error: ProfileError) -> Self {
        match error {
            ProfileError::NotFound(path) => Self::SourceNotFound(path),
            other => Self::Read(other),
        }
    }
}

/// Output of the extract properties use case.
#[derive(Debug, Clone)]
pub struct ExtractPropertiesOutput {
    /// Path the properties were written to.
    pub output: PathBuf,
    /// Flattened variables, ordered by name.
    pub properties: PropertyMap,
}

/// Flattens the variables of a profile into a properties file.
pub struct ExtractProperties<R, P, C> {
    profiles: R,
    properties: P,
    clock: C,
}

impl<R, P, C> ExtractProperties<R, P, C>
where
    R: ProfileRepository,
    P: PropertiesRepository,
    C: Clock,
{
    /// Creates a new `ExtractProperties` use case.
    pub const fn new(profiles: R, properties: P, clock: C) -> Self {
        Self {
            profiles,
            properties,
            clock,
        }
    }

    /// Executes the use case.
    ///
    /// # Errors
    /// Returns an error if the source profile is missing or malformed, or if
    /// the output cannot be written.
    pub async fn execute(
        &self,
        source: &Path,
        output: &Path,
    ) -> Result<ExtractPropertiesOutput, ExtractPropertiesError> {
        let profile = self.profiles.load(source).await?;
        let properties = flatten(profile.variables());

        let comments = vec![
            EXTRACT_HEADER.to_string(),
            self.clock
                .now()
                .format("%a %b %d %H:%M:%S UTC %Y")
                .to_string(),
        ];
        self.properties.save(output, &properties, &comments).await?;

        info!(
            source = %source.display(),
            output = %output.display(),
            count = properties.len(),
            "Extracted global variables"
        );

        Ok(ExtractPropertiesOutput {
            output: output.to_path_buf(),
            properties,
        })
    }
}
