//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod clock;
mod file_system;
mod profile_repository;
mod properties_repository;
mod remote_fetcher;

pub use clock::Clock;
pub use file_system::{FileSystem, FileSystemError};
pub use profile_repository::{ProfileError, ProfileRepository};
pub use properties_repository::{PropertiesError, PropertiesRepository};
pub use remote_fetcher::{RemoteFetchError, RemoteFetcher};
