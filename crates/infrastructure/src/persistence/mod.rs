//! File-backed persistence adapters.

mod file_system;
mod profile_repository;
mod properties_repository;

pub use file_system::TokioFileSystem;
pub use profile_repository::FileProfileRepository;
pub use properties_repository::FilePropertiesRepository;
