//! Substvar Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer.

pub mod adapters;
pub mod persistence;
pub mod serialization;

pub use adapters::{ReqwestFetcher, SystemClock};
pub use persistence::{FileProfileRepository, FilePropertiesRepository, TokioFileSystem};
pub use serialization::{
    SerializationError, parse_document, read_properties, to_json_stable, write_document,
    write_properties,
};
