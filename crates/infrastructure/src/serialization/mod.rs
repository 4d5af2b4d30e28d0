//! Deterministic serialization for substvar file formats.
//!
//! Every writer produces byte-stable output for clean Git diffs:
//! - 2-space indentation
//! - Keys in a fixed order
//! - Trailing newline
//! - UTF-8 without BOM

mod json;
mod properties;
mod xml;

pub use json::{SerializationError, to_json_stable};
pub use properties::{read_properties, write_properties};
pub use xml::{parse_document, write_document};
