//! Java `.properties` codec.

use std::collections::HashMap;

use java_properties::{PropertiesError, PropertiesWriter};
use substvar_domain::PropertyMap;

/// Parses a properties file. Later duplicates of a key win.
///
/// # Errors
///
/// Returns an error for malformed escapes or invalid encoding.
pub fn read_properties(bytes: &[u8]) -> Result<HashMap<String, String>, PropertiesError> {
    java_properties::read(bytes)
}

/// Writes one `#` line per comment, then every property in key order.
///
/// # Errors
///
/// Returns an error if a value cannot be encoded.
pub fn write_properties(
    properties: &PropertyMap,
    comments: &[String],
) -> Result<Vec<u8>, PropertiesError> {
    let mut buffer = Vec::new();
    {
        let mut writer = PropertiesWriter::new(&mut buffer);
        for comment in comments {
            writer.write_comment(comment)?;
        }
        for (key, value) in properties {
            writer.write(key, value)?;
        }
        writer.finish()?;
    }
    Ok(buffer)
}
