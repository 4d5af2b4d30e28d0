//! Flat name/value view of a profile

use std::collections::BTreeMap;

use super::record::GlobalVariable;

/// Flat variable mapping, ordered by name for deterministic output.
pub type PropertyMap = BTreeMap<String, String>;

/// Maps variables to their inline values. Absent values become empty
/// strings and the last of several same-named variables wins.
#[must_use]
pub fn flatten(variables: &[GlobalVariable]) -> PropertyMap {
    variables
        .iter()
        .map(|v| (v.name.clone(), v.original_value().to_string()))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::variable::parse_variables;

    fn profile(entries: &[(&str, Option<&str>)]) -> Vec<GlobalVariable> {
        let mut doc = Document::new("repository");
        let root = doc.root();
        for (name, value) in entries {
            let var = doc.append_element(root, "globalVariable", "");
            doc.append_element(var, "name", name);
            if let Some(value) = value {
                doc.append_element(var, "value", value);
            }
        }
        parse_variables(&doc).unwrap()
    }

    #[test]
    fn test_missing_value_maps_to_empty_string() {
        let vars = profile(&[
            ("dbHost", Some("localhost")),
            ("dbPassword", None),
            ("dbPort", Some("5432")),
        ]);

        let map = flatten(&vars);
        assert_eq!(map.len(), 3);
        assert_eq!(map["dbHost"], "localhost");
        assert_eq!(map["dbPassword"], "");
        assert_eq!(map["dbPort"], "5432");
    }

    #[test]
    fn test_duplicate_names_last_wins() {
        let vars = profile(&[("port", Some("1")), ("port", Some("2"))]);

        let map = flatten(&vars);
        assert_eq!(map.len(), 1);
        assert_eq!(map["port"], "2");
    }

    #[test]
    fn test_empty_profile() {
        assert!(flatten(&[]).is_empty());
    }
}
