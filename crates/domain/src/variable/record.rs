//! Variable records read from `globalVariable` elements

use crate::document::{Document, NodeId};
use crate::error::{DomainError, DomainResult};

/// Element and field names used by substitution variable profiles.
pub mod field {
    /// A single variable.
    pub const GLOBAL_VARIABLE: &str = "globalVariable";
    /// Variable identifier.
    pub const NAME: &str = "name";
    /// Variable classification.
    pub const TYPE: &str = "type";
    /// Inline value.
    pub const VALUE: &str = "value";
    /// Whether the value was supplied rather than defaulted.
    pub const IS_OVERRIDE: &str = "isOverride";
    /// Indirect value reference.
    pub const LOOKUP_VALUE: &str = "lookupValue";
    /// Whether the indirect reference is in effect.
    pub const USE_LOOKUP_VALUE: &str = "useLookupValue";
}

/// Type name that switches a variable to lookup indirection once tokenized.
pub const PASSWORD_TYPE: &str = "Password";

/// One `globalVariable` entry of a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalVariable {
    /// Element holding this variable in the source document.
    pub node: NodeId,
    /// Variable name.
    pub name: String,
    /// Classification; required by the tokenizer, not by the parser.
    pub var_type: Option<String>,
    /// Inline value. `None` when there is no `<value>` element.
    pub value: Option<String>,
    /// Content of `<isOverride>`.
    pub is_override: bool,
    /// Content of `<lookupValue>`, if present.
    pub lookup_value: Option<String>,
    /// Content of `<useLookupValue>`.
    pub use_lookup_value: bool,
}

impl GlobalVariable {
    /// Reads a variable from its element.
    ///
    /// Fields are the direct children of the element; the first occurrence wins.
    ///
    /// # Errors
    ///
    /// Returns a parse error if the element has no `<name>` child.
    pub fn from_element(document: &Document, node: NodeId) -> DomainResult<Self> {
        let text = |name: &str| {
            document
                .first_child_named(node, name)
                .map(|child| document.text_content(child))
        };
        let flag = |name: &str| text(name).is_some_and(|v| v.trim().eq_ignore_ascii_case("true"));

        let name = text(field::NAME).ok_or_else(|| {
            DomainError::parse(format!(
                "<{}> element without a <{}> child",
                field::GLOBAL_VARIABLE,
                field::NAME
            ))
        })?;

        Ok(Self {
            node,
            name,
            var_type: text(field::TYPE),
            value: text(field::VALUE),
            is_override: flag(field::IS_OVERRIDE),
            lookup_value: text(field::LOOKUP_VALUE),
            use_lookup_value: flag(field::USE_LOOKUP_VALUE),
        })
    }

    /// Returns the inline value, or an empty string when there is none.
    #[must_use]
    pub fn original_value(&self) -> &str {
        self.value.as_deref().unwrap_or_default()
    }

    /// Returns true if the variable is typed as a password.
    #[must_use]
    pub fn is_password(&self) -> bool {
        self.var_type.as_deref() == Some(PASSWORD_TYPE)
    }
}

/// Reads every `globalVariable` element below the root, in document order.
///
/// # Errors
///
/// Returns a parse error if any variable lacks a name.
pub fn parse_variables(document: &Document) -> DomainResult<Vec<GlobalVariable>> {
    document
        .descendants_named(document.root(), field::GLOBAL_VARIABLE)
        .into_iter()
        .enumerate()
        .map(|(index, node)| {
            GlobalVariable::from_element(document, node).map_err(|e| match e {
                DomainError::Parse(reason) => {
                    DomainError::Parse(format!("variable #{}: {reason}", index + 1))
                }
                other => other,
            })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn add_variable(doc: &mut Document, fields: &[(&str, &str)]) -> NodeId {
        let root = doc.root();
        let var = doc.append_element(root, field::GLOBAL_VARIABLE, "");
        for (name, text) in fields {
            doc.append_element(var, name, text);
        }
        var
    }

    #[test]
    fn test_parse_full_record() {
        let mut doc = Document::new("repository");
        let node = add_variable(
            &mut doc,
            &[
                ("name", "dbHost"),
                ("value", "localhost"),
                ("type", "String"),
                ("isOverride", "false"),
            ],
        );

        let vars = parse_variables(&doc).unwrap();
        assert_eq!(
            vars,
            vec![GlobalVariable {
                node,
                name: "dbHost".to_string(),
                var_type: Some("String".to_string()),
                value: Some("localhost".to_string()),
                is_override: false,
                lookup_value: None,
                use_lookup_value: false,
            }]
        );
    }

    #[test]
    fn test_absent_value_is_distinct_from_empty() {
        let mut doc = Document::new("repository");
        add_variable(&mut doc, &[("name", "absent"), ("type", "Password")]);
        add_variable(&mut doc, &[("name", "blank"), ("value", "")]);

        let vars = parse_variables(&doc).unwrap();
        assert_eq!(vars[0].value, None);
        assert_eq!(vars[0].original_value(), "");
        assert!(vars[0].is_password());
        assert_eq!(vars[1].value, Some(String::new()));
    }

    #[test]
    fn test_flags_are_case_insensitive() {
        let mut doc = Document::new("repository");
        add_variable(
            &mut doc,
            &[
                ("name", "apiKey"),
                ("isOverride", " TRUE "),
                ("useLookupValue", "true"),
                ("lookupValue", "%%apiKey%%"),
            ],
        );

        let var = &parse_variables(&doc).unwrap()[0];
        assert!(var.is_override);
        assert!(var.use_lookup_value);
        assert_eq!(var.lookup_value.as_deref(), Some("%%apiKey%%"));
    }

    #[test]
    fn test_missing_name_is_parse_error() {
        let mut doc = Document::new("repository");
        add_variable(&mut doc, &[("name", "first")]);
        add_variable(&mut doc, &[("value", "orphan")]);

        let err = parse_variables(&doc).unwrap_err();
        assert!(err.is_parse());
        assert!(err.to_string().contains("variable #2"));
    }
}
