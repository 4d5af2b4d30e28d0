//! Layered token lookup
//!
//! Holds all override tables for resolution with proper precedence.

use serde::Serialize;

use super::table::{TokenScope, TokenTable};
use crate::variable::GlobalVariable;

/// Holds all override tables for resolution.
/// Tables are consulted in increasing precedence and the last hit wins:
/// 1. Common tokens (shared, optional)
/// 2. Application tokens (mandatory)
#[derive(Debug, Clone, Default)]
pub struct TokenLayers {
    /// Tables ordered by ascending scope precedence.
    tables: Vec<TokenTable>,
}

/// A token found while resolving a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenHit<'a> {
    /// The token value.
    pub value: &'a str,
    /// Scope of the table that supplied it.
    pub scope: TokenScope,
    /// Origin of the table that supplied it.
    pub origin: &'a str,
}

/// Outcome of resolving a single variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Value after applying every override table.
    pub effective_value: String,
    /// True when the effective value differs from the original value.
    pub was_tokenized: bool,
    /// Scope of the winning table, if any table had the name.
    pub scope: Option<TokenScope>,
}

impl TokenLayers {
    /// Creates an empty set of layers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates layers from the common and application tables.
    #[must_use]
    pub fn from_tables(common: TokenTable, application: TokenTable) -> Self {
        Self::new().with_table(common).with_table(application)
    }

    /// Adds a table.
    #[must_use]
    pub fn with_table(mut self, table: TokenTable) -> Self {
        self.push(table);
        self
    }

    /// Adds a table, keeping the layers ordered by scope precedence.
    /// Tables of equal scope keep their insertion order.
    pub fn push(&mut self, table: TokenTable) {
        let position = self
            .tables
            .iter()
            .position(|t| t.scope() > table.scope())
            .unwrap_or(self.tables.len());
        self.tables.insert(position, table);
    }

    /// Returns the tables in ascending precedence.
    #[must_use]
    pub fn tables(&self) -> &[TokenTable] {
        &self.tables
    }

    /// Returns the table of a scope, if one was added.
    #[must_use]
    pub fn table(&self, scope: TokenScope) -> Option<&TokenTable> {
        self.tables.iter().rev().find(|t| t.scope() == scope)
    }

    /// Returns the count of tokens across all tables.
    #[must_use]
    pub fn total_token_count(&self) -> usize {
        self.tables.iter().map(TokenTable::len).sum()
    }

    /// Looks up a name across all tables. The highest precedence hit wins.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<TokenHit<'_>> {
        self.tables.iter().rev().find_map(|table| {
            table.get(name).map(|value| TokenHit {
                value,
                scope: table.scope(),
                origin: table.origin(),
            })
        })
    }
}

/// Resolves the effective value of a variable.
///
/// Starts from the inline value (empty when absent) and lets each table
/// that contains the name replace it, in ascending precedence. A variable
/// counts as tokenized only when the result differs from the inline value.
#[must_use]
pub fn resolve(variable: &GlobalVariable, layers: &TokenLayers) -> Resolution {
    let original = variable.original_value();

    match layers.lookup(&variable.name) {
        Some(hit) => Resolution {
            effective_value: hit.value.to_string(),
            was_tokenized: hit.value != original,
            scope: Some(hit.scope),
        },
        None => Resolution {
            effective_value: original.to_string(),
            was_tokenized: false,
            scope: None,
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::document::Document;

    fn variable(name: &str, value: Option<&str>) -> GlobalVariable {
        let doc = Document::new("repository");
        GlobalVariable {
            node: doc.root(),
            name: name.to_string(),
            var_type: Some("String".to_string()),
            value: value.map(str::to_string),
            is_override: false,
            lookup_value: None,
            use_lookup_value: false,
        }
    }

    fn create_test_layers() -> TokenLayers {
        let common = TokenTable::new(TokenScope::Common, "common.properties")
            .with_token("region", "eu-west-1")
            .with_token("dbHost", "common-db.internal");
        let application = TokenTable::new(TokenScope::Application, "app.properties")
            .with_token("dbHost", "prod-db.internal")
            .with_token("same", "unchanged");
        TokenLayers::from_tables(common, application)
    }

    #[test]
    fn test_no_hit_keeps_original() {
        let layers = create_test_layers();
        let resolved = resolve(&variable("timeout", Some("30")), &layers);

        assert_eq!(resolved.effective_value, "30");
        assert!(!resolved.was_tokenized);
        assert_eq!(resolved.scope, None);
    }

    #[test]
    fn test_no_hit_without_value_is_empty() {
        let resolved = resolve(&variable("timeout", None), &create_test_layers());
        assert_eq!(resolved.effective_value, "");
        assert!(!resolved.was_tokenized);
    }

    #[test]
    fn test_common_only() {
        let resolved = resolve(&variable("region", Some("local")), &create_test_layers());
        assert_eq!(resolved.effective_value, "eu-west-1");
        assert!(resolved.was_tokenized);
        assert_eq!(resolved.scope, Some(TokenScope::Common));
    }

    #[test]
    fn test_precedence_application_over_common() {
        let resolved = resolve(&variable("dbHost", Some("localhost")), &create_test_layers());
        assert_eq!(resolved.effective_value, "prod-db.internal");
        assert_eq!(resolved.scope, Some(TokenScope::Application));
    }

    #[test]
    fn test_equal_override_is_not_tokenized() {
        let resolved = resolve(&variable("same", Some("unchanged")), &create_test_layers());
        assert_eq!(resolved.effective_value, "unchanged");
        assert!(!resolved.was_tokenized);
        assert_eq!(resolved.scope, Some(TokenScope::Application));
    }

    #[test]
    fn test_push_orders_by_scope() {
        let application = TokenTable::new(TokenScope::Application, "app").with_token("k", "app");
        let common = TokenTable::new(TokenScope::Common, "common").with_token("k", "common");

        // inserted out of order, application must still win
        let layers = TokenLayers::new().with_table(application).with_table(common);

        assert_eq!(layers.tables()[0].scope(), TokenScope::Common);
        assert_eq!(layers.lookup("k").unwrap().value, "app");
        assert_eq!(layers.total_token_count(), 2);
    }

    #[test]
    fn test_lookup_reports_origin() {
        let layers = create_test_layers();
        let hit = layers.lookup("region").unwrap();
        assert_eq!(hit.origin, "common.properties");
        assert!(layers.lookup("nonexistent").is_none());
        assert_eq!(
            layers.table(TokenScope::Application).unwrap().origin(),
            "app.properties"
        );
    }
}
