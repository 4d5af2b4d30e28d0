//! Token tables and their precedence scope

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Defines which override table a token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenScope {
    /// Tokens shared across applications - lowest precedence
    Common = 0,
    /// Tokens of the application being tokenized - highest precedence
    Application = 1,
}

impl TokenScope {
    /// Returns the precedence level (higher = takes priority).
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        *self as u8
    }

    /// Returns a human-readable name for the scope.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Application => "application",
        }
    }
}

impl fmt::Display for TokenScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A flat name to value override table loaded from one source.
///
/// # Example
///
/// ```
/// use substvar_domain::tokens::{TokenScope, TokenTable};
///
/// let table = TokenTable::new(TokenScope::Application, "app-tokens.properties")
///     .with_token("dbHost", "prod-db.internal");
///
/// assert_eq!(table.get("dbHost"), Some("prod-db.internal"));
/// assert_eq!(table.get("missing"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenTable {
    scope: TokenScope,
    /// Where the table was loaded from (path or URL), for diagnostics.
    origin: String,
    tokens: HashMap<String, String>,
}

impl TokenTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new(scope: TokenScope, origin: impl Into<String>) -> Self {
        Self::from_tokens(scope, origin, HashMap::new())
    }

    /// Creates a table from already loaded tokens.
    #[must_use]
    pub fn from_tokens(
        scope: TokenScope,
        origin: impl Into<String>,
        tokens: HashMap<String, String>,
    ) -> Self {
        Self {
            scope,
            origin: origin.into(),
            tokens,
        }
    }

    /// Adds a token, replacing any previous value.
    #[must_use]
    pub fn with_token(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts a token, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.tokens.insert(name.into(), value.into());
    }

    /// Returns the scope of this table.
    #[must_use]
    pub const fn scope(&self) -> TokenScope {
        self.scope
    }

    /// Returns where the table was loaded from.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Gets a token value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.tokens.get(name).map(String::as_str)
    }

    /// Returns the number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if there are no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
