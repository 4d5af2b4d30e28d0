//! Token replacement inside a profile
//!
//! Tokenizing runs in two passes. Every variable is first turned into a
//! [`VariablePlan`], a pure description of the edits it needs. Only when all
//! plans succeeded are the edits applied to the document, so a schema error
//! leaves the tree untouched.
//!
//! # Usage
//!
//! ```
//! use substvar_domain::document::Document;
//! use substvar_domain::tokenize::Tokenizer;
//! use substvar_domain::tokens::{TokenLayers, TokenScope, TokenTable};
//! use substvar_domain::variable::Profile;
//!
//! let mut doc = Document::new("repository");
//! let root = doc.root();
//! let var = doc.append_element(root, "globalVariable", "");
//! doc.append_element(var, "name", "dbHost");
//! doc.append_element(var, "value", "localhost");
//! doc.append_element(var, "type", "String");
//!
//! let layers = TokenLayers::new().with_table(
//!     TokenTable::new(TokenScope::Application, "app-tokens.properties")
//!         .with_token("dbHost", "prod-db.internal"),
//! );
//! let mut profile = Profile::from_document(doc).unwrap();
//! let report = Tokenizer::new(&layers).tokenize(&mut profile).unwrap();
//! assert_eq!(report.tokenized_count(), 1);
//! ```

mod edit;
mod engine;
mod report;

pub use edit::{Edit, VariablePlan, apply_edits, plan_variable};
pub use engine::Tokenizer;
pub use report::{MASK, TokenizeReport, VariableOutcome};
