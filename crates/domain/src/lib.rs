//! Substvar Domain - Core business types
//!
//! This crate defines the model for tokenizing substitution variable profiles:
//! the document tree, the variables it carries, the override tables and the
//! tokenizer that applies them. All types here are pure Rust with no I/O.

pub mod document;
pub mod error;
pub mod tokenize;
pub mod tokens;
pub mod trust;
pub mod variable;

pub use document::{Document, DocumentBuilder, NodeId};
pub use error::{DomainError, DomainResult};
pub use tokenize::{TokenizeReport, Tokenizer, VariableOutcome};
pub use tokens::{TokenLayers, TokenScope, TokenTable};
pub use trust::{CertificateSource, TrustConfig};
pub use variable::{GlobalVariable, Profile, PropertyMap, flatten};
