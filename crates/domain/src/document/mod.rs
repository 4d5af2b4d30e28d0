//! Owned document tree for substitution variable profiles.
//!
//! A [`Document`] is an arena of nodes addressed by stable [`NodeId`]s.
//! Parsers build it through [`DocumentBuilder`], the tokenizer edits it in
//! place and writers walk it back to text. Nodes detached by an edit keep
//! their slot in the arena, so identifiers handed out earlier never dangle.

mod builder;
mod tree;

pub use builder::DocumentBuilder;
pub use tree::{Attribute, Declaration, Document, Element, NodeId, NodeKind};
