//! A parsed profile: the document tree plus its variable records

use crate::document::Document;
use crate::error::DomainResult;

use super::record::{GlobalVariable, parse_variables};

/// A `.substvar` document together with the variables found in it.
///
/// Variable records point into the document through node identifiers, so
/// the tokenizer edits the same tree the writer later serializes.
#[derive(Debug, Clone)]
pub struct Profile {
    document: Document,
    variables: Vec<GlobalVariable>,
}

impl Profile {
    /// Reads the variables of a document.
    ///
    /// # Errors
    ///
    /// Returns a parse error if a variable has no name.
    pub fn from_document(document: Document) -> DomainResult<Self> {
        let variables = parse_variables(&document)?;
        Ok(Self {
            document,
            variables,
        })
    }

    /// Returns the underlying document.
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// Returns the variables in document order.
    #[must_use]
    pub fn variables(&self) -> &[GlobalVariable] {
        &self.variables
    }

    /// Returns the number of variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Returns true if the profile has no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Splits the profile into a mutable document and its variable records.
    ///
    /// Call [`Self::refresh`] once the edits are done so the records match
    /// the tree again.
    pub fn parts_mut(&mut self) -> (&mut Document, &[GlobalVariable]) {
        (&mut self.document, &self.variables)
    }

    /// Re-reads the variable records from the document.
    ///
    /// # Errors
    ///
    /// Returns a parse error if an edit left a variable without a name.
    pub fn refresh(&mut self) -> DomainResult<()> {
        self.variables = parse_variables(&self.document)?;
        Ok(())
    }

    /// Consumes the profile, returning the document for serialization.
    #[must_use]
    pub fn into_document(self) -> Document {
        self.document
    }
}
