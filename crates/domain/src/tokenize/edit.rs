//! Per-variable edit planning and application

use crate::document::{Document, NodeId};
use crate::error::{DomainError, DomainResult};
use crate::tokens::{Resolution, TokenLayers, resolve};
use crate::variable::{GlobalVariable, field};

/// A single change to a `globalVariable` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Replace the content of `<value>`.
    SetValue(String),
    /// Set `<isOverride>` to `true`, creating it when missing.
    MarkOverridden,
    /// Remove `<lookupValue>`; an override makes it stale.
    DropLookupValue,
    /// Replace the inline value with `<useLookupValue>true</useLookupValue>`
    /// and a `<lookupValue>` holding the given value.
    ConvertToLookup(String),
}

/// What the tokenizer decided for one variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariablePlan {
    /// Element of the variable.
    pub node: NodeId,
    /// Variable name.
    pub name: String,
    /// Variable type.
    pub var_type: String,
    /// Inline value before tokenizing (empty when absent).
    pub original_value: String,
    /// Resolved value and origin.
    pub resolution: Resolution,
    /// Edits to apply, in order. Empty for untouched variables.
    pub edits: Vec<Edit>,
}

impl VariablePlan {
    /// Returns true if the variable was left alone because it had no value.
    #[must_use]
    pub fn skipped_empty(&self) -> bool {
        self.original_value.is_empty()
    }

    /// Returns true if the variable is converted to lookup indirection.
    #[must_use]
    pub fn converts_to_lookup(&self) -> bool {
        self.edits
            .iter()
            .any(|e| matches!(e, Edit::ConvertToLookup(_)))
    }
}

/// Decides the edits for one variable.
///
/// Variables without an inline value are never touched. Otherwise the value
/// is rewritten; a changed value also marks the variable overridden and drops
/// any stale lookup, and a changed password moves to lookup indirection.
///
/// # Errors
///
/// Returns a schema error if the variable has no `<type>`.
pub fn plan_variable(variable: &GlobalVariable, layers: &TokenLayers) -> DomainResult<VariablePlan> {
    let var_type = variable
        .var_type
        .clone()
        .ok_or_else(|| DomainError::missing_field(Some(&variable.name), field::TYPE))?;

    let resolution = resolve(variable, layers);
    let original_value = variable.original_value().to_string();
    let mut edits = Vec::new();

    if !original_value.is_empty() {
        edits.push(Edit::SetValue(resolution.effective_value.clone()));

        if resolution.was_tokenized {
            edits.push(Edit::MarkOverridden);
            edits.push(Edit::DropLookupValue);

            if variable.is_password() {
                edits.push(Edit::ConvertToLookup(resolution.effective_value.clone()));
            }
        }
    }

    Ok(VariablePlan {
        node: variable.node,
        name: variable.name.clone(),
        var_type,
        original_value,
        resolution,
        edits,
    })
}

/// Applies planned edits to a variable element.
pub fn apply_edits(document: &mut Document, node: NodeId, edits: &[Edit]) {
    for edit in edits {
        match edit {
            Edit::SetValue(value) => {
                if let Some(value_node) = document.first_child_named(node, field::VALUE) {
                    document.set_text_content(value_node, value);
                }
            }
            Edit::MarkOverridden => match document.first_child_named(node, field::IS_OVERRIDE) {
                Some(flag) => document.set_text_content(flag, "true"),
                None => {
                    document.append_element(node, field::IS_OVERRIDE, "true");
                }
            },
            Edit::DropLookupValue => {
                document.remove_children_named(node, field::LOOKUP_VALUE);
            }
            Edit::ConvertToLookup(value) => {
                document.remove_children_named(node, field::VALUE);
                document.remove_children_named(node, field::USE_LOOKUP_VALUE);
                document.remove_children_named(node, field::LOOKUP_VALUE);
                document.append_element(node, field::USE_LOOKUP_VALUE, "true");
                document.append_element(node, field::LOOKUP_VALUE, value);
            }
        }
    }
}
