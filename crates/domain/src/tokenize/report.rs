//! Summary of a tokenize run

use serde::Serialize;

use super::edit::VariablePlan;
use crate::tokens::TokenScope;
use crate::variable::PASSWORD_TYPE;

/// Replacement shown instead of password values.
pub const MASK: &str = "******";

/// What happened to one variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariableOutcome {
    /// Variable name.
    pub name: String,
    /// Variable type.
    #[serde(rename = "type")]
    pub var_type: String,
    /// Inline value before tokenizing.
    pub original_value: String,
    /// Value after resolution.
    pub effective_value: String,
    /// Table that supplied the effective value.
    pub scope: Option<TokenScope>,
    /// Whether the value changed.
    pub tokenized: bool,
    /// Whether the variable was moved to lookup indirection.
    pub converted_to_lookup: bool,
    /// Whether the variable was left alone because it had no value.
    pub skipped_empty: bool,
}

impl VariableOutcome {
    /// Returns true for password variables.
    #[must_use]
    pub fn is_password(&self) -> bool {
        self.var_type == PASSWORD_TYPE
    }

    /// Returns a copy safe to log or print: password values are masked.
    #[must_use]
    pub fn masked(&self) -> Self {
        if !self.is_password() {
            return self.clone();
        }
        let mask = |value: &str| {
            if value.is_empty() {
                String::new()
            } else {
                MASK.to_string()
            }
        };
        Self {
            original_value: mask(&self.original_value),
            effective_value: mask(&self.effective_value),
            ..self.clone()
        }
    }
}

impl From<&VariablePlan> for VariableOutcome {
    fn from(plan: &VariablePlan) -> Self {
        Self {
            name: plan.name.clone(),
            var_type: plan.var_type.clone(),
            original_value: plan.original_value.clone(),
            effective_value: plan.resolution.effective_value.clone(),
            scope: plan.resolution.scope,
            tokenized: plan.resolution.was_tokenized,
            converted_to_lookup: plan.converts_to_lookup(),
            skipped_empty: plan.skipped_empty(),
        }
    }
}

/// Per-variable results of a tokenize run, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TokenizeReport {
    /// One entry per variable.
    pub outcomes: Vec<VariableOutcome>,
}

impl TokenizeReport {
    /// Returns the number of variables processed.
    #[must_use]
    pub fn variable_count(&self) -> usize {
        self.outcomes.len()
    }

    /// Returns the number of variables whose value was changed in the document.
    #[must_use]
    pub fn tokenized_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.tokenized && !o.skipped_empty)
            .count()
    }

    /// Returns the number of passwords moved to lookup indirection.
    #[must_use]
    pub fn lookup_conversion_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.converted_to_lookup).count()
    }

    /// Returns the number of variables left alone because they had no value.
    #[must_use]
    pub fn skipped_empty_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.skipped_empty).count()
    }

    /// Returns a copy with every password value masked.
    #[must_use]
    pub fn masked(&self) -> Self {
        Self {
            outcomes: self.outcomes.iter().map(VariableOutcome::masked).collect(),
        }
    }
}
