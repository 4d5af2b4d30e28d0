//! Tokenizer engine

use super::edit::{VariablePlan, apply_edits, plan_variable};
use super::report::{TokenizeReport, VariableOutcome};
use crate::error::DomainResult;
use crate::tokens::TokenLayers;
use crate::variable::Profile;

/// Replaces variable values in a profile with tokens from override tables.
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer<'a> {
    layers: &'a TokenLayers,
}

impl<'a> Tokenizer<'a> {
    /// Creates a tokenizer over the given layers.
    #[must_use]
    pub const fn new(layers: &'a TokenLayers) -> Self {
        Self { layers }
    }

    /// Plans every variable of the profile, in document order.
    ///
    /// # Errors
    ///
    /// Returns a schema error for the first variable without a type.
    pub fn plan(&self, profile: &Profile) -> DomainResult<Vec<VariablePlan>> {
        profile
            .variables()
            .iter()
            .map(|variable| plan_variable(variable, self.layers))
            .collect()
    }

    /// Plans and applies the edits for every variable.
    ///
    /// Nothing is modified unless every variable could be planned.
    ///
    /// # Errors
    ///
    /// Returns a schema error for the first variable without a type.
    pub fn tokenize(&self, profile: &mut Profile) -> DomainResult<TokenizeReport> {
        let plans = self.plan(profile)?;

        let (document, _) = profile.parts_mut();
        for plan in &plans {
            apply_edits(document, plan.node, &plan.edits);
        }
        profile.refresh()?;

        Ok(TokenizeReport {
            outcomes: plans.iter().map(VariableOutcome::from).collect(),
        })
    }
}
