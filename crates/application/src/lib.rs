//! Substvar Application - Ports and use cases
//!
//! Ports are the traits the infrastructure layer implements. Use cases
//! orchestrate them around the pure domain types.

pub mod ports;
pub mod use_cases;

pub use use_cases::{
    CommonTokens, ExtractProperties, ExtractPropertiesError, ExtractPropertiesOutput, LoadTokens,
    LoadTokensError, LoadTokensInput, TokenizeProfile, TokenizeProfileError,
    TokenizeProfileOutput,
};
