//! Application use cases (business logic orchestration).

mod extract_properties;
mod load_tokens;
mod tokenize_profile;

#[cfg(test)]
mod testing;

pub use extract_properties::{
    EXTRACT_HEADER, ExtractProperties, ExtractPropertiesError, ExtractPropertiesOutput,
};
pub use load_tokens::{CommonTokens, LoadTokens, LoadTokensError, LoadTokensInput};
pub use tokenize_profile::{TokenizeProfile, TokenizeProfileError, TokenizeProfileOutput};
