//! Command implementations.

use anyhow::{Context, Result};
use substvar_application::{
    ExtractProperties, ExtractPropertiesOutput, LoadTokens, TokenizeProfile, TokenizeProfileOutput,
};
use substvar_infrastructure::{
    FileProfileRepository, FilePropertiesRepository, ReqwestFetcher, SystemClock, TokioFileSystem,
};
use tracing::info;

use crate::settings::Settings;

/// Loads the token tables and tokenizes the source profile into the target
/// profile.
///
/// # Errors
///
/// Returns an error if a token file or the source profile cannot be read, a
/// variable lacks a type, or the target cannot be written.
pub async fn tokenize(settings: &Settings) -> Result<TokenizeProfileOutput> {
    let fs = TokioFileSystem::new();
    let input = settings
        .tokens_input()
        .context("Invalid common tokens URL")?;

    let layers = LoadTokens::new(FilePropertiesRepository::new(fs), ReqwestFetcher::new(), fs)
        .execute(&input)
        .await?;

    let source = settings.tokenize_source();
    let target = settings.tokenize_target();
    info!(
        source = %source.display(),
        target = %target.display(),
        "Tokenizing profile"
    );

    let output = TokenizeProfile::new(FileProfileRepository::new(fs))
        .execute(&source, &target, &layers)
        .await?;
    Ok(output)
}

/// Flattens the variables of the source profile into a properties file.
///
/// # Errors
///
/// Returns an error if the source profile is missing or malformed, or the
/// output cannot be written.
pub async fn extract_properties(settings: &Settings) -> Result<ExtractPropertiesOutput> {
    let fs = TokioFileSystem::new();
    let source = settings.extract_source();

    let output = ExtractProperties::new(
        FileProfileRepository::new(fs),
        FilePropertiesRepository::new(fs),
        SystemClock::new(),
    )
    .execute(&source, &settings.extract.output_file)
    .await?;
    Ok(output)
}
