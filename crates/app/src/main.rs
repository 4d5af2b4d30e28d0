//! substvar - Main Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use substvar::cli::{Cli, Command, ReportFormat};
use substvar::{commands, logging};
use substvar_infrastructure::to_json_stable;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = cli.settings().context("Failed to load configuration")?;

    logging::init(logging::filter(
        cli.log_level.as_deref(),
        &settings.log_level,
    ));
    tracing::debug!(?settings, "Configuration loaded");

    match &cli.command {
        Command::Tokenize(args) => {
            let output = commands::tokenize(&settings).await?;
            if args.report == Some(ReportFormat::Json) {
                print!("{}", to_json_stable(&output.report.masked())?);
            }
        }
        Command::ExtractProperties(_) => {
            commands::extract_properties(&settings).await?;
        }
    }

    Ok(())
}
