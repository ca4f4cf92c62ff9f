//! Orla - browser assistant messaging core
//!
//! Command-line entry point: simulate flows against the in-memory browser,
//! check URLs against the restricted policy and validate configuration.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use orla_config::ConfigLoader;
use orla_sim::PageSpec;
use tracing::debug;

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = ConfigLoader::load_or_default(&cli.config)?;
    logging::init_tracing(&config.logging)?;
    debug!("Configuration from {}", cli.config.display());

    match cli.command {
        Commands::Simulate {
            url,
            title,
            favicon,
            text,
        } => {
            let mut page = PageSpec::new(url, title).with_text(text);
            if let Some(href) = favicon {
                page = page.with_favicon(href);
            }
            commands::simulate(config, page).await
        }
        Commands::CheckUrl { url } => {
            if commands::check_url(&config, &url) {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::ValidateConfig => commands::validate_config(&cli.config),
    }
}
