//! CLI definitions for Orla.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Orla CLI.
#[derive(Parser)]
#[command(name = "orla")]
#[command(about = "Orla browser assistant: messaging core tools")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/orla.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Click the action icon on a page in the in-memory browser and print
    /// what the sidebar UI receives
    Simulate {
        /// Page URL
        #[arg(long)]
        url: String,

        /// Document title
        #[arg(long, default_value = "")]
        title: String,

        /// Favicon link href
        #[arg(long)]
        favicon: Option<String>,

        /// Body text
        #[arg(long, default_value = "")]
        text: String,
    },

    /// Report whether a URL is off limits for the content script
    CheckUrl {
        /// URL to check
        url: String,
    },

    /// Load and validate the configuration file
    ValidateConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simulate() {
        let cli = Cli::try_parse_from([
            "orla",
            "simulate",
            "--url",
            "https://example.com",
            "--title",
            "Example",
        ])
        .unwrap();
        assert_eq!(cli.config, PathBuf::from("config/orla.toml"));
        match cli.command {
            Commands::Simulate {
                url,
                title,
                favicon,
                text,
            } => {
                assert_eq!(url, "https://example.com");
                assert_eq!(title, "Example");
                assert!(favicon.is_none());
                assert!(text.is_empty());
            }
            _ => panic!("expected simulate"),
        }
    }

    #[test]
    fn test_parse_global_config() {
        let cli = Cli::try_parse_from(["orla", "check-url", "chrome://newtab", "-c", "my.toml"])
            .unwrap();
        assert_eq!(cli.config, PathBuf::from("my.toml"));
        assert!(matches!(cli.command, Commands::CheckUrl { .. }));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["orla"]).is_err());
    }
}
