//! Subcommand handlers.

use std::path::Path;

use anyhow::{Context, bail};
use orla_config::{Config, ConfigLoader, ConfigValidator};
use orla_protocols::RestrictedUrlPolicy;
use orla_sim::{PageSpec, simulate_icon_click};
use tracing::info;

/// Run the icon-click flow against the in-memory browser and print the
/// report as JSON.
pub(crate) async fn simulate(config: Config, page: PageSpec) -> anyhow::Result<()> {
    info!("Simulating icon click on {}", page.url);
    let report = simulate_icon_click(config, page).await;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Print whether `url` is restricted under the configured policy.
pub(crate) fn check_url(config: &Config, url: &str) -> bool {
    let policy = RestrictedUrlPolicy::new(&config.restricted.schemes, &config.restricted.hosts);
    let restricted = policy.is_restricted(url);
    if restricted {
        println!("restricted: {}", url);
    } else {
        println!("allowed: {}", url);
    }
    restricted
}

/// Load the file at `path` strictly and report validation findings.
pub(crate) fn validate_config(path: &Path) -> anyhow::Result<()> {
    let config = ConfigLoader::load(path)
        .with_context(|| format!("failed to load {}", path.display()))?;
    let result = ConfigValidator::validate(&config)?;

    for warning in &result.warnings {
        println!("warning: {}: {}", warning.path, warning.message);
    }
    for error in &result.errors {
        println!("error: {}: {}", error.path, error.message);
    }

    if !result.is_valid() {
        bail!(
            "{} has {} validation error(s)",
            path.display(),
            result.errors.len()
        );
    }
    println!("{} is valid", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_check_url() {
        let config = Config::default();
        assert!(check_url(&config, "chrome://extensions"));
        assert!(check_url(&config, "not a url"));
        assert!(!check_url(&config, "https://example.com"));
    }

    #[test]
    fn test_validate_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[content]\ntransition_ms = 250\n").unwrap();
        validate_config(file.path()).unwrap();
    }

    #[test]
    fn test_validate_config_rejects_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[content]\ntransition_ms = 0\n").unwrap();
        assert!(validate_config(file.path()).is_err());
    }

    #[test]
    fn test_validate_config_missing_file() {
        let temp = tempfile::tempdir().unwrap();
        assert!(validate_config(&temp.path().join("absent.toml")).is_err());
    }
}
