//! Configuration loader.

use std::fs;
use std::path::Path;

use regex::Regex;

use crate::error::ConfigError;
use crate::schema::Config;

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load the file at `path`, or defaults when it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::NotFound(_)) => Ok(Config::default()),
            other => other,
        }
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let mut config: Config = toml::from_str(&expanded)?;
        if let Some(dir) = config.logging.dir.take() {
            config.logging.dir = Some(Self::expand_path(&dir));
        }
        Ok(config)
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();
        let re = Regex::new(r"\$\{([^}]+)\}")?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/.orla/logs`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_empty_config() {
        let config = ConfigLoader::load_str("").unwrap();
        assert_eq!(config.content.transition_ms, 300);
        assert_eq!(config.background.content_script, "content.js");
    }

    #[test]
    fn test_load_full_config() {
        let content = r#"
            [content]
            frame_id = "custom-frame"
            sidebar_url = "panel/index.html"
            frame_width_px = 360
            transition_ms = 200

            [background]
            content_script = "dist/content.js"

            [restricted]
            schemes = ["chrome", "file"]
            hosts = []

            [logging]
            level = "debug"
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.content.frame_id, "custom-frame");
        assert_eq!(config.content.frame_width_px, 360);
        assert_eq!(config.background.content_script, "dist/content.js");
        assert_eq!(config.restricted.schemes, vec!["chrome", "file"]);
        assert!(config.restricted.hosts.is_empty());
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[content]").unwrap();
        writeln!(file, "transition_ms = 500").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.content.transition_ms, 500);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load(Path::new("/nonexistent/path/orla.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = ConfigLoader::load_or_default(Path::new("/nonexistent/orla.toml")).unwrap();
        assert_eq!(config.content.storage_key, "sidebarOpen");
    }

    #[test]
    fn test_load_invalid_toml() {
        let result = ConfigLoader::load_str("invalid = [unclosed");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_log_dir_tilde_expanded() {
        let config = ConfigLoader::load_str(
            r#"
            [logging]
            dir = "~/.orla/logs"
            "#,
        )
        .unwrap();
        let dir = config.logging.dir.unwrap();
        assert!(!dir.starts_with('~'));
        assert!(dir.ends_with("/.orla/logs"));
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: This test runs in isolation and sets a unique test-only env var
        unsafe {
            std::env::set_var("ORLA_TEST_SIDEBAR_URL", "build/sidebar.html");
        }
        let content = "[content]\nsidebar_url = \"${ORLA_TEST_SIDEBAR_URL}\"";
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.content.sidebar_url, "build/sidebar.html");
        unsafe {
            std::env::remove_var("ORLA_TEST_SIDEBAR_URL");
        }
    }

    #[test]
    fn test_expand_env_vars_not_set() {
        let content = "value = \"${ORLA_NONEXISTENT_TEST_VAR_12345}\"";
        let result = ConfigLoader::expand_env_vars(content);
        assert!(matches!(result, Err(ConfigError::EnvVarNotSet(_))));
    }

    #[test]
    fn test_expand_env_vars_no_vars() {
        let content = "value = \"no variables here\"";
        let expanded = ConfigLoader::expand_env_vars(content).unwrap();
        assert_eq!(expanded, content);
    }

    #[test]
    fn test_expand_path_no_tilde() {
        let path = "/var/log/orla";
        assert_eq!(ConfigLoader::expand_path(path), path);
    }
}
