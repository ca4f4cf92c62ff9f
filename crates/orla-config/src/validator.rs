//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_content(config, &mut result);
        Self::validate_background(config, &mut result);
        Self::validate_restricted(config, &mut result);
        Self::validate_logging(config, &mut result);

        Ok(result)
    }

    fn validate_content(config: &Config, result: &mut ValidationResult) {
        let content = &config.content;

        if content.frame_id.trim().is_empty() {
            result.add_error(ValidationError::new(
                "content.frame_id",
                "Frame id cannot be empty",
            ));
        }

        if content.sidebar_url.trim().is_empty() {
            result.add_error(ValidationError::new(
                "content.sidebar_url",
                "Sidebar URL cannot be empty",
            ));
        }

        if content.storage_key.trim().is_empty() {
            result.add_error(ValidationError::new(
                "content.storage_key",
                "Storage key cannot be empty",
            ));
        }

        if content.transition_ms == 0 {
            result.add_error(ValidationError::new(
                "content.transition_ms",
                "transition_ms must be greater than 0",
            ));
        } else if content.transition_ms > 2000 {
            result.add_warning(ValidationWarning::new(
                "content.transition_ms",
                "transition_ms is very long (>2000), the sidebar will stay clickable while hiding",
            ));
        }

        if !(200..=1200).contains(&content.frame_width_px) {
            result.add_warning(ValidationWarning::new(
                "content.frame_width_px",
                format!(
                    "Frame width {}px is outside the usual 200-1200px range",
                    content.frame_width_px
                ),
            ));
        }
    }

    fn validate_background(config: &Config, result: &mut ValidationResult) {
        if config.background.content_script.trim().is_empty() {
            result.add_error(ValidationError::new(
                "background.content_script",
                "Content script resource cannot be empty",
            ));
        }
    }

    fn validate_restricted(config: &Config, result: &mut ValidationResult) {
        if config.restricted.schemes.is_empty() {
            result.add_error(ValidationError::new(
                "restricted.schemes",
                "At least one restricted scheme is required",
            ));
        }

        for scheme in &config.restricted.schemes {
            if scheme.contains("://") {
                result.add_error(ValidationError::new(
                    "restricted.schemes",
                    format!("Scheme '{}' must not include '://'", scheme),
                ));
            }
        }

        for scheme in ["chrome", "file"] {
            if !config.restricted.schemes.iter().any(|s| s == scheme) {
                result.add_warning(ValidationWarning::new(
                    "restricted.schemes",
                    format!("'{}' is not restricted; injection there will fail at runtime", scheme),
                ));
            }
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        let level = config.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            result.add_error(ValidationError::new(
                "logging.level",
                format!(
                    "Unknown log level '{}', valid values: {:?}",
                    config.logging.level, LOG_LEVELS
                ),
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
