//! Durable storage errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid stored value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_value_error() {
        let err = StorageError::InvalidValue {
            key: "sidebarOpen".to_string(),
            message: "expected boolean".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("sidebarOpen"));
        assert!(display.contains("expected boolean"));
    }

    #[test]
    fn test_serialization_from() {
        let json_err = serde_json::from_str::<bool>("nope").unwrap_err();
        let err = StorageError::from(json_err);
        assert!(err.to_string().starts_with("Serialization error"));
    }
}
