//! Error types for Alentejo

use thiserror::Error;

/// The main error type for Alentejo operations
#[derive(Debug, Error)]
pub enum AlentejoError {
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Image error: {0}")]
    ImageError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),
}

impl AlentejoError {
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        AlentejoError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for Alentejo operations
pub type Result<T> = std::result::Result<T, AlentejoError>;

impl From<toml::de::Error> for AlentejoError {
    fn from(err: toml::de::Error) -> Self {
        AlentejoError::TomlParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_message() {
        let err = AlentejoError::invalid_parameter("segments", "must be at least 1");
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'segments': must be at least 1"
        );
    }

    #[test]
    fn test_toml_error_conversion() {
        let err: AlentejoError = toml::from_str::<toml::Value>("= broken")
            .unwrap_err()
            .into();
        assert!(matches!(err, AlentejoError::TomlParseError(_)));
    }
}
