//! Error types for Restaker
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur in Restaker
#[derive(Debug, Error)]
pub enum RestakerError {
    /// A requested network name matches no configured network
    #[error("Unknown network: {0}")]
    UnknownNetwork(String),

    /// Configuration is missing or invalid
    #[error("Config error: {0}")]
    Config(String),

    /// Runner construction or execution error
    #[error("Runner error: {0}")]
    Runner(String),

    /// Health report delivery error
    #[error("Health check error: {0}")]
    Health(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML config parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for Restaker operations
pub type Result<T> = std::result::Result<T, RestakerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_network_error() {
        let err = RestakerError::UnknownNetwork("osmosis".to_string());
        assert_eq!(err.to_string(), "Unknown network: osmosis");
    }

    #[test]
    fn test_config_error() {
        let err = RestakerError::Config("no networks configured".to_string());
        assert_eq!(err.to_string(), "Config error: no networks configured");
    }

    #[test]
    fn test_runner_error() {
        let err = RestakerError::Runner("rpc timeout".to_string());
        assert_eq!(err.to_string(), "Runner error: rpc timeout");
    }

    #[test]
    fn test_health_error() {
        let err = RestakerError::Health("ping rejected".to_string());
        assert_eq!(err.to_string(), "Health check error: ping rejected");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: RestakerError = io_err.into();
        assert!(matches!(err, RestakerError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>("[").unwrap_err();
        let err: RestakerError = yaml_err.into();
        assert!(matches!(err, RestakerError::Yaml(_)));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_ok() -> Result<i32> {
            Ok(42)
        }

        fn returns_err() -> Result<i32> {
            Err(RestakerError::Config("test".to_string()))
        }

        assert!(returns_ok().is_ok());
        assert!(returns_err().is_err());
    }
}
