//! Error types for haggle

use thiserror::Error;

/// Main error type for haggle
#[derive(Error, Debug)]
pub enum HaggleError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid configuration value for {key}: {value}")]
    InvalidConfig { key: String, value: String },

    // Catalogue errors
    #[error("Invalid product: {0}")]
    InvalidProduct(String),

    #[error("Product not found: {0}")]
    UnknownProduct(String),

    // Negotiation errors
    #[error("Invalid negotiation state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Scenario task failed: {0}")]
    ScenarioTask(String),

    // General errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for haggle operations
pub type Result<T> = std::result::Result<T, HaggleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = HaggleError::UnknownProduct("durian".to_string());
        assert_eq!(err.to_string(), "Product not found: durian");
    }

    #[test]
    fn test_invalid_config_error() {
        let err = HaggleError::InvalidConfig {
            key: "MAX_ROUNDS".to_string(),
            value: "ten".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid configuration value for MAX_ROUNDS: ten"
        );
    }

    #[test]
    fn test_state_transition_error() {
        let err = HaggleError::InvalidStateTransition {
            from: "ClosedTimeout".to_string(),
            to: "Negotiating".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid negotiation state transition: ClosedTimeout -> Negotiating"
        );
    }

    #[test]
    fn test_error_conversion() {
        fn io_error_function() -> Result<()> {
            std::fs::read_to_string("/nonexistent/catalogue.json")?;
            Ok(())
        }

        let result = io_error_function();
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), HaggleError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        fn parse() -> Result<Vec<u64>> {
            Ok(serde_json::from_str("[1, 2,")?)
        }

        assert!(matches!(parse().unwrap_err(), HaggleError::Json(_)));
    }
}
