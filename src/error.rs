use thiserror::Error;

/// Error types for the robustfit-rs library.
#[derive(Error, Debug)]
pub enum RobustFitError {
    /// A caller contract violation: negative derivative order, mismatched
    /// lengths, a retained count outside `[1, n]`, and similar.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Generic error for cases that don't fit the other categories.
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for robustfit-rs operations.
pub type Result<T> = std::result::Result<T, RobustFitError>;

/// Extensions for converting from other error types.
impl From<String> for RobustFitError {
    fn from(s: String) -> Self {
        RobustFitError::Other(s)
    }
}

impl From<&str> for RobustFitError {
    fn from(s: &str) -> Self {
        RobustFitError::Other(s.to_string())
    }
}

impl RobustFitError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        RobustFitError::InvalidArgument(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RobustFitError::InvalidArgument("negative derivative order -1".to_string());
        assert!(format!("{}", err).contains("negative derivative order -1"));
        assert!(format!("{}", err).starts_with("Invalid argument"));
    }

    #[test]
    fn test_error_conversion() {
        let json_err = serde_json::from_str::<f64>("not a number").unwrap_err();
        let err: RobustFitError = json_err.into();

        match err {
            RobustFitError::JsonError(_) => (),
            _ => panic!("Expected JsonError variant"),
        }

        let str_err: RobustFitError = "test error".into();
        match str_err {
            RobustFitError::Other(s) => assert_eq!(s, "test error"),
            _ => panic!("Expected Other variant"),
        }
    }
}
