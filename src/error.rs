// Error types for the static route tool

use thiserror::Error;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("{operation} failed with status {status}: {body}")]
    Api {
        operation: &'static str,
        status: u16,
        body: String,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("No sites returned by the controller")]
    NoSites,

    #[error("Operator input closed")]
    InputClosed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Convert error to user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            AppError::Auth(_) => {
                "ERROR: AUTH_TOKEN login failure, please check token.".to_string()
            }
            AppError::Api { operation, .. } => {
                format!("ERROR: API Call failure when {}! Exiting!", operation)
            }
            AppError::Http(_) => {
                "ERROR: Could not reach the controller. Please check your connection.".to_string()
            }
            AppError::NoSites => "ERROR: The tenant has no sites to match against.".to_string(),
            AppError::InputClosed => "ERROR: Input closed before a valid answer was given.".to_string(),
            AppError::Io(_) => "ERROR: File system error. Check the path and permissions.".to_string(),
            AppError::Serialization(_) => {
                "ERROR: Unexpected data format from the controller.".to_string()
            }
        }
    }

    /// Raw diagnostic to show the operator after the user message, if any
    pub fn raw_payload(&self) -> Option<String> {
        match self {
            AppError::Api { status, body, .. } => Some(format!("status: {}\n{}", status, body)),
            AppError::Http(e) => Some(e.to_string()),
            AppError::Io(e) => Some(e.to_string()),
            _ => None,
        }
    }

    /// Process exit status for a fatal error
    pub fn exit_code(&self) -> u8 {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_carries_raw_payload() {
        let err = AppError::Api {
            operation: "enumerating SITES in tenant",
            status: 403,
            body: r#"{"_error":[{"code":"forbidden"}]}"#.to_string(),
        };
        assert_eq!(
            err.user_message(),
            "ERROR: API Call failure when enumerating SITES in tenant! Exiting!"
        );
        let raw = err.raw_payload().unwrap();
        assert!(raw.starts_with("status: 403"));
        assert!(raw.contains("forbidden"));
    }

    #[test]
    fn test_fatal_errors_exit_non_zero() {
        assert_eq!(AppError::NoSites.exit_code(), 1);
        assert_eq!(AppError::Auth("no tenant".to_string()).exit_code(), 1);
        assert!(AppError::InputClosed.raw_payload().is_none());
    }
}
