use thiserror::Error;

/// Application-wide error types for scout.
#[derive(Error, Debug)]
pub enum AppError {
    /// The upstream request could not be completed (network, DNS, TLS).
    #[error("Transport error: {0}")]
    TransportError(String),

    /// The upstream answered, but the payload or status encodes an error.
    #[error("Upstream error: {0}")]
    UpstreamError(String),

    /// The export destination could not be created or written.
    #[error("Export error: {0}")]
    ExportError(String),

    /// Search criteria could not be constructed.
    #[error("Invalid search criteria: {0}")]
    InvalidCriteria(String),

    /// Missing or invalid configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// JSON serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl AppError {
    /// Returns true if this error means the search itself failed.
    ///
    /// Transport and upstream errors are reported to the user as a single
    /// "search failed" outcome.
    pub fn is_search_failure(&self) -> bool {
        matches!(
            self,
            AppError::TransportError(_) | AppError::UpstreamError(_)
        )
    }

    /// The human-readable message without the error-kind prefix.
    pub fn message(&self) -> String {
        match self {
            AppError::TransportError(msg)
            | AppError::UpstreamError(msg)
            | AppError::ExportError(msg)
            | AppError::InvalidCriteria(msg)
            | AppError::ConfigError(msg) => msg.clone(),
            AppError::SerializationError(e) => e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_failures() {
        assert!(AppError::TransportError("dns".into()).is_search_failure());
        assert!(AppError::UpstreamError("quota exceeded".into()).is_search_failure());
        assert!(!AppError::ExportError("disk full".into()).is_search_failure());
        assert!(!AppError::ConfigError("no key".into()).is_search_failure());
    }

    #[test]
    fn test_message_strips_prefix() {
        let err = AppError::UpstreamError("quota exceeded".into());
        assert_eq!(err.message(), "quota exceeded");
        assert_eq!(err.to_string(), "Upstream error: quota exceeded");
    }
}
