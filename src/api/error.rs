//! Sync Client Errors

/// Result type for remote task operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Remote call failures
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// fetch rejected (offline, CORS, DNS, aborted)
    Network(String),
    /// Request exceeded the configured timeout and was aborted
    Timeout,
    /// Server answered with a non-2xx status
    Status { operation: &'static str, status: u16 },
    Decode(String),
    Encode(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "Network error: {}", msg),
            ApiError::Timeout => write!(f, "Request timed out"),
            ApiError::Status { operation, status } => write!(f, "Failed to {} task(s): HTTP {}", operation, status),
            ApiError::Decode(msg) => write!(f, "Response error: {}", msg),
            ApiError::Encode(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ApiError::Status { operation: "update", status: 404 };
        assert_eq!(err.to_string(), "Failed to update task(s): HTTP 404");
        assert_eq!(ApiError::Timeout.to_string(), "Request timed out");
    }
}
