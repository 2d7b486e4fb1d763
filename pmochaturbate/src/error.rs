//! Error types for the Chaturbate resolver

/// Result type alias for Chaturbate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving a Chaturbate channel
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport failure, timeout or any error signalled by the HTTP client
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The API answered with a non-2xx status
    #[error("API returned status: {0}")]
    UnexpectedStatus(reqwest::StatusCode),

    /// The API body is not JSON or does not match the expected shape
    #[error("Invalid response shape: {0}")]
    InvalidResponseShape(#[from] serde_json::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Empty or otherwise unusable channel identifier
    #[error("Invalid channel identifier: {0:?}")]
    InvalidChannel(String),

    /// The page URL is not a Chaturbate channel URL
    #[error("URL is not a Chaturbate channel: {0}")]
    UnsupportedUrl(String),

    /// The variant playlist could not be fetched or decoded
    #[error("Playlist error: {0}")]
    Playlist(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Create a playlist error
    pub fn playlist(msg: impl Into<String>) -> Self {
        Self::Playlist(msg.into())
    }

    /// True for transport failures and non-success HTTP statuses.
    ///
    /// Timeouts raised by the underlying `reqwest::Client` land here too.
    pub fn is_request_failed(&self) -> bool {
        matches!(self, Self::RequestFailed(_) | Self::UnexpectedStatus(_))
    }

    /// True when the API answered but the body could not be validated.
    pub fn is_invalid_response(&self) -> bool {
        matches!(self, Self::InvalidResponseShape(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_is_request_failure() {
        let err = Error::UnexpectedStatus(reqwest::StatusCode::FORBIDDEN);
        assert!(err.is_request_failed());
        assert!(!err.is_invalid_response());
        assert_eq!(err.to_string(), "API returned status: 403 Forbidden");
    }

    #[test]
    fn test_json_is_invalid_response() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = Error::from(json_err);
        assert!(err.is_invalid_response());
        assert!(!err.is_request_failed());
    }

    #[test]
    fn test_other_errors_are_neither_class() {
        let err = Error::InvalidChannel(String::new());
        assert!(!err.is_request_failed());
        assert!(!err.is_invalid_response());
    }
}
