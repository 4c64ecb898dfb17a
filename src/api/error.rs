use thiserror::Error;

/// Errors raised by the state API client.
///
/// SECURITY: Error messages must NEVER contain the API bearer token.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Authentication failed (missing, invalid or expired token)
    #[error("authentication failed: {message}")]
    Auth { message: String },

    /// API returned an error response
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Network-level error (connection failed, timeout, etc.)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A record the caller asked for by id does not exist
    #[error("not found: {resource}")]
    NotFound { resource: String },

    /// Response body could not be decoded
    #[error("failed to decode response: {message}")]
    Decode { message: String },

    #[error("invalid API url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_display() {
        let err = ApiError::Auth {
            message: "token expired".to_string(),
        };
        assert_eq!(err.to_string(), "authentication failed: token expired");
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::Api {
            status: 500,
            message: "Internal Server Error".to_string(),
        };
        assert_eq!(err.to_string(), "API error (500): Internal Server Error");
    }

    #[test]
    fn test_not_found_display() {
        let err = ApiError::NotFound {
            resource: "job 42 in organization org1".to_string(),
        };
        assert_eq!(err.to_string(), "not found: job 42 in organization org1");
    }

    #[test]
    fn test_invalid_url_from_parse_error() {
        let parse_err = url::Url::parse("not a url").unwrap_err();
        let err: ApiError = parse_err.into();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
        assert!(err.to_string().starts_with("invalid API url"));
    }
}
