/// Connection settings for the state API, injected into the client and the
/// adapter at construction.
#[derive(Clone, PartialEq)]
pub struct ApiConfig {
    api_url: String,
    token: String,
}

impl ApiConfig {
    pub fn new(api_url: impl Into<String>, token: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self {
            api_url,
            token: token.into(),
        }
    }

    /// Base URL without a trailing slash.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_url", &self.api_url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = ApiConfig::new("http://state-api:8080/", "t");
        assert_eq!(config.api_url(), "http://state-api:8080");
    }

    #[test]
    fn test_debug_does_not_expose_token() {
        let config = ApiConfig::new("http://localhost", "very_secret_token");
        let debug_output = format!("{:?}", config);
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("very_secret_token"));
    }
}
