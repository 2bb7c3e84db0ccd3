//! Configuration constants and endpoint paths for the Scan2Card API.

use std::time::Duration;

/// Login endpoint, relative to the base URL.
pub const LOGIN_PATH: &str = "/auth/login";

/// OTP verification endpoint for accounts with two-factor enabled.
pub const VERIFY_OTP_PATH: &str = "/auth/verify-otp";

/// Refresh-token exchange endpoint. Always called on the bare transport,
/// never through the retrying API transport.
pub const REFRESH_TOKEN_PATH: &str = "/auth/refresh-token";

/// Connect timeout for HTTP requests.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default timeout for API requests.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fallback error message when the server returns a non-2xx response
/// without a parseable message body.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Client configuration: where the Scan2Card backend lives.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the REST backend, without a trailing slash.
    pub base_url: String,
}

impl ClientConfig {
    /// Create a config for the given base URL. A trailing slash is stripped
    /// so path joining stays predictable.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// Join a relative API path onto the base URL.
    pub fn api_url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url_joins_paths() {
        let config = ClientConfig::new("https://api.scan2card.io");
        assert_eq!(config.api_url("/events"), "https://api.scan2card.io/events");
        assert_eq!(config.api_url("leads"), "https://api.scan2card.io/leads");
    }

    #[test]
    fn test_trailing_slash_stripped() {
        let config = ClientConfig::new("https://api.scan2card.io/");
        assert_eq!(config.api_url("/events"), "https://api.scan2card.io/events");

        let config = ClientConfig::new("http://localhost:3000//");
        assert_eq!(config.base_url, "http://localhost:3000");
    }
}
