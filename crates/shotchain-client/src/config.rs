//! Client configuration.

use std::time::Duration;

/// Configuration for the video API client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the video-synthesis service
    pub base_url: String,
    /// Model/deployment name sent with each submission
    pub model: String,
    /// Optional API version header value
    pub api_version: Option<String>,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            model: "sora-2".to_string(),
            api_version: None,
            timeout: Duration::from_secs(120),
        }
    }
}

impl ClientConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("VIDEO_API_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            model: std::env::var("VIDEO_API_MODEL").unwrap_or_else(|_| "sora-2".to_string()),
            api_version: std::env::var("VIDEO_API_VERSION").ok(),
            timeout: Duration::from_secs(
                std::env::var("VIDEO_API_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(120),
            ),
        }
    }

    /// Base URL with any trailing slash removed.
    pub fn trimmed_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.model, "sora-2");
        assert_eq!(config.timeout, Duration::from_secs(120));
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = ClientConfig {
            base_url: "https://api.example.com/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.trimmed_base_url(), "https://api.example.com");
    }
}
