//! CLI configuration
//!
//! Resolves the instance URL and API key from flags or environment and
//! builds the configured API client.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use n8nctl_client::N8nClient;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the n8n instance
    pub base_url: String,
    /// API key for the instance
    pub api_key: String,
    /// HTTP request timeout
    pub timeout: Duration,
}

impl Config {
    /// Validate and assemble the configuration
    ///
    /// Missing URL or key is fatal before any command runs.
    pub fn new(base_url: Option<String>, api_key: Option<String>, timeout_secs: u64) -> Result<Self> {
        let Some(base_url) = base_url.filter(|v| !v.is_empty()) else {
            bail!("base URL required: set N8N_BASE_URL or pass --base-url");
        };
        let Some(api_key) = api_key.filter(|v| !v.is_empty()) else {
            bail!("API key required: set N8N_API_KEY or pass --api-key");
        };
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            bail!("base URL must start with http:// or https://");
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Build the API client for this configuration
    pub fn client(&self) -> Result<N8nClient> {
        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(N8nClient::with_client(&self.base_url, &self.api_key, http))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_url_is_fatal() {
        assert!(Config::new(None, Some("key".into()), 30).is_err());
    }

    #[test]
    fn test_missing_key_is_fatal() {
        assert!(Config::new(Some("https://n8n.local".into()), None, 30).is_err());
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config =
            Config::new(Some("https://n8n.local/".into()), Some("key".into()), 30).unwrap();
        assert_eq!(config.base_url, "https://n8n.local");
    }

    #[test]
    fn test_rejects_bare_hostname() {
        assert!(Config::new(Some("n8n.local".into()), Some("key".into()), 30).is_err());
    }
}
