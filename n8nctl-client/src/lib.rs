//! n8n HTTP Client
//!
//! A thin, type-safe wrapper around the n8n public REST API
//! (`{base_url}/api/v1`). One async method per endpoint, grouped by
//! resource; all calls carry the `X-N8N-API-KEY` header and decode JSON
//! responses. No retries, no caching: every call maps to exactly one HTTP
//! request.
//!
//! # Example
//!
//! ```no_run
//! use n8nctl_client::N8nClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = N8nClient::from_env()?;
//!
//!     let page = client.list_workflows(&Default::default()).await?;
//!     for workflow in page.data {
//!         println!("{}", workflow.name);
//!     }
//!     Ok(())
//! }
//! ```

mod admin;
mod credentials;
pub mod error;
mod executions;
mod pagination;
mod tags;
mod workflows;

pub use admin::AuditOptions;
pub use error::{ClientError, Result};
pub use executions::ExecutionListParams;
pub use pagination::{MAX_PAGES, Page, collect_pages};
pub use workflows::WorkflowListParams;

// Re-export commonly used domain types
pub use n8nctl_core::domain::{Execution, Workflow};

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Environment variable holding the instance base URL
pub const BASE_URL_ENV: &str = "N8N_BASE_URL";
/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "N8N_API_KEY";
/// Header carrying the API key on every request
pub const API_KEY_HEADER: &str = "X-N8N-API-KEY";

/// HTTP client for the n8n public API
///
/// Methods are organized by resource:
/// - Workflows (list, get, create, update, delete, activate, run, ...)
/// - Executions (list, get, delete, retry)
/// - Tags, credentials, users, audit, variables, projects
#[derive(Debug, Clone)]
pub struct N8nClient {
    /// Base URL of the instance (e.g. "https://acme.app.n8n.cloud")
    base_url: String,
    /// API key sent with every request
    api_key: String,
    /// HTTP client instance
    http: Client,
}

impl N8nClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - Instance base URL; trailing slashes are trimmed
    /// * `api_key` - API key for the `X-N8N-API-KEY` header
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            http: Client::new(),
        }
    }

    /// Create a client with a custom HTTP client
    ///
    /// This allows configuring timeouts, proxies, TLS settings, etc.
    pub fn with_client(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        http: Client,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            http,
        }
    }

    /// Create a client from the `N8N_BASE_URL` and `N8N_API_KEY` environment
    /// variables
    ///
    /// # Errors
    /// Returns [`ClientError::Config`] if either variable is missing or
    /// empty.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                ClientError::Config(format!("{} environment variable not set", BASE_URL_ENV))
            })?;
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                ClientError::Config(format!("{} environment variable not set", API_KEY_ENV))
            })?;
        Ok(Self::new(base_url, api_key))
    }

    /// Get the base URL of the instance
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Request Plumbing
    // =============================================================================

    /// Start an authenticated request against an `/api/v1` path
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/api/v1{}", self.base_url, path);
        debug!(%method, %url, "dispatching API request");
        self.http
            .request(method, url)
            .header(API_KEY_HEADER, &self.api_key)
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.request(Method::GET, path)
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.request(Method::POST, path)
    }

    pub(crate) fn put(&self, path: &str) -> RequestBuilder {
        self.request(Method::PUT, path)
    }

    pub(crate) fn delete(&self, path: &str) -> RequestBuilder {
        self.request(Method::DELETE, path)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// Non-2xx statuses become [`ClientError::Api`] carrying the status code
    /// and the response body verbatim.
    pub(crate) async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Parse(format!("failed to parse JSON response: {}", e)))
    }

    /// Handle an API response whose body is irrelevant (e.g. DELETE)
    pub(crate) async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(())
    }
}
