//! Cloud Foundry API client.
//!
//! Low-level HTTP client that handles authentication and raw requests.
//! Higher-level operations are implemented via traits on entity types.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Response};
use serde::Serialize;
use url::Url;

use crate::error::{CfError, Result};

const USER_AGENT: &str = concat!("cfapi/", env!("CARGO_PKG_VERSION"));

/// Low-level Cloud Foundry API client.
///
/// Handles authentication and HTTP requests. Entity-specific operations
/// are implemented via the `Get`, `List`, and `Create` traits on model
/// types.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool, so hydrated entities can carry a clone as their
/// back-reference without duplicating connections.
///
/// # Example
///
/// ```no_run
/// use cfapi::CfClient;
///
/// # fn example() -> cfapi::Result<()> {
/// // Create from environment variables
/// let client = CfClient::from_env()?;
///
/// // Or configure manually
/// let client = CfClient::new("bearer-token", "https://api.sys.example.com")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CfClient {
    http: Client,
    base_url: Arc<Url>,
    token: String,
}

impl std::fmt::Debug for CfClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CfClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl CfClient {
    /// Create a client from environment variables.
    ///
    /// Uses `CF_API_TOKEN` for authentication and `CF_API_URL` for the
    /// API endpoint (e.g. `https://api.sys.example.com`).
    ///
    /// # Errors
    ///
    /// Returns an error if either variable is not set.
    pub fn from_env() -> Result<Self> {
        let token = env::var("CF_API_TOKEN").map_err(|_| {
            CfError::ConfigMissing("CF_API_TOKEN environment variable not set".to_string())
        })?;

        let base_url = env::var("CF_API_URL").map_err(|_| {
            CfError::ConfigMissing("CF_API_URL environment variable not set".to_string())
        })?;

        Self::new(&token, &base_url)
    }

    /// Create a new client with the provided token and API endpoint.
    ///
    /// # Arguments
    ///
    /// * `token` - OAuth bearer token for the Cloud Controller
    /// * `base_url` - API endpoint (e.g. `https://api.sys.example.com`)
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(token: &str, base_url: &str) -> Result<Self> {
        // Ensure base URL ends with /
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(CfError::HttpError)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            token: token.to_string(),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Make a GET request.
    ///
    /// `path` may be a server-supplied value such as a `next_url` cursor;
    /// it is requested exactly as given, query string included.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(CfError::HttpError)?;

        Self::check_response(response).await
    }

    /// Make a POST request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await
            .map_err(CfError::HttpError)?;

        Self::check_response(response).await
    }

    /// Make a POST request with no body.
    #[tracing::instrument(skip(self))]
    pub async fn post_empty(&self, path: &str) -> Result<Response> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(CfError::HttpError)?;

        Self::check_response(response).await
    }

    /// Make a PATCH request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn patch<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .patch(url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await
            .map_err(CfError::HttpError)?;

        Self::check_response(response).await
    }

    /// Make a DELETE request.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> Result<Response> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .delete(url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(CfError::HttpError)?;

        Self::check_response(response).await
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        // Handle rate limiting
        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(CfError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        let message = Self::extract_error_message(response, status).await;
        Err(CfError::ApiError {
            message,
            status_code: Some(status.as_u16()),
        })
    }

    /// Extract error message from a failed response.
    ///
    /// Cloud Controller error bodies carry `description` and `error_code`
    /// fields; older endpoints return a bare `error` string.
    async fn extract_error_message(response: Response, status: reqwest::StatusCode) -> String {
        let body = match response.text().await {
            Ok(b) => b,
            Err(_) => return format!("HTTP {status}"),
        };

        if let Ok(json) = serde_json::from_str::<serde_json::Value>(&body) {
            if let Some(msg) = json.get("description").and_then(|m| m.as_str()) {
                return msg.to_string();
            }
            if let Some(err) = json.get("error_code").and_then(|m| m.as_str()) {
                return err.to_string();
            }
            if let Some(err) = json.get("error").and_then(|m| m.as_str()) {
                return err.to_string();
            }
        }

        body
    }
}
