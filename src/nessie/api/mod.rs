//! Async HTTP client for the Nessie REST API v1
//!
//! The client wraps a `reqwest::Client` and speaks the API in terms of the
//! types in [`crate::nessie::models`]. Endpoint groups live in their own
//! files: tree operations (references, log, entries, merge/transplant) in
//! [`tree_api`] and contents operations in [`contents_api`].
//!
//! # Authentication
//!
//! A bearer token can be supplied at construction time; it is attached to
//! every request as an `Authorization` header. Without a token, requests
//! are sent unauthenticated, which is sufficient for servers that do not
//! enforce access control.

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use super::models::ModelError;

mod contents_api;
mod tree_api;

/// User-Agent header sent with every request
const USER_AGENT: &str = "nessie-client/0.2.0 (https://github.com/tacogips/nessie-client)";

/// Errors that can occur while talking to a Nessie server
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport-level failure (connect, timeout, body read)
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Nessie API error {status}: {body}")]
    Status {
        /// HTTP status code of the response
        status: StatusCode,
        /// Response body text, as far as it could be read
        body: String,
    },

    /// The configured endpoint is not a valid URL
    #[error("invalid Nessie endpoint URL: {0}")]
    Url(#[from] url::ParseError),

    /// A response payload did not map onto the wire models
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Client for a single Nessie server endpoint
///
/// The client is cheap to clone; clones share the underlying connection
/// pool.
#[derive(Debug, Clone)]
pub struct NessieClient {
    client: Client,
    base_url: Url,
    auth_token: Option<String>,
}

impl NessieClient {
    /// Creates a client for the given API base URL
    ///
    /// `base_url` should point at the versioned API root, e.g.
    /// `http://localhost:19120/api/v1`. A trailing slash is tolerated.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use nessie_client::nessie::api::NessieClient;
    ///
    /// let client = NessieClient::new("http://localhost:19120/api/v1", None).unwrap();
    /// ```
    pub fn new(base_url: &str, auth_token: Option<String>) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))?;
        tracing::debug!("Creating Nessie client for endpoint {}", base_url);

        Ok(NessieClient {
            client: Client::new(),
            base_url,
            auth_token,
        })
    }

    /// Builds the absolute URL for an API path relative to the base URL
    pub(crate) fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    /// Starts a request with the common headers attached
    pub(crate) fn request(&self, method: Method, url: String) -> RequestBuilder {
        let mut req_builder = self
            .client
            .request(method, url)
            .header("User-Agent", USER_AGENT);

        if let Some(token) = &self.auth_token {
            req_builder = req_builder.header("Authorization", format!("Bearer {}", token));
        }

        req_builder
    }

    /// Sends a request and deserializes a successful JSON response
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        req_builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = req_builder.send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Sends a request whose successful response body is ignored
    pub(crate) async fn send_empty(&self, req_builder: RequestBuilder) -> Result<(), ApiError> {
        let response = req_builder.send().await?;
        Self::check_status(response).await?;
        Ok(())
    }

    /// Turns non-success responses into [`ApiError::Status`] with the body
    /// text captured for diagnosis
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        tracing::debug!("Nessie API request failed with {}: {}", status, body);

        Err(ApiError::Status { status, body })
    }
}
