//! Shared HTTP plumbing for backend calls.
//!
//! One `reqwest::Client` is built lazily and shared by every [`ApiClient`]
//! for connection pooling. The client attaches bearer authorization when a
//! token is present and normalizes failures into [`ApiError`].

use std::time::Duration;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use reqwest::{Client, RequestBuilder, Response, StatusCode};

use crate::error::{ApiError, ApiResult, extract_error_message};

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

static HTTP_CLIENT: OnceCell<Client> = OnceCell::new();

fn shared_client() -> Result<&'static Client> {
    HTTP_CLIENT.get_or_try_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")
    })
}

/// A configured connection to the backend: base URL plus the injected auth
/// context. Cheap to clone; all instances share one pooled client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    access_token: Option<String>,
}

impl ApiClient {
    /// Create a client for the given base URL with an optional bearer token.
    pub fn new(base_url: impl Into<String>, access_token: Option<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            http: shared_client()?.clone(),
            base_url,
            access_token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.authorize(self.http.get(self.url(path)))
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.authorize(self.http.post(self.url(path)))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.access_token {
            Some(token) => request.header("Authorization", format!("Bearer {token}")),
            None => request,
        }
    }
}

/// Send a request and check its status, mapping failures into [`ApiError`].
pub(crate) async fn send(request: RequestBuilder) -> ApiResult<Response> {
    let response = request.send().await.map_err(ApiError::from_transport)?;
    check_status(response).await
}

/// Map a non-success status into the error taxonomy, extracting a
/// human-readable message from the body.
async fn check_status(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(ApiError::Auth { status });
    }

    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status,
        message: extract_error_message(status, &body),
    })
}

/// Read the response body and decode it as JSON.
pub(crate) async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> ApiResult<T> {
    let body = response.text().await.map_err(ApiError::from_transport)?;
    serde_json::from_str(&body).map_err(ApiError::Decode)
}
