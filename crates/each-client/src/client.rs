//! Authenticated request construction and execution

use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{BackendService, ClientBuilder, ClientConfig};
use crate::error::{Error, Result};

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Client for the Each flow and inference services.
///
/// Cloning is cheap; clones share configuration and the underlying
/// connection pool.
#[derive(Debug, Clone)]
pub struct Client {
    config: Arc<ClientConfig>,
    http: reqwest::Client,
}

impl Client {
    /// Start configuring a client
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Client with default URLs and the given API key
    pub fn new(credential: impl Into<String>) -> Result<Self> {
        ClientBuilder::new().credential(credential).build()
    }

    /// Client with default URLs and the API key from `EACH_API_KEY`
    pub fn from_env() -> Result<Self> {
        ClientBuilder::new().credential_from_env().build()
    }

    pub(crate) fn from_parts(config: Arc<ClientConfig>, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    /// Active configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Full URL of `path` on the given backend
    pub fn url_for(&self, backend: BackendService, path: &str) -> String {
        format!("{}{}", self.config.base_url_for(backend), path)
    }

    fn request(&self, backend: BackendService, method: Method, path: &str) -> RequestBuilder {
        let url = self.url_for(backend, path);
        debug!(%backend, %method, %url, "Dispatching request");

        let mut request = self
            .http
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, &self.config.credential);

        if let Some(user_agent) = &self.config.user_agent {
            request = request.header(USER_AGENT, user_agent);
        }

        request
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await.map_err(|e| {
            warn!("Request failed: {}", e);
            Error::Transport(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Request rejected");
            return Err(Error::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| {
            warn!("Failed to decode response body: {}", e);
            Error::Decode(e)
        })
    }

    /// GET `path` on a backend and decode the JSON response
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        backend: BackendService,
        path: &str,
    ) -> Result<T> {
        let request = self.request(backend, Method::GET, path);
        self.execute(request).await
    }

    /// POST `body` as JSON to `path` on a backend and decode the JSON response
    pub async fn post_json<B, T>(&self, backend: BackendService, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let payload = serde_json::to_vec(body)?;
        let request = self.request(backend, Method::POST, path).body(payload);
        self.execute(request).await
    }
}
