//! Client configuration
//!
//! [`ClientBuilder`] collects options in call order. An option that cannot be
//! satisfied records its message instead of aborting, so [`ClientBuilder::build`]
//! reports every failure at once.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::{Error, Result};

/// Default base URL of the inference service
pub const DEFAULT_BASE_URL: &str = "https://api.eachlabs.ai/v1";

/// Default base URL of the flow service
pub const DEFAULT_FLOW_BASE_URL: &str = "https://flows.eachlabs.ai/api/v1";

/// User agent sent unless overridden
pub const DEFAULT_USER_AGENT: &str = "each/rust";

/// Environment variable read by [`ClientBuilder::credential_from_env`]
pub const CREDENTIAL_ENV_VAR: &str = "EACH_API_KEY";

const MISSING_CREDENTIAL: &str = "missing credential - please provide your API key";

/// Selects which of the two backend services a request targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendService {
    /// Flow and execution management
    Flow,
    /// Model inference
    Inference,
}

impl fmt::Display for BackendService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendService::Flow => write!(f, "flow"),
            BackendService::Inference => write!(f, "inference"),
        }
    }
}

/// Immutable settings shared by every request of a [`Client`]
#[derive(Clone)]
pub struct ClientConfig {
    /// API key sent in the `X-API-Key` header
    pub(crate) credential: String,

    /// Base URL of the inference service
    pub base_url: String,

    /// Base URL of the flow service
    pub flow_base_url: String,

    /// `User-Agent` header value, if any
    pub user_agent: Option<String>,
}

impl ClientConfig {
    /// Base URL for a backend
    pub fn base_url_for(&self, backend: BackendService) -> &str {
        match backend {
            BackendService::Flow => &self.flow_base_url,
            BackendService::Inference => &self.base_url,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            credential: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            flow_base_url: DEFAULT_FLOW_BASE_URL.to_string(),
            user_agent: Some(DEFAULT_USER_AGENT.to_string()),
        }
    }
}

// Keeps the credential out of logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("credential", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("flow_base_url", &self.flow_base_url)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Builder for [`Client`]
#[derive(Debug, Default)]
pub struct ClientBuilder {
    config: ClientConfig,
    http_client: Option<reqwest::Client>,
    errors: Vec<String>,
}

impl ClientBuilder {
    /// Start from the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given API key
    pub fn credential(mut self, credential: impl Into<String>) -> Self {
        self.config.credential = credential.into();
        self
    }

    /// Read the API key from `EACH_API_KEY`
    pub fn credential_from_env(self) -> Self {
        self.credential_from_env_var(CREDENTIAL_ENV_VAR)
    }

    /// Read the API key from the named environment variable.
    ///
    /// An unset or empty variable is recorded as a configuration error
    /// naming the variable.
    pub fn credential_from_env_var(mut self, name: &str) -> Self {
        match std::env::var(name) {
            Ok(value) if !value.is_empty() => self.config.credential = value,
            _ => self.errors.push(format!(
                "missing credential - please provide your {} env var",
                name
            )),
        }
        self
    }

    /// Override the inference service base URL
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Override the flow service base URL
    pub fn flow_base_url(mut self, flow_base_url: impl Into<String>) -> Self {
        self.config.flow_base_url = flow_base_url.into();
        self
    }

    /// Send requests through a preconfigured `reqwest::Client`
    pub fn http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// Override the `User-Agent` header
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(user_agent.into());
        self
    }

    /// Do not send a `User-Agent` header
    pub fn no_user_agent(mut self) -> Self {
        self.config.user_agent = None;
        self
    }

    /// Validate the collected options and create the client
    pub fn build(self) -> Result<Client> {
        if !self.errors.is_empty() {
            return Err(Error::Configuration(self.errors));
        }

        if self.config.credential.is_empty() {
            return Err(Error::Configuration(vec![MISSING_CREDENTIAL.to_string()]));
        }

        let http = self.http_client.unwrap_or_default();
        Ok(Client::from_parts(Arc::new(self.config), http))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_without_credential_fails() {
        let err = ClientBuilder::new().build().unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(err.to_string(), MISSING_CREDENTIAL);
    }

    #[test]
    fn test_empty_credential_literal_fails() {
        let err = ClientBuilder::new().credential("").build().unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_unset_env_var_names_variable() {
        let err = ClientBuilder::new()
            .credential_from_env_var("EACH_CLIENT_TEST_UNSET_KEY")
            .build()
            .unwrap_err();

        assert!(err.is_configuration());
        assert!(err.to_string().contains("EACH_CLIENT_TEST_UNSET_KEY"));
    }

    #[test]
    fn test_empty_env_var_names_variable() {
        std::env::set_var("EACH_CLIENT_TEST_EMPTY_KEY", "");
        let err = ClientBuilder::new()
            .credential_from_env_var("EACH_CLIENT_TEST_EMPTY_KEY")
            .build()
            .unwrap_err();

        assert!(err.to_string().contains("EACH_CLIENT_TEST_EMPTY_KEY"));
    }

    #[test]
    fn test_env_var_credential_is_used() {
        std::env::set_var("EACH_CLIENT_TEST_SET_KEY", "secret");
        let client = ClientBuilder::new()
            .credential_from_env_var("EACH_CLIENT_TEST_SET_KEY")
            .build()
            .unwrap();

        assert_eq!(client.config().credential, "secret");
    }

    #[test]
    fn test_failures_are_aggregated() {
        let err = ClientBuilder::new()
            .credential_from_env_var("EACH_CLIENT_TEST_MISSING_A")
            .credential("literal")
            .credential_from_env_var("EACH_CLIENT_TEST_MISSING_B")
            .build()
            .unwrap_err();

        match &err {
            Error::Configuration(messages) => {
                assert_eq!(messages.len(), 2);
                assert!(messages[0].contains("EACH_CLIENT_TEST_MISSING_A"));
                assert!(messages[1].contains("EACH_CLIENT_TEST_MISSING_B"));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let text = err.to_string();
        assert!(text.contains("EACH_CLIENT_TEST_MISSING_A"));
        assert!(text.contains("EACH_CLIENT_TEST_MISSING_B"));
    }

    #[test]
    fn test_defaults() {
        let client = ClientBuilder::new().credential("key").build().unwrap();
        let config = client.config();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.flow_base_url, DEFAULT_FLOW_BASE_URL);
        assert_eq!(config.user_agent.as_deref(), Some(DEFAULT_USER_AGENT));
    }

    #[test]
    fn test_base_urls_are_independent() {
        let inference_only = ClientBuilder::new()
            .credential("key")
            .base_url("http://inference.local")
            .build()
            .unwrap();
        assert_eq!(
            inference_only.url_for(BackendService::Inference, "/predictions"),
            "http://inference.local/predictions"
        );
        assert_eq!(
            inference_only.url_for(BackendService::Flow, "/"),
            format!("{}/", DEFAULT_FLOW_BASE_URL)
        );

        let flow_only = ClientBuilder::new()
            .credential("key")
            .flow_base_url("http://flows.local")
            .build()
            .unwrap();
        assert_eq!(
            flow_only.url_for(BackendService::Flow, "/abc/trigger"),
            "http://flows.local/abc/trigger"
        );
        assert_eq!(
            flow_only.url_for(BackendService::Inference, "/x"),
            format!("{}/x", DEFAULT_BASE_URL)
        );
    }

    #[test]
    fn test_debug_redacts_credential() {
        let config = ClientConfig {
            credential: "super-secret".to_string(),
            ..ClientConfig::default()
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
    }

    #[test]
    fn test_backend_service_names() {
        assert_eq!(BackendService::Flow.to_string(), "flow");
        assert_eq!(
            serde_json::to_string(&BackendService::Inference).unwrap(),
            "\"inference\""
        );
    }
}
