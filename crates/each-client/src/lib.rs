//! Each Client
//!
//! Async client for the Each flows API: list and fetch flows, trigger them,
//! and poll their executions. Every call is one HTTP round trip; there is no
//! retry, caching or pagination.
//!
//! ```no_run
//! # async fn run() -> each_client::Result<()> {
//! use std::collections::HashMap;
//!
//! let client = each_client::Client::from_env()?;
//! let flows = client.get_flows().await?;
//!
//! let mut input = HashMap::new();
//! input.insert("text".to_string(), serde_json::json!("hello"));
//! let trigger_id = client.trigger_flow(&flows[0].id, &input).await?;
//! let execution = client.get_execution(&flows[0].id, &trigger_id).await?;
//! println!("{}", execution.status);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod error;
mod flows;

pub use client::{Client, API_KEY_HEADER};
pub use config::{
    BackendService, ClientBuilder, ClientConfig, CREDENTIAL_ENV_VAR, DEFAULT_BASE_URL,
    DEFAULT_FLOW_BASE_URL, DEFAULT_USER_AGENT,
};
pub use error::{Error, Result};

/// Re-export the wire types
pub use each_types as types;
