//! Execution records as returned by the flow service.
//!
//! Non-optional fields decode `null` as their default, like the flow types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{serde_as, DefaultOnNull};

use crate::SUCCESS_STATUS;

/// Outcome of a single step within an execution
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StepResult {
    #[serde_as(as = "DefaultOnNull")]
    pub step_id: String,
    #[serde_as(as = "DefaultOnNull")]
    pub status: String,
    #[serde_as(as = "DefaultOnNull")]
    pub output: String,
}

/// A single triggered run of a flow
#[serde_as]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Execution {
    #[serde_as(as = "DefaultOnNull")]
    pub flow_id: String,
    #[serde_as(as = "DefaultOnNull")]
    pub organization_id: String,
    #[serde_as(as = "DefaultOnNull")]
    pub api_key: String,
    #[serde_as(as = "DefaultOnNull")]
    pub execution_id: String,
    #[serde_as(as = "DefaultOnNull")]
    pub source_ip_address: String,

    /// Inputs the execution was triggered with, exactly as the service echoes them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,

    /// Per-step results in the order the service reports them
    #[serde_as(as = "DefaultOnNull")]
    pub step_results: Vec<StepResult>,
    #[serde_as(as = "DefaultOnNull")]
    pub status: String,
    #[serde_as(as = "DefaultOnNull")]
    pub output: String,
    pub created_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,

    // The service sends these two as free-form strings, not RFC 3339.
    pub updated_at: Option<String>,
    pub deleted_at: Option<String>,
}

impl Execution {
    /// Find the result recorded for a step
    pub fn step_result(&self, step_id: &str) -> Option<&StepResult> {
        self.step_results.iter().find(|r| r.step_id == step_id)
    }
}

/// Envelope returned when listing the executions of a flow
#[serde_as]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionsResponse {
    #[serde_as(as = "DefaultOnNull")]
    pub status: String,
    #[serde_as(as = "DefaultOnNull")]
    pub message: String,
    #[serde_as(as = "DefaultOnNull")]
    pub total: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub executions: Vec<Execution>,
}

impl ExecutionsResponse {
    /// Whether the envelope reports success
    pub fn is_success(&self) -> bool {
        self.status == SUCCESS_STATUS
    }
}
