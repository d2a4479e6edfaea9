//! Flow definitions as returned by the flow service.
//!
//! The service sends `null` for empty collections and strings, so every
//! non-optional field decodes `null` as its default.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

use crate::SUCCESS_STATUS;

/// Declared input of a flow
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Input {
    /// Input name, used as the key when triggering the flow
    #[serde_as(as = "DefaultOnNull")]
    pub name: String,

    /// Declared type of the input (e.g. "text", "image")
    #[serde(rename = "type")]
    #[serde_as(as = "DefaultOnNull")]
    pub kind: String,

    /// Value used when the trigger omits this input
    #[serde_as(as = "DefaultOnNull")]
    pub default_value: String,
}

/// Declared output of a flow
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Output {
    /// Output name
    #[serde_as(as = "DefaultOnNull")]
    pub name: String,

    /// Declared type of the output
    #[serde(rename = "type")]
    #[serde_as(as = "DefaultOnNull")]
    pub kind: String,

    /// Output value or expression
    #[serde_as(as = "DefaultOnNull")]
    pub value: String,
}

/// Invocation parameters of a step
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    #[serde_as(as = "DefaultOnNull")]
    pub api_key: String,
    #[serde_as(as = "DefaultOnNull")]
    pub model: String,
    #[serde_as(as = "DefaultOnNull")]
    pub system_prompt: String,
    #[serde_as(as = "DefaultOnNull")]
    pub user_prompt: String,
}

/// One unit within a flow, referencing a model
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Step {
    /// Step identifier, unique within the flow
    #[serde_as(as = "DefaultOnNull")]
    pub id: String,

    /// Display name
    #[serde_as(as = "DefaultOnNull")]
    pub name: String,

    /// Step type
    #[serde(rename = "type")]
    #[serde_as(as = "DefaultOnNull")]
    pub kind: String,

    /// Slug of the model this step invokes
    #[serde_as(as = "DefaultOnNull")]
    pub model_slug: String,

    /// Version of the model this step invokes
    #[serde_as(as = "DefaultOnNull")]
    pub model_version: String,

    /// Parameters passed to the model
    #[serde_as(as = "DefaultOnNull")]
    pub params: Params,
}

/// A named automation composed of ordered steps
#[serde_as]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Flow {
    #[serde_as(as = "DefaultOnNull")]
    pub workspace_id: String,
    #[serde_as(as = "DefaultOnNull")]
    pub user_id: String,
    #[serde_as(as = "DefaultOnNull")]
    pub id: String,
    #[serde_as(as = "DefaultOnNull")]
    pub name: String,
    #[serde_as(as = "DefaultOnNull")]
    pub description: String,
    #[serde_as(as = "DefaultOnNull")]
    pub thumbnail_url: String,
    #[serde_as(as = "DefaultOnNull")]
    pub status: String,
    #[serde_as(as = "DefaultOnNull")]
    pub inputs: Vec<Input>,
    #[serde_as(as = "DefaultOnNull")]
    pub outputs: Vec<Output>,

    /// Steps in execution order
    #[serde_as(as = "DefaultOnNull")]
    pub steps: Vec<Step>,
    #[serde_as(as = "DefaultOnNull")]
    pub verified: bool,
    #[serde_as(as = "DefaultOnNull")]
    pub trigger_count: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub popularity: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub last_updated_by: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Flow {
    /// Find a step by its identifier
    pub fn step(&self, id: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.id == id)
    }

    /// Find a declared input by name
    pub fn input(&self, name: &str) -> Option<&Input> {
        self.inputs.iter().find(|i| i.name == name)
    }
}

/// Envelope returned when listing flows
#[serde_as]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowsResponse {
    #[serde_as(as = "DefaultOnNull")]
    pub flows: Vec<Flow>,
    #[serde_as(as = "DefaultOnNull")]
    pub message: String,
    #[serde_as(as = "DefaultOnNull")]
    pub status: String,
    #[serde_as(as = "DefaultOnNull")]
    pub total: i64,
}

impl FlowsResponse {
    /// Whether the envelope reports success
    pub fn is_success(&self) -> bool {
        self.status == SUCCESS_STATUS
    }
}

/// Envelope returned when fetching a single flow
#[serde_as]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowResponse {
    #[serde(rename = "workflow")]
    #[serde_as(as = "DefaultOnNull")]
    pub flow: Flow,
    #[serde_as(as = "DefaultOnNull")]
    pub message: String,
    #[serde_as(as = "DefaultOnNull")]
    pub status: String,
}

impl FlowResponse {
    /// Whether the envelope reports success
    pub fn is_success(&self) -> bool {
        self.status == SUCCESS_STATUS
    }
}

/// Envelope returned when triggering a flow
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerFlowResponse {
    #[serde_as(as = "DefaultOnNull")]
    pub message: String,
    #[serde_as(as = "DefaultOnNull")]
    pub status: String,

    /// Identifier of the execution started by the trigger
    #[serde_as(as = "DefaultOnNull")]
    pub trigger_id: String,
}

impl TriggerFlowResponse {
    /// Whether the envelope reports success
    pub fn is_success(&self) -> bool {
        self.status == SUCCESS_STATUS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_flow_from_wire() {
        let flow: Flow = serde_json::from_value(json!({
            "workspace_id": "ws-1",
            "user_id": "user-1",
            "id": "flow-1",
            "name": "Summarize",
            "description": "Summarizes text",
            "status": "active",
            "inputs": [{"name": "text", "type": "text", "default_value": ""}],
            "outputs": [{"name": "summary", "type": "text", "value": "{{step-1.output}}"}],
            "steps": [{
                "id": "step-1",
                "name": "LLM",
                "type": "model",
                "model_slug": "gpt-4o",
                "model_version": "0.0.1",
                "params": {"model": "gpt-4o", "user_prompt": "{{inputs.text}}"}
            }],
            "verified": true,
            "trigger_count": 12,
            "popularity": 3,
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-02T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(flow.id, "flow-1");
        assert_eq!(flow.inputs[0].kind, "text");
        assert_eq!(flow.steps[0].params.user_prompt, "{{inputs.text}}");
        assert_eq!(flow.steps[0].params.api_key, "");
        assert_eq!(flow.thumbnail_url, "");
        assert_eq!(flow.trigger_count, 12);
        assert_eq!(
            flow.created_at.map(|t| t.to_rfc3339()),
            Some("2024-05-01T10:00:00+00:00".to_string())
        );
        assert!(flow.step("step-1").is_some());
        assert!(flow.step("step-2").is_none());
        assert_eq!(flow.input("text").map(|i| i.kind.as_str()), Some("text"));
    }

    #[test]
    fn test_flow_response_reads_workflow_key() {
        let resp: FlowResponse = serde_json::from_value(json!({
            "status": "success",
            "message": "",
            "workflow": {"id": "flow-9", "name": "Nine"}
        }))
        .unwrap();

        assert!(resp.is_success());
        assert_eq!(resp.flow.id, "flow-9");
        assert_eq!(resp.flow.name, "Nine");
    }

    #[test]
    fn test_envelope_status() {
        let ok: FlowsResponse = serde_json::from_value(json!({"status": "success"})).unwrap();
        let failed: FlowsResponse =
            serde_json::from_value(json!({"status": "error", "message": "boom"})).unwrap();

        assert!(ok.is_success());
        assert!(ok.flows.is_empty());
        assert!(!failed.is_success());
        assert_eq!(failed.message, "boom");
    }

    #[test]
    fn test_null_timestamps_are_tolerated() {
        let flow: Flow =
            serde_json::from_value(json!({"id": "f", "created_at": null})).unwrap();
        assert_eq!(flow.created_at, None);
        assert_eq!(flow.updated_at, None);
    }

    #[test]
    fn test_null_fields_decode_as_defaults() {
        let resp: FlowsResponse = serde_json::from_value(json!({
            "status": "success",
            "message": null,
            "total": null,
            "flows": [{
                "id": "f1",
                "inputs": null,
                "outputs": null,
                "steps": [{"id": "s1", "name": null, "params": null}],
                "thumbnail_url": null,
                "verified": null,
                "trigger_count": null
            }]
        }))
        .unwrap();

        assert!(resp.is_success());
        assert_eq!(resp.message, "");
        assert_eq!(resp.total, 0);

        let flow = &resp.flows[0];
        assert_eq!(flow.id, "f1");
        assert!(flow.inputs.is_empty());
        assert!(flow.outputs.is_empty());
        assert_eq!(flow.thumbnail_url, "");
        assert!(!flow.verified);
        assert_eq!(flow.trigger_count, 0);
        assert_eq!(flow.steps[0].name, "");
        assert_eq!(flow.steps[0].params, Params::default());
    }

    #[test]
    fn test_null_flow_and_trigger_envelopes() {
        let resp: FlowResponse = serde_json::from_value(json!({
            "status": null,
            "message": null,
            "workflow": null
        }))
        .unwrap();
        assert_eq!(resp.flow, Flow::default());
        assert!(!resp.is_success());

        let trigger: TriggerFlowResponse =
            serde_json::from_value(json!({"status": "success", "message": null, "trigger_id": null}))
                .unwrap();
        assert_eq!(trigger.trigger_id, "");
    }
}
