//! Flow and execution accessors.
//!
//! Only `get_flows` and `get_executions` check the envelope status; the
//! other accessors return whatever decodes. Callers rely on that, so keep it.

use std::collections::HashMap;

use each_types::{
    Execution, ExecutionsResponse, Flow, FlowResponse, FlowsResponse, TriggerFlowResponse,
};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::client::Client;
use crate::config::BackendService;
use crate::error::{Error, Result};

impl Client {
    /// List all flows visible to the API key
    #[instrument(skip(self))]
    pub async fn get_flows(&self) -> Result<Vec<Flow>> {
        let resp: FlowsResponse = self.get_json(BackendService::Flow, "/").await?;

        if !resp.is_success() {
            return Err(Error::Api(resp.message));
        }

        debug!(count = resp.flows.len(), "Fetched flows");
        Ok(resp.flows)
    }

    /// Fetch a flow by ID
    #[instrument(skip(self))]
    pub async fn get_flow(&self, id: &str) -> Result<Flow> {
        let resp: FlowResponse = self
            .get_json(BackendService::Flow, &format!("/{}", id))
            .await?;

        Ok(resp.flow)
    }

    /// Trigger a flow with the given inputs and return the trigger ID
    #[instrument(skip(self, input), fields(inputs = input.len()))]
    pub async fn trigger_flow(&self, id: &str, input: &HashMap<String, Value>) -> Result<String> {
        let resp: TriggerFlowResponse = self
            .post_json(BackendService::Flow, &format!("/{}/trigger", id), input)
            .await?;

        debug!(trigger_id = %resp.trigger_id, "Flow triggered");
        Ok(resp.trigger_id)
    }

    /// List the executions of a flow
    #[instrument(skip(self))]
    pub async fn get_executions(&self, flow_id: &str) -> Result<Vec<Execution>> {
        let resp: ExecutionsResponse = self
            .get_json(BackendService::Flow, &format!("/{}/executions", flow_id))
            .await?;

        if !resp.is_success() {
            return Err(Error::Api(resp.message));
        }

        Ok(resp.executions)
    }

    /// Fetch a single execution. This endpoint returns the bare execution object.
    #[instrument(skip(self))]
    pub async fn get_execution(&self, flow_id: &str, execution_id: &str) -> Result<Execution> {
        self.get_json(
            BackendService::Flow,
            &format!("/{}/executions/{}", flow_id, execution_id),
        )
        .await
    }
}
