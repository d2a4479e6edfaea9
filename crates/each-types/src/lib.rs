//! Each Types
//!
//! Data-transfer objects for the Each flows API. Everything here is a
//! deserialized snapshot of server-side state; nothing is created or
//! mutated locally.

#![forbid(unsafe_code)]

/// Flow definitions and the flow response envelopes
pub mod flow;

/// Execution records and the execution response envelopes
pub mod execution;

/// Literal status value the API uses to mark a successful envelope.
pub const SUCCESS_STATUS: &str = "success";

/// Re-export key types for convenient usage
pub use execution::{Execution, ExecutionsResponse, StepResult};
pub use flow::{
    Flow, FlowResponse, FlowsResponse, Input, Output, Params, Step, TriggerFlowResponse,
};
