//! Each CLI library

use std::collections::HashMap;

use anyhow::{bail, Context, Result};
use each_client::{Client, ClientBuilder};
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::EnvFilter;

// Re-export CLI types for testing
pub use clap::{Args, Parser, Subcommand};

/// Log filter used when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "each_client=info,each_cli=info";

/// Load `.env`, then install a stderr subscriber so stdout stays valid JSON.
///
/// `.env` is read first so a `RUST_LOG` defined there takes effect.
pub fn init_tracing() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(std::io::stderr)
        .init();
}

/// Filter from `RUST_LOG`, falling back to [`DEFAULT_LOG_FILTER`]
pub fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

#[derive(Parser, Debug)]
#[command(name = "each")]
#[command(about = "Inspect and trigger Each flows")]
#[command(version, long_about = None)]
pub struct Cli {
    /// API key; falls back to the EACH_API_KEY environment variable
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Override the inference service base URL
    #[arg(long, global = true, env = "EACH_BASE_URL")]
    pub base_url: Option<String>,

    /// Override the flow service base URL
    #[arg(long, global = true, env = "EACH_FLOW_BASE_URL")]
    pub flow_base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Flow operations
    Flows {
        #[command(subcommand)]
        subcommand: FlowCommands,
    },
    /// Execution operations
    Executions {
        #[command(subcommand)]
        subcommand: ExecutionCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum FlowCommands {
    /// List all flows
    List,
    /// Show a single flow
    Get { id: String },
    /// Trigger a flow and print the trigger ID
    Trigger(TriggerArgs),
}

#[derive(Args, Debug)]
pub struct TriggerArgs {
    /// Flow ID
    pub id: String,

    /// Input as KEY=VALUE; VALUE is parsed as JSON when possible
    #[arg(long = "input", short = 'i')]
    pub inputs: Vec<String>,

    /// Inputs as a JSON object; --input pairs override its keys
    #[arg(long)]
    pub json: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ExecutionCommands {
    /// List the executions of a flow
    List { flow_id: String },
    /// Show a single execution
    Get {
        flow_id: String,
        execution_id: String,
    },
}

impl Cli {
    /// Build a client from the global flags
    pub fn client(&self) -> Result<Client> {
        let mut builder = ClientBuilder::new();
        builder = match &self.api_key {
            Some(key) => builder.credential(key),
            None => builder.credential_from_env(),
        };
        if let Some(url) = &self.base_url {
            builder = builder.base_url(url);
        }
        if let Some(url) = &self.flow_base_url {
            builder = builder.flow_base_url(url);
        }
        Ok(builder.build()?)
    }

    /// Execute the selected command and return what should be printed
    pub async fn run(&self) -> Result<Value> {
        let client = self.client()?;

        let output = match &self.command {
            Commands::Flows { subcommand } => match subcommand {
                FlowCommands::List => serde_json::to_value(client.get_flows().await?)?,
                FlowCommands::Get { id } => serde_json::to_value(client.get_flow(id).await?)?,
                FlowCommands::Trigger(args) => {
                    let input = build_input(args.json.as_deref(), &args.inputs)?;
                    debug!(flow_id = %args.id, inputs = input.len(), "Triggering flow");
                    let trigger_id = client.trigger_flow(&args.id, &input).await?;
                    serde_json::json!({ "trigger_id": trigger_id })
                }
            },
            Commands::Executions { subcommand } => match subcommand {
                ExecutionCommands::List { flow_id } => {
                    serde_json::to_value(client.get_executions(flow_id).await?)?
                }
                ExecutionCommands::Get {
                    flow_id,
                    execution_id,
                } => serde_json::to_value(client.get_execution(flow_id, execution_id).await?)?,
            },
        };

        Ok(output)
    }
}

/// Split `KEY=VALUE`, reading VALUE as JSON and falling back to a string
pub fn parse_input_pair(pair: &str) -> Result<(String, Value)> {
    let (key, raw) = pair
        .split_once('=')
        .with_context(|| format!("invalid input '{}', expected KEY=VALUE", pair))?;

    if key.is_empty() {
        bail!("invalid input '{}', key is empty", pair);
    }

    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

/// Merge a JSON object and `KEY=VALUE` pairs into a trigger input map
pub fn build_input(json: Option<&str>, pairs: &[String]) -> Result<HashMap<String, Value>> {
    let mut input = match json {
        Some(raw) => serde_json::from_str::<HashMap<String, Value>>(raw)
            .context("--json must be a JSON object")?,
        None => HashMap::new(),
    };

    for pair in pairs {
        let (key, value) = parse_input_pair(pair)?;
        input.insert(key, value);
    }

    Ok(input)
}
