use anyhow::Result;
use each_cli::{Cli, Parser};

#[tokio::main]
async fn main() -> Result<()> {
    each_cli::init_tracing();

    let cli = Cli::parse();
    let output = cli.run().await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
