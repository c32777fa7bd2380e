use anyhow::Result;
use clap::Parser;

use dexnav::application::commands::{Cli, CommandExecutor};
use dexnav::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let cli = Cli::parse();

    // Load configuration from file if provided, fall back to defaults
    let config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else {
        Config::default()
    };

    CommandExecutor::execute(cli.command, config).await?;

    Ok(())
}
