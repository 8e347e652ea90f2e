use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;


mod cli;


use cli::{Cli, execute_command, load_config};




#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command {
        Some(command) => execute_command(config, command).await?,
        None => Cli::command().print_help()?,
    }

    Ok(())
}
