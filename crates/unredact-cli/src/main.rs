mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use unredact_config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        cli::Commands::Render(args) => commands::render::handle(args, &config),
        cli::Commands::Predict { document, endpoint } => {
            commands::predict::handle(document, endpoint, &config).await
        }
        cli::Commands::Config => commands::config::handle(cli.config.as_deref(), &config),
    }
}
