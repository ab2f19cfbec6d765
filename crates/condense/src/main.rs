mod cli;
mod commands;
mod ingest;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Profile { file, name, full } => {
            commands::profile::run(&file, name.as_deref(), full)
        }
        Commands::Analyze { file, query, json } => commands::analyze::run(&file, &query, json),
        Commands::Auto { file, json } => commands::auto::run(&file, json),
        Commands::Context { file } => commands::context::run(&file),
        Commands::Connection => commands::connection::run(),
        Commands::Version => commands::version::run(),
    }
}
