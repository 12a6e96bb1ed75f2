//! Vox - voice clip bot
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use vox::cli::{Cli, Commands};
use vox::config::ConfigManager;
use vox::error::VoxResult;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> VoxResult<()> {
    // .env must be loaded before clap reads BOT_TOKEN and friends
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    let config_manager = ConfigManager::resolve(cli.config.clone());
    let config = config_manager.load().await?;

    init_logging(&cli, &config.general.log_format);
    match dotenv {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => debug!("No .env file found, using environment variables"),
        Err(e) => tracing::warn!("Ignoring unreadable .env file: {}", e),
    }

    let cache_path = ConfigManager::cache_path(&config, cli.cache.as_deref());
    debug!("Handle cache: {}", cache_path.display());

    match cli.command {
        Commands::Serve(args) => vox::cli::commands::serve(args, &config, &cache_path).await,
        Commands::Send(args) => vox::cli::commands::send(args, &config, &cache_path).await,
        Commands::Cache(args) => vox::cli::commands::cache(args, &cache_path).await,
        Commands::Config(args) => {
            vox::cli::commands::config(args, &config, &config_manager).await
        }
    }
}

/// Initialize logging; RUST_LOG applies unless -v is given
fn init_logging(cli: &Cli, format: &str) {
    let directive = cli.log_directive();
    let filter = if cli.verbose > 0 {
        EnvFilter::new(directive)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive))
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if format == "json" {
        builder.json().init();
    } else {
        builder.without_time().init();
    }
}
