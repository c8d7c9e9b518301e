//! coolpc-watch - CoolPC parts-pricing watcher CLI.

use anyhow::Result;
use clap::{Parser, Subcommand};
use coolpc_watch::commands::{CheckCommand, SyncCommand};
use coolpc_watch::config::Config;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "coolpc-watch",
    version,
    about = "Watches CoolPC parts pricing and syncs changes into GitHub issues"
)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// GitHub repository holding the tracked issues (owner/name)
    #[arg(long, global = true)]
    repo: Option<String>,

    /// Price page URL
    #[arg(long, global = true)]
    url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synchronize tracked issues with the current price page
    #[command(alias = "s")]
    Sync {
        /// GitHub access token
        #[arg(env = "GITHUB_TOKEN")]
        token: Option<String>,

        /// Local HTML file to use instead of fetching the page
        local_path: Option<PathBuf>,
    },

    /// Print the current items for a criteria without touching any issue
    #[command(alias = "c")]
    Check {
        /// Criteria as `<category>~~~<subcategory>`
        criteria: String,

        /// Local HTML file to use instead of fetching the page
        #[arg(long)]
        local_path: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(repo) = cli.repo {
        config.repo = repo;
    }
    if let Some(url) = cli.url {
        config.source_url = url;
    }

    match cli.command {
        Commands::Sync { token, local_path } => {
            if let Some(token) = token {
                config.token = Some(token);
            }
            if let Some(path) = local_path {
                config.local_path = Some(path);
            }

            let cmd = SyncCommand::new(config);
            let report = cmd.execute().await?;
            println!("{}", report);
        }

        Commands::Check { criteria, local_path } => {
            if let Some(path) = local_path {
                config.local_path = Some(path);
            }

            let cmd = CheckCommand::new(config);
            let output = cmd.execute(&criteria).await?;
            println!("{}", output);
        }
    }

    Ok(())
}
