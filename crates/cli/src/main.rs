mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use smartmark_core::UserId;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "smartmark")]
#[command(about = "Personal bookmark manager with live cross-tab sync", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        #[arg(short, long, default_value = "3000")]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
        /// Keep bookmarks in memory even if SMARTMARK_DATABASE_URL is set
        #[arg(long)]
        memory: bool,
    },
    /// Apply PostgreSQL migrations and exit
    Migrate,
    /// Print a user's bookmarks as JSON
    List {
        #[arg(short, long)]
        user: UserId,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();
    let config = config::Config::from_env();

    match cli.command {
        Commands::Serve { port, host, memory } => {
            commands::serve::run(&config, port, host, memory).await?;
        },
        Commands::Migrate => {
            commands::migrate::run(&config).await?;
        },
        Commands::List { user } => {
            commands::list::run(&config, user).await?;
        },
    }

    Ok(())
}
