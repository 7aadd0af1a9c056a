use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use glidescroll_core::AppConfig;

mod commands;
mod frames;

use commands::{AnimateArgs, ToElementArgs};

#[derive(Parser)]
#[command(name = "glidescroll")]
#[command(author, version, about = "Smooth, interruptible scrolling on a virtual page")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Animate the page to a numeric scroll position
    Animate(AnimateArgs),
    /// Scroll the page to a child element, following it if content grows
    ToElement(ToElementArgs),
    /// Print the effective configuration
    Config {
        /// Write the default configuration file
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Handle commands
    match cli.command {
        Commands::Animate(args) => commands::animate::run(&config, args).await,
        Commands::ToElement(args) => commands::to_element::run(&config, args).await,
        Commands::Config { init } => commands::config::run(&config, init),
    }
}
