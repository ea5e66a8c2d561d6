//! carprice CLI - Main Entry Point
//!
//! Loads the dropdown options from the prediction service and submits car
//! details for a price estimate, interactively or from flags.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod client;
mod commands;
mod output;

use commands::{config, form, options, predict, status};

/// carprice - Used-Car Price Predictor
#[derive(Parser)]
#[command(name = "carprice")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Prediction service base URL
    #[arg(long, env = "CARPRICE_API_URL", global = true)]
    api_url: Option<String>,

    /// Config file (default: ~/.carprice/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill in the form interactively
    Form,

    /// Predict a price from flags
    Predict(predict::PredictArgs),

    /// List the dropdown options offered by the service
    Options,

    /// Check the prediction service
    Status,

    /// Manage the config file
    #[command(subcommand)]
    Config(config::ConfigCommands),

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let connect = client::ConnectArgs {
        api_url: cli.api_url.clone(),
        config_path: cli.config.clone(),
        timeout_secs: cli.timeout,
    };
    let client_config = connect.resolve()?;

    match cli.command {
        Commands::Form => {
            let backend = client::connect(client_config)?;
            form::execute(client::new_form(backend)).await?
        }
        Commands::Predict(args) => {
            let backend = client::connect(client_config)?;
            predict::execute(args, client::new_form(backend), cli.format).await?
        }
        Commands::Options => {
            let backend = client::connect(client_config)?;
            options::execute(client::new_form(backend), cli.format).await?
        }
        Commands::Status => {
            let backend = client::connect(client_config)?;
            if !status::execute(backend).await {
                std::process::exit(1);
            }
        }
        Commands::Config(cmd) => config::execute(cmd, &client_config, &connect.config_path())?,
        Commands::Version => {
            println!("carprice v{}", env!("CARGO_PKG_VERSION"));
            println!("Used-car price predictor client");
        }
    }

    Ok(())
}
