//! ghbridge CLI - stdio MCP bridge to the GitHub REST API.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use ghbridge_core::config::Config;
use ghbridge_github::GitHubClient;
use ghbridge_mcp::{McpServer, ToolRegistry};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the GitHub access token.
const TOKEN_ENV: &str = "GITHUB_TOKEN";

#[derive(Parser)]
#[command(name = "ghbridge")]
#[command(author, version, about = "ghbridge - GitHub tools for MCP clients over stdio", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve MCP requests on stdin/stdout (default)
    Serve(ServeArgs),

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Args, Default)]
struct ServeArgs {
    /// GitHub API base URL (for GitHub Enterprise)
    #[arg(long)]
    base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Path to an alternative config file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Get a configuration value
    Get {
        /// Key in `section.field` form, e.g. github.base_url
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Key in `section.field` form, e.g. github.timeout_secs
        key: String,
        value: String,
    },

    /// Print the config file location
    Path,
}

/// Connection settings after merging flags, config file and defaults.
#[derive(Debug, PartialEq)]
struct Settings {
    base_url: String,
    timeout: Duration,
}

impl Settings {
    fn resolve(args: &ServeArgs, config: &Config) -> Self {
        Self {
            base_url: args
                .base_url
                .clone()
                .unwrap_or_else(|| config.base_url().to_string()),
            timeout: args
                .timeout
                .map(Duration::from_secs)
                .unwrap_or_else(|| config.timeout()),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Serve(args)) => serve(args).await,
        Some(Commands::Config { command }) => handle_config(command),
        None => serve(ServeArgs::default()).await,
    }
}

/// Logs go to stderr; stdout is reserved for protocol frames.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let token = require_token(std::env::var(TOKEN_ENV).ok())?;
    let config = load_config(args.config.as_deref())?;
    let settings = Settings::resolve(&args, &config);

    tracing::info!(
        "Using GitHub API at {} (timeout {}s)",
        settings.base_url,
        settings.timeout.as_secs()
    );

    let client = GitHubClient::with_base_url(&settings.base_url, token, settings.timeout)
        .context("Failed to create GitHub client")?;

    McpServer::new(ToolRegistry::new(), Arc::new(client))
        .run()
        .await
        .context("MCP server failed")?;

    Ok(())
}

fn require_token(value: Option<String>) -> anyhow::Result<String> {
    match value {
        Some(token) if !token.trim().is_empty() => Ok(token),
        _ => bail!("{} is not set; export a GitHub access token to start the bridge", TOKEN_ENV),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    config.context("Failed to load configuration")
}

fn handle_config(command: ConfigCommands) -> anyhow::Result<()> {
    match command {
        ConfigCommands::Show => {
            let config = Config::load()?;
            println!("Configuration ({}):", Config::config_path()?.display());
            println!("  github.base_url = {}", config.base_url());
            println!("  github.timeout_secs = {}", config.timeout().as_secs());
        }
        ConfigCommands::Get { key } => {
            let config = Config::load()?;
            match config.get(&key)? {
                Some(value) => println!("{}", value),
                None => println!("{} is not set", key),
            }
        }
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            println!("Set {} = {}", key, value);
        }
        ConfigCommands::Path => {
            println!("{}", Config::config_path()?.display());
        }
    }

    Ok(())
}
