use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use colored::Colorize;

use crate::client::{WebexClient, DEFAULT_API_URL};
use crate::commands::{self, BatchOptions};
use crate::config::Config;
use crate::error::WxcError;
use crate::prompts;
use crate::report::BatchReport;

#[derive(Parser)]
#[command(name = "wxc")]
#[command(about = "A CLI client for Webex Calling workspace administration", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API base URL (overrides config)
    #[arg(long, env = "WXC_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Access token (overrides the stored token)
    #[arg(long, env = "WEBEX_ACCESS_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List caller ID settings for all workspaces (in an org, if specified)
    ListWorkspaceCallerid {
        /// Webex Calling location name
        #[arg(long)]
        location_name: Option<String>,

        /// Organization ID
        #[arg(long)]
        org_id: Option<String>,
    },

    /// Set a custom caller ID number for workspaces listed in a CSV file
    ///
    /// Expected columns: Extension, CallerID-Number
    UpdateWorkspaceCalleridCsv {
        /// Webex Calling location name
        #[arg(long)]
        location_name: Option<String>,

        /// Organization ID
        #[arg(long)]
        org_id: Option<String>,

        #[command(flatten)]
        batch: BatchArgs,
    },

    /// Create calling-enabled workspaces from a CSV file
    ///
    /// Expected columns: Location, Name, Extension, Direct Dial
    AddWorkspaceCallingCsv {
        /// Organization ID
        #[arg(long)]
        org_id: Option<String>,

        #[command(flatten)]
        batch: BatchArgs,
    },

    /// Authentication commands
    #[command(subcommand)]
    Auth(AuthCommands),

    /// Configuration commands
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Args)]
pub struct BatchArgs {
    /// Path to CSV file
    #[arg(long)]
    pub csvfile: Option<PathBuf>,

    /// Perform lookups only; send no changes
    #[arg(long)]
    pub dry_run: bool,

    /// Stop at the first row that fails
    #[arg(long)]
    pub fail_fast: bool,
}

impl BatchArgs {
    fn options(&self) -> BatchOptions {
        BatchOptions {
            dry_run: self.dry_run,
            fail_fast: self.fail_fast,
        }
    }
}

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Store an access token in the system keyring
    Login {
        /// Access token (prompted for when omitted)
        #[arg(long)]
        with_token: Option<String>,
    },
    /// Logout (remove stored access token)
    Logout,
    /// Show authentication status
    Status,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Set a configuration value
    Set {
        /// Configuration key (e.g., api.url)
        key: String,
        /// Configuration value
        value: String,
    },
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config = Config::load()?;
        let api_url = self
            .api_url
            .or_else(|| config.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let token = self.token;

        match self.command {
            Commands::ListWorkspaceCallerid {
                location_name,
                org_id,
            } => {
                let client = connect(&api_url, token, &config, org_id.as_deref()).await?;
                let rows =
                    commands::list_workspace_caller_ids(&client, location_name.as_deref()).await?;
                println!("{}", "Workspace Info".bold());
                println!("{}", commands::caller_id_table(&rows));
            }
            Commands::UpdateWorkspaceCalleridCsv {
                location_name,
                org_id,
                batch,
            } => {
                let Some(path) = &batch.csvfile else {
                    eprintln!("{} Missing filename", "✗".red());
                    return Ok(());
                };
                let input = open_csv(path)?;
                let client = connect(&api_url, token, &config, org_id.as_deref()).await?;
                let report = commands::update_workspace_caller_ids(
                    &client,
                    input,
                    location_name.as_deref(),
                    batch.options(),
                )
                .await?;
                finish(&report)?;
            }
            Commands::AddWorkspaceCallingCsv { org_id, batch } => {
                let Some(path) = &batch.csvfile else {
                    eprintln!("{} Missing filename", "✗".red());
                    return Ok(());
                };
                let input = open_csv(path)?;
                let client = connect(&api_url, token, &config, org_id.as_deref()).await?;
                let report = commands::add_workspaces(&client, input, batch.options()).await?;
                finish(&report)?;
            }
            Commands::Auth(cmd) => match cmd {
                AuthCommands::Login { with_token } => {
                    let token = match with_token {
                        Some(token) => token,
                        None => prompts::prompt_access_token()?,
                    };
                    config.set_access_token(&token)?;
                    println!("✓ Access token saved successfully");
                }
                AuthCommands::Logout => {
                    config.remove_access_token()?;
                    println!("✓ Access token removed");
                }
                AuthCommands::Status => {
                    let (key, source) = match token {
                        Some(token) => (Some(token), "--token / WEBEX_ACCESS_TOKEN"),
                        None => (config.get_access_token()?, "keyring"),
                    };
                    match key {
                        Some(key) => {
                            println!("✓ Authenticated");
                            println!("  Access token: {} (from {})", mask_token(&key), source);
                            println!("  API URL: {}", api_url);
                        }
                        None => {
                            println!("✗ Not authenticated");
                            println!("  Run 'wxc auth login' to authenticate");
                        }
                    }
                }
            },
            Commands::Config(cmd) => match cmd {
                ConfigCommands::Set { key, value } => {
                    config.set(&key, &value)?;
                    println!("✓ Configuration updated: {} = {}", key, value);
                }
                ConfigCommands::Get { key } => match config.get(&key)? {
                    Some(val) => println!("{}", val),
                    None => println!("Configuration key '{}' not found", key),
                },
            },
        }

        Ok(())
    }
}

async fn connect(
    api_url: &str,
    token: Option<String>,
    config: &Config,
    org_id: Option<&str>,
) -> Result<WebexClient> {
    let token = match token {
        Some(token) => token,
        None => config.get_access_token()?.ok_or(WxcError::MissingToken)?,
    };
    let client = WebexClient::new(api_url, &token).context("Failed to create API client")?;
    commands::scope_to_org(client, org_id).await
}

fn open_csv(path: &Path) -> Result<File> {
    File::open(path).with_context(|| format!("Failed to open CSV file {}", path.display()))
}

/// Show the first 8 and last 4 characters; tokens too short to hide anything are fully masked.
fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 12 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..8].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

fn finish(report: &BatchReport) -> Result<()> {
    println!("\n{}", report);
    if report.has_failures() {
        anyhow::bail!("{} row(s) failed", report.failures());
    }
    Ok(())
}
