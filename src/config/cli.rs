use crate::config::toml_config::TomlConfig;
use crate::config::AppConfig;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "sector-form")]
#[command(about = "Pick business sectors and submit them to the sector form API")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Base URL of the sector form API")]
    pub api_endpoint: Option<String>,

    #[arg(long, global = true, help = "TOML config file")]
    pub config: Option<String>,

    #[arg(long, global = true, help = "File holding the stored session id")]
    pub storage_path: Option<String>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the selectable sectors as an indented tree
    Sectors,
    /// Show the stored session and its saved values
    Show,
    /// Validate the form and create or update the submission
    Submit {
        #[arg(long)]
        username: Option<String>,

        #[arg(long = "sector", help = "Sector id; repeat for several")]
        sectors: Vec<i64>,

        #[arg(long)]
        agree_terms: bool,
    },
    /// Forget the stored session and reset the form
    Logout,
}

impl CliConfig {
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut config = AppConfig::default();

        if let Some(path) = &self.config {
            tracing::debug!("Loading config file {}", path);
            config = config.merge_file(TomlConfig::from_file(path)?);
        }
        if let Some(endpoint) = &self.api_endpoint {
            config.api_endpoint = endpoint.clone();
        }
        if let Some(path) = &self.storage_path {
            config.storage_path = path.clone();
        }

        Ok(config)
    }
}
