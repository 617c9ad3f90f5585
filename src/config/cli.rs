use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_run_settings, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "pokedex-etl")]
#[command(about = "Fetch the full Pokémon catalog concurrently and write a sorted pokedex.json")]
pub struct CliConfig {
    #[arg(long, default_value = super::DEFAULT_LISTING_URL)]
    pub listing_url: String,

    /// Directory the entity checkpoints and the aggregate are written under
    #[arg(long, default_value = super::DEFAULT_OUTPUT_ROOT)]
    pub output_root: String,

    #[arg(long, default_value = super::DEFAULT_ENTITY_DIR)]
    pub entity_dir: String,

    #[arg(long, default_value = super::DEFAULT_AGGREGATE_FILE)]
    pub aggregate_file: String,

    /// Cap on in-flight detail requests; unbounded when omitted
    #[arg(long)]
    pub max_concurrent_requests: Option<usize>,

    /// Load settings from a TOML file instead of the flags above
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl ConfigProvider for CliConfig {
    fn listing_url(&self) -> &str {
        &self.listing_url
    }

    fn output_root(&self) -> &str {
        &self.output_root
    }

    fn entity_dir(&self) -> &str {
        &self.entity_dir
    }

    fn aggregate_file(&self) -> &str {
        &self.aggregate_file
    }

    fn max_concurrent_requests(&self) -> Option<usize> {
        self.max_concurrent_requests
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.config {
            validate_path("config", path)?;
        }
        validate_run_settings(self)
    }
}
