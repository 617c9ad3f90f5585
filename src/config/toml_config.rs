use crate::core::ConfigProvider;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{validate_run_settings, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Run settings read from a TOML file. Every key is optional.
///
/// ```toml
/// [source]
/// listing_url = "https://pokeapi.co/api/v2/pokemon?limit=151"
///
/// [fetch]
/// max_concurrent_requests = 32
///
/// [output]
/// root = "./out"
/// entity_dir = "monsters"
/// aggregate_file = "pokedex.json"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub source: SourceConfig,
    pub fetch: FetchConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub listing_url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub max_concurrent_requests: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub root: String,
    pub entity_dir: String,
    pub aggregate_file: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            listing_url: super::DEFAULT_LISTING_URL.to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root: super::DEFAULT_OUTPUT_ROOT.to_string(),
            entity_dir: super::DEFAULT_ENTITY_DIR.to_string(),
            aggregate_file: super::DEFAULT_AGGREGATE_FILE.to_string(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| EtlError::ConfigError {
            message: format!("Cannot read config file {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| EtlError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }
}

impl ConfigProvider for TomlConfig {
    fn listing_url(&self) -> &str {
        &self.source.listing_url
    }

    fn output_root(&self) -> &str {
        &self.output.root
    }

    fn entity_dir(&self) -> &str {
        &self.output.entity_dir
    }

    fn aggregate_file(&self) -> &str {
        &self.output.aggregate_file
    }

    fn max_concurrent_requests(&self) -> Option<usize> {
        self.fetch.max_concurrent_requests
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_run_settings(self)
    }
}
