#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

pub const DEFAULT_LISTING_URL: &str = "https://pokeapi.co/api/v2/pokemon?limit=10000";
pub const DEFAULT_OUTPUT_ROOT: &str = ".";
pub const DEFAULT_ENTITY_DIR: &str = "monsters";
pub const DEFAULT_AGGREGATE_FILE: &str = "pokedex.json";
