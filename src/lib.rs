pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{HttpTransport, LocalStorage};
pub use self::core::{etl::EtlEngine, pipeline::PokedexPipeline};
pub use domain::model::{Entity, ListingEntry, StatEntry};
pub use utils::error::{EtlError, Result};
