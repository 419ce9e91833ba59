pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{HeadHunterAdapter, SuperJobAdapter};
pub use app::report::OutputFormat;
pub use config::{toml_config::TomlConfig, Settings};
pub use crate::core::{
    collector::PaginatedCollector,
    engine::{SalaryEngine, SourceTarget},
};
pub use domain::model::{LanguageStats, RunReport, SourceKind, SourceResultSet};
pub use utils::error::{Result, StatsError};
