pub mod toml_config;

use crate::adapters::{headhunter, superjob, HeadHunterAdapter, SuperJobAdapter};
use crate::core::collector::PaginatedCollector;
use crate::core::engine::{SalaryEngine, SourceTarget};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::time::Duration;
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use crate::app::report::OutputFormat;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

pub const DEFAULT_LANGUAGES: [&str; 10] = [
    "JavaScript",
    "Java",
    "Python",
    "Ruby",
    "PHP",
    "C++",
    "C#",
    "C",
    "Go",
    "Scala",
];

pub const DEFAULT_NETWORK_PAUSE_SECONDS: u64 = 3;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "salary-stats")]
#[command(
    about = "Average programmer salaries per language from the HeadHunter and SuperJob APIs (Moscow by default)"
)]
pub struct CliConfig {
    /// Path to an optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// HeadHunter area id
    #[arg(long)]
    pub hh_area_id: Option<u32>,

    /// SuperJob town id
    #[arg(long)]
    pub sj_area_id: Option<u32>,

    /// SuperJob application key
    #[arg(long, env = "SUPERJOB_KEY", hide_env_values = true)]
    pub superjob_key: Option<String>,

    /// Comma separated list of languages to query
    #[arg(long, value_delimiter = ',')]
    pub languages: Vec<String>,

    /// Seconds to wait after a connection failure
    #[arg(long)]
    pub pause_seconds: Option<u64>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Copy safe to log: the API key is masked.
    pub fn redacted(mut self) -> Self {
        if self.superjob_key.is_some() {
            self.superjob_key = Some("***".to_string());
        }
        self
    }

    /// Defaults, overlaid by the TOML file, overlaid by command line flags.
    pub fn load_settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                let file_config = TomlConfig::from_file(path)?;
                file_config.validate()?;
                Settings::from_toml(file_config)
            }
            None => Settings::default(),
        };

        if let Some(area_id) = self.hh_area_id {
            settings.hh_area_id = area_id;
        }
        if let Some(town_id) = self.sj_area_id {
            settings.sj_town_id = town_id;
        }
        if let Some(key) = &self.superjob_key {
            settings.superjob_key = Some(key.clone());
        }
        if !self.languages.is_empty() {
            settings.languages = self.languages.clone();
        }
        if let Some(pause) = self.pause_seconds {
            settings.network_pause_seconds = pause;
        }
        if let Some(timeout) = self.timeout_seconds {
            settings.request_timeout_seconds = Some(timeout);
        }

        Ok(settings)
    }
}

/// Fully resolved run configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub hh_endpoint: String,
    pub hh_area_id: u32,
    pub sj_endpoint: String,
    pub sj_town_id: u32,
    pub superjob_key: Option<String>,
    pub languages: Vec<String>,
    pub network_pause_seconds: u64,
    pub request_timeout_seconds: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hh_endpoint: headhunter::DEFAULT_ENDPOINT.to_string(),
            hh_area_id: headhunter::DEFAULT_AREA_ID,
            sj_endpoint: superjob::DEFAULT_ENDPOINT.to_string(),
            sj_town_id: superjob::DEFAULT_TOWN_ID,
            superjob_key: None,
            languages: DEFAULT_LANGUAGES.iter().map(|s| s.to_string()).collect(),
            network_pause_seconds: DEFAULT_NETWORK_PAUSE_SECONDS,
            request_timeout_seconds: None,
        }
    }
}

impl Settings {
    pub fn from_toml(config: TomlConfig) -> Self {
        let defaults = Self::default();
        Self {
            hh_endpoint: config.headhunter.endpoint.unwrap_or(defaults.hh_endpoint),
            hh_area_id: config.headhunter.area_id.unwrap_or(defaults.hh_area_id),
            sj_endpoint: config.superjob.endpoint.unwrap_or(defaults.sj_endpoint),
            sj_town_id: config.superjob.town_id.unwrap_or(defaults.sj_town_id),
            superjob_key: config.superjob.api_key.or(defaults.superjob_key),
            languages: config.run.languages.unwrap_or(defaults.languages),
            network_pause_seconds: config
                .run
                .network_pause_seconds
                .unwrap_or(defaults.network_pause_seconds),
            request_timeout_seconds: config
                .run
                .request_timeout_seconds
                .or(defaults.request_timeout_seconds),
        }
    }

    /// HeadHunter first, then SuperJob, each with its own region id.
    pub fn sources(&self) -> Result<Vec<SourceTarget>> {
        let key = validation::validate_required_field("superjob_key", &self.superjob_key)?;
        Ok(vec![
            SourceTarget::new(HeadHunterAdapter::new(&self.hh_endpoint), self.hh_area_id),
            SourceTarget::new(SuperJobAdapter::new(&self.sj_endpoint, key), self.sj_town_id),
        ])
    }

    pub fn build_engine(&self) -> Result<SalaryEngine> {
        let collector =
            PaginatedCollector::new(self.request_timeout_seconds.map(Duration::from_secs))?;
        Ok(SalaryEngine::new(
            collector,
            self.sources()?,
            self.languages.clone(),
            Duration::from_secs(self.network_pause_seconds),
        ))
    }
}

impl ConfigProvider for Settings {
    fn hh_endpoint(&self) -> &str {
        &self.hh_endpoint
    }

    fn hh_area_id(&self) -> u32 {
        self.hh_area_id
    }

    fn sj_endpoint(&self) -> &str {
        &self.sj_endpoint
    }

    fn sj_town_id(&self) -> u32 {
        self.sj_town_id
    }

    fn superjob_key(&self) -> Option<&str> {
        self.superjob_key.as_deref()
    }

    fn languages(&self) -> &[String] {
        &self.languages
    }

    fn network_pause_seconds(&self) -> u64 {
        self.network_pause_seconds
    }

    fn request_timeout_seconds(&self) -> Option<u64> {
        self.request_timeout_seconds
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_url("headhunter.endpoint", self.hh_endpoint())?;
        validation::validate_url("superjob.endpoint", self.sj_endpoint())?;

        let key = validation::validate_required_field("superjob_key", &self.superjob_key)?;
        validation::validate_non_empty_string("superjob_key", key)?;

        if self.languages().is_empty() {
            return Err(crate::utils::error::StatsError::ConfigError {
                message: "at least one language is required".to_string(),
            });
        }
        for language in self.languages() {
            validation::validate_non_empty_string("languages", language)?;
        }

        if let Some(timeout) = self.request_timeout_seconds() {
            validation::validate_positive_number("request_timeout_seconds", timeout, 1)?;
        }

        Ok(())
    }
}
