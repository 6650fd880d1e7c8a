use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use pantrypal_recipe::MatchOptions;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub dataset: DatasetConfig,
    pub matching: MatchingConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatasetConfig {
    /// Recipe CSV, relative to `root` unless absolute
    pub path: String,
    /// Project root the conventional dataset locations are resolved from
    pub root: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MatchingConfig {
    pub quota: usize,
    pub fuzzy_threshold: f64,
}

impl MatchingConfig {
    pub fn options(&self) -> MatchOptions {
        MatchOptions {
            quota: self.quota,
            fuzzy_threshold: self.fuzzy_threshold,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (PANTRYPAL__SERVER__PORT, etc.)
    /// 2. Config file specified by path, CONFIG_PATH, or config/default.toml
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        let defaults = MatchOptions::default();
        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("dataset.path", "data/raw/recipes.csv")?
            .set_default("dataset.root", ".")?
            .set_default("matching.quota", defaults.quota as u64)?
            .set_default("matching.fuzzy_threshold", defaults.fuzzy_threshold)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Optional - ignored if not found
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("PANTRYPAL")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.dataset.path.trim().is_empty() {
            return Err("Dataset path must not be empty".to_string());
        }
        if self.matching.quota == 0 {
            return Err("Matching quota must be at least 1".to_string());
        }
        let threshold = self.matching.fuzzy_threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(format!(
                "Fuzzy threshold must be in (0, 1], got {}",
                threshold
            ));
        }
        Ok(())
    }
}
