use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::sampler::{CandidateSampler, DEFAULT_MAX_CANDIDATES, DEFAULT_SEARCH_POOL_LIMIT};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    /// Upper bound on random matches per draw
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,
    /// Cap on profiles a saved search contributes before hide filtering
    #[serde(default = "default_search_pool_limit")]
    pub search_pool_limit: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            max_candidates: default_max_candidates(),
            search_pool_limit: default_search_pool_limit(),
        }
    }
}

impl MatchingSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=DEFAULT_MAX_CANDIDATES).contains(&self.max_candidates) {
            return Err(ConfigError::Message(format!(
                "matching.max_candidates must be between 1 and {}, got {}",
                DEFAULT_MAX_CANDIDATES, self.max_candidates
            )));
        }
        if self.search_pool_limit == 0 {
            return Err(ConfigError::Message(
                "matching.search_pool_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn sampler(&self) -> CandidateSampler {
        CandidateSampler::new(self.max_candidates, self.search_pool_limit)
    }
}

fn default_max_candidates() -> usize { DEFAULT_MAX_CANDIDATES }
fn default_search_pool_limit() -> usize { DEFAULT_SEARCH_POOL_LIMIT }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with MATCHPOOL)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., MATCHPOOL__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("MATCHPOOL")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Self::from_config(apply_database_url(settings)?)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("MATCHPOOL")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Self::from_config(settings)
    }

    fn from_config(config: Config) -> Result<Self, ConfigError> {
        let settings: Self = config.try_deserialize()?;
        settings.matching.validate()?;
        Ok(settings)
    }
}

/// A plain DATABASE_URL wins over whatever the files say
fn apply_database_url(settings: Config) -> Result<Config, ConfigError> {
    match std::env::var("DATABASE_URL") {
        Ok(url) => Config::builder()
            .add_source(settings)
            .set_override("database.url", url)?
            .build(),
        Err(_) => Ok(settings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_default_matching() {
        let matching = MatchingSettings::default();
        assert_eq!(matching.max_candidates, 3);
        assert_eq!(matching.search_pool_limit, 15);
        assert_eq!(matching.sampler().max_candidates(), 3);
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "json");
    }

    fn parse(toml: &str) -> Result<Settings, ConfigError> {
        Settings::from_config(
            Config::builder()
                .add_source(File::from_str(toml, FileFormat::Toml))
                .build()?,
        )
    }

    const BASE: &str = r#"
        [server]
        host = "127.0.0.1"
        port = 9000

        [database]
        url = "postgres://localhost/test"
    "#;

    #[test]
    fn test_parse_minimal_toml() {
        let toml = format!("{}\n[matching]\nmax_candidates = 2\n", BASE);
        let settings = parse(&toml).unwrap();

        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.matching.max_candidates, 2);
        assert_eq!(settings.matching.search_pool_limit, 15);
        assert_eq!(settings.logging.format, "json");
    }

    #[test]
    fn test_defaults_without_matching_section() {
        let settings = parse(BASE).unwrap();
        assert_eq!(settings.matching.sampler().max_candidates(), 3);
    }

    #[test]
    fn test_rejects_out_of_range_max_candidates() {
        for value in [0, 4, 10] {
            let toml = format!("{}\n[matching]\nmax_candidates = {}\n", BASE, value);
            let err = parse(&toml).unwrap_err();
            assert!(err.to_string().contains("max_candidates"), "{}", err);
        }
    }

    #[test]
    fn test_rejects_zero_search_pool_limit() {
        let toml = format!("{}\n[matching]\nsearch_pool_limit = 0\n", BASE);
        assert!(parse(&toml).is_err());
    }
}
