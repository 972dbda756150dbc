//! Configuration loader with layered sources.

use crate::{format_validation_errors, AppConfig, ConfigValidator};
use config::{Config, ConfigError, Environment, File};
use std::path::Path;
use tally_core::TallyError;
use tracing::{debug, info, warn};

/// Configuration loader.
#[derive(Clone)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `{config_dir}/default.toml` - Default values
    /// 2. `{config_dir}/{environment}.toml` - Environment-specific overrides
    /// 3. `{config_dir}/local.toml` - Local overrides (not committed)
    /// 4. Environment variables with `TALLY_` prefix and `__` separator
    ///    (e.g. `TALLY_DATABASE__URL`, `TALLY_SECURITY__API_KEY`)
    pub fn new(config_dir: impl Into<String>) -> Result<Self, TallyError> {
        let config_dir = config_dir.into();
        let config = Self::load_config(&config_dir)?;
        Ok(Self { config })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, TallyError> {
        Self::new("./config")
    }

    /// Returns the loaded configuration.
    #[must_use]
    pub fn get(&self) -> AppConfig {
        self.config.clone()
    }

    /// Loads configuration from the specified directory.
    fn load_config(config_dir: &str) -> Result<AppConfig, TallyError> {
        // Load .env file if present
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var("TALLY_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        // 1. Load default configuration
        let default_path = format!("{}/default.toml", config_dir);
        if Path::new(&default_path).exists() {
            debug!("Loading default config from: {}", default_path);
            builder = builder.add_source(File::with_name(&default_path).required(false));
        }

        // 2. Load environment-specific configuration
        let env_path = format!("{}/{}.toml", config_dir, environment);
        if Path::new(&env_path).exists() {
            debug!("Loading environment config from: {}", env_path);
            builder = builder.add_source(File::with_name(&env_path).required(false));
        }

        // 3. Load local overrides (not committed to version control)
        let local_path = format!("{}/local.toml", config_dir);
        if Path::new(&local_path).exists() {
            debug!("Loading local config from: {}", local_path);
            builder = builder.add_source(File::with_name(&local_path).required(false));
        }

        // 4. Override with environment variables (TALLY_ prefix)
        builder = builder.add_source(
            Environment::with_prefix("TALLY")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_error_to_tally_error)?;

        let app_config: AppConfig = config
            .try_deserialize()
            .map_err(config_error_to_tally_error)?;

        Self::check_config(&app_config)?;

        Ok(app_config)
    }

    /// Validates the loaded configuration, failing fast on hard errors.
    fn check_config(config: &AppConfig) -> Result<(), TallyError> {
        if config.app.environment != "development" && config.security.api_key == DEFAULT_API_KEY {
            warn!(
                "Using the default API key in {}! This is a security risk.",
                config.app.environment
            );
        }

        ConfigValidator::validate(config)
            .map_err(|errors| TallyError::Configuration(format_validation_errors(&errors)))
    }
}

const DEFAULT_API_KEY: &str = "change-me-in-production";

fn config_error_to_tally_error(err: ConfigError) -> TallyError {
    TallyError::Configuration(err.to_string())
}
