//! Configuration validation module.
//!
//! Provides validation for all configuration values, failing fast on
//! invalid configuration rather than at runtime.

use crate::AppConfig;
use std::fmt;

/// Configuration validation error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    /// API key must not be empty.
    MissingApiKey,
    /// Port number is invalid (must be 1-65535).
    InvalidPort { name: String, value: u16 },
    /// Pool size configuration is invalid (min must be <= max).
    InvalidPoolSize { min: u32, max: u32 },
    /// Pool size exceeds maximum allowed.
    PoolSizeTooLarge { value: u32, maximum: u32 },
    /// Pool must allow at least one connection.
    ZeroPoolSize { name: String },
    /// URL format is invalid.
    InvalidUrl { url_type: String, message: String },
    /// Timeout value must be positive.
    NonPositiveTimeout { name: String, value: u64 },
    /// UTC offset is outside the representable range.
    InvalidUtcOffset { value: i32 },
    /// Log level is invalid.
    InvalidLogLevel { value: String },
    /// Log format is invalid.
    InvalidLogFormat { value: String },
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingApiKey => {
                write!(f, "API key cannot be empty")
            }
            Self::InvalidPort { name, value } => {
                write!(f, "Invalid port for {}: {} (must be 1-65535)", name, value)
            }
            Self::InvalidPoolSize { min, max } => {
                write!(
                    f,
                    "Invalid pool size: min ({}) cannot be greater than max ({})",
                    min, max
                )
            }
            Self::PoolSizeTooLarge { value, maximum } => {
                write!(
                    f,
                    "Pool size {} exceeds maximum allowed ({})",
                    value, maximum
                )
            }
            Self::ZeroPoolSize { name } => {
                write!(f, "Pool size for {} must be at least 1", name)
            }
            Self::InvalidUrl { url_type, message } => {
                write!(f, "Invalid {} URL: {}", url_type, message)
            }
            Self::NonPositiveTimeout { name, value } => {
                write!(f, "Timeout '{}' must be positive, got {}", name, value)
            }
            Self::InvalidUtcOffset { value } => {
                write!(
                    f,
                    "Invalid UTC offset: {} hours (must be between -23 and 23)",
                    value
                )
            }
            Self::InvalidLogLevel { value } => {
                write!(
                    f,
                    "Invalid log level: '{}' (valid: trace, debug, info, warn, error)",
                    value
                )
            }
            Self::InvalidLogFormat { value } => {
                write!(
                    f,
                    "Invalid log format: '{}' (valid: pretty, json, compact)",
                    value
                )
            }
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Result of configuration validation containing all errors found.
#[derive(Debug)]
pub struct ValidationResult {
    errors: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Creates a new validation result.
    fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Adds an error to the result.
    fn add_error(&mut self, error: ConfigValidationError) {
        self.errors.push(error);
    }

    /// Returns true if validation passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the validation errors.
    pub fn errors(&self) -> &[ConfigValidationError] {
        &self.errors
    }

    /// Converts to Result, returning Err with all errors if any exist.
    pub fn into_result(self) -> Result<(), Vec<ConfigValidationError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Maximum connection pool size.
    const MAX_POOL_SIZE: u32 = 1000;
    /// Largest representable whole-hour UTC offset.
    const MAX_UTC_OFFSET_HOURS: i32 = 23;
    /// Valid log levels.
    const VALID_LOG_LEVELS: &'static [&'static str] = &["trace", "debug", "info", "warn", "error"];
    /// Valid log formats.
    const VALID_LOG_FORMATS: &'static [&'static str] = &["pretty", "json", "compact"];

    /// Validates the entire application configuration.
    ///
    /// Returns Ok(()) if valid, or Err with all validation errors found.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut result = ValidationResult::new();

        Self::validate_security(&config.security, &mut result);
        Self::validate_server(&config.server, &mut result);
        Self::validate_database(&config.database, &mut result);
        Self::validate_redis(&config.redis, &mut result);
        Self::validate_time(&config.time, &mut result);
        Self::validate_observability(&config.observability, &mut result);

        result.into_result()
    }

    /// Validates security configuration.
    fn validate_security(config: &crate::SecurityConfig, result: &mut ValidationResult) {
        if config.api_key.trim().is_empty() {
            result.add_error(ConfigValidationError::MissingApiKey);
        }
    }

    /// Validates server configuration.
    fn validate_server(config: &crate::ServerConfig, result: &mut ValidationResult) {
        // Port 0 is invalid for binding
        if config.port == 0 {
            result.add_error(ConfigValidationError::InvalidPort {
                name: "server.port".to_string(),
                value: config.port,
            });
        }
    }

    /// Validates database configuration.
    fn validate_database(config: &crate::DatabaseConfig, result: &mut ValidationResult) {
        // URL format validation
        if config.url.is_empty() {
            result.add_error(ConfigValidationError::InvalidUrl {
                url_type: "database".to_string(),
                message: "URL cannot be empty".to_string(),
            });
        } else if !config.url.starts_with("mysql://") {
            result.add_error(ConfigValidationError::InvalidUrl {
                url_type: "database".to_string(),
                message: "URL must start with mysql://".to_string(),
            });
        }

        // Pool size validation
        if config.max_connections == 0 {
            result.add_error(ConfigValidationError::ZeroPoolSize {
                name: "database".to_string(),
            });
        }
        if config.min_connections > config.max_connections {
            result.add_error(ConfigValidationError::InvalidPoolSize {
                min: config.min_connections,
                max: config.max_connections,
            });
        }
        if config.max_connections > Self::MAX_POOL_SIZE {
            result.add_error(ConfigValidationError::PoolSizeTooLarge {
                value: config.max_connections,
                maximum: Self::MAX_POOL_SIZE,
            });
        }

        // Timeouts
        if config.connect_timeout_secs == 0 {
            result.add_error(ConfigValidationError::NonPositiveTimeout {
                name: "database.connect_timeout_secs".to_string(),
                value: 0,
            });
        }
        if config.idle_timeout_secs == 0 {
            result.add_error(ConfigValidationError::NonPositiveTimeout {
                name: "database.idle_timeout_secs".to_string(),
                value: 0,
            });
        }
    }

    /// Validates Redis configuration.
    fn validate_redis(config: &crate::RedisConfig, result: &mut ValidationResult) {
        if !config.enabled {
            return;
        }

        // URL format validation
        if !config.url.starts_with("redis://") && !config.url.starts_with("rediss://") {
            result.add_error(ConfigValidationError::InvalidUrl {
                url_type: "redis".to_string(),
                message: "URL must start with redis:// or rediss://".to_string(),
            });
        }

        // Pool size
        if config.pool_size == 0 {
            result.add_error(ConfigValidationError::ZeroPoolSize {
                name: "redis".to_string(),
            });
        }
        if config.pool_size > Self::MAX_POOL_SIZE {
            result.add_error(ConfigValidationError::PoolSizeTooLarge {
                value: config.pool_size,
                maximum: Self::MAX_POOL_SIZE,
            });
        }
    }

    /// Validates time configuration.
    fn validate_time(config: &crate::TimeConfig, result: &mut ValidationResult) {
        if config.utc_offset_hours.abs() > Self::MAX_UTC_OFFSET_HOURS {
            result.add_error(ConfigValidationError::InvalidUtcOffset {
                value: config.utc_offset_hours,
            });
        }
    }

    /// Validates observability configuration.
    fn validate_observability(config: &crate::ObservabilityConfig, result: &mut ValidationResult) {
        // Bare levels are checked against the known set; directive strings
        // like "info,tower_http=debug" are passed through to the log filter.
        let level = config.log_level.to_lowercase();
        let is_directive = level.contains(',') || level.contains('=');
        if !is_directive && !Self::VALID_LOG_LEVELS.contains(&level.as_str()) {
            result.add_error(ConfigValidationError::InvalidLogLevel {
                value: config.log_level.clone(),
            });
        }

        // Log format
        let format = config.log_format.to_lowercase();
        if !Self::VALID_LOG_FORMATS.contains(&format.as_str()) {
            result.add_error(ConfigValidationError::InvalidLogFormat {
                value: config.log_format.clone(),
            });
        }
    }
}

/// Formats validation errors for display.
pub fn format_validation_errors(errors: &[ConfigValidationError]) -> String {
    let mut output = String::from("Configuration validation failed:\n");
    for (i, error) in errors.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, error));
    }
    output
}
