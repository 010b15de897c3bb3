//! Gateway configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `PAYMENTWALL` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use paymentwall::config::GatewayConfig;
//!
//! let config = GatewayConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! let client = config.into_client();
//! ```

mod error;
mod gateway;

pub use error::{ConfigError, ValidationError};
pub use gateway::GatewayConfig;

use std::path::Path;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "PAYMENTWALL";

impl GatewayConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PAYMENTWALL` prefix
    /// 3. Deserializes into the typed configuration struct
    ///
    /// # Environment Variable Format
    ///
    /// - `PAYMENTWALL__APP_KEY=...` -> `app_key = ...`
    /// - `PAYMENTWALL__API_MODE=cart` -> `api_mode = Cart`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_file(None::<&Path>)
    }

    /// Load configuration from a file, with environment variables layered
    /// on top.
    ///
    /// The file format follows its extension (`.toml`, `.json`, `.yaml`).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or the merged
    /// configuration is incomplete.
    pub fn load_with_file<P: AsRef<Path>>(path: Option<P>) -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path.as_ref()));
        }

        let config: GatewayConfig = builder
            .add_source(config::Environment::default().prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()?;

        tracing::debug!(
            api_mode = %config.api_mode,
            base_url = %config.base_url,
            "Loaded gateway configuration"
        );

        Ok(config)
    }
}
