//! Gateway credentials and mode

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::domain::client::{Client, DEFAULT_BASE_URL};
use crate::domain::foundation::ApiMode;

use super::error::ValidationError;

/// Paymentwall project configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Project key sent with every widget
    pub app_key: String,

    /// Project secret used for signing (never logged)
    pub secret_key: SecretString,

    /// API mode of the project
    pub api_mode: ApiMode,

    /// Gateway endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Accept pingbacks from any address (local testing only)
    #[serde(default)]
    pub skip_ip_whitelist: bool,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl GatewayConfig {
    /// Validate gateway configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.app_key.trim().is_empty() {
            return Err(ValidationError::MissingRequired("APP_KEY"));
        }
        if self.secret_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("SECRET_KEY"));
        }
        if !self.base_url.starts_with("https://") {
            return Err(ValidationError::BaseUrlMustBeHttps(self.base_url.clone()));
        }

        if self.skip_ip_whitelist {
            tracing::warn!("Pingback IP whitelist is disabled");
        }

        Ok(())
    }

    /// Build a client context from this configuration
    pub fn into_client(self) -> Client {
        Client::with_secret(self.app_key, self.secret_key, self.api_mode)
            .with_base_url(self.base_url)
            .with_ip_whitelist_skipped(self.skip_ip_whitelist)
    }
}
