//! Client context.
//!
//! Holds the API mode, the application key and secret, and the diagnostics
//! log shared by every widget and signing operation made through it. The log
//! accumulates for the lifetime of the client and is never cleared.

use secrecy::SecretString;

use crate::domain::foundation::{ApiMode, Diagnostics};
use crate::domain::signing::{self, FieldTable, ParameterSet, SignatureError, SignatureVersion};

/// Default Paymentwall API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.paymentwall.com/api";

/// Gateway client context.
///
/// Operations that record diagnostics take `&mut self`; sharing a client
/// across threads needs external synchronization.
#[derive(Debug, Clone)]
pub struct Client {
    api_mode: ApiMode,
    app_key: String,
    secret_key: SecretString,
    base_url: String,
    skip_ip_whitelist: bool,
    diagnostics: Diagnostics,
}

impl Client {
    /// Creates a client for the given application.
    pub fn new(
        app_key: impl Into<String>,
        secret_key: impl Into<String>,
        api_mode: ApiMode,
    ) -> Self {
        Self::with_secret(app_key, SecretString::new(secret_key.into()), api_mode)
    }

    /// Creates a client from an already wrapped secret.
    pub fn with_secret(
        app_key: impl Into<String>,
        secret_key: SecretString,
        api_mode: ApiMode,
    ) -> Self {
        Self {
            api_mode,
            app_key: app_key.into(),
            secret_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            skip_ip_whitelist: false,
            diagnostics: Diagnostics::new(),
        }
    }

    /// Overrides the API endpoint (for sandboxes and tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Accepts pingbacks from any address (local testing only).
    pub fn with_ip_whitelist_skipped(mut self, skip: bool) -> Self {
        self.skip_ip_whitelist = skip;
        self
    }

    pub fn skips_ip_whitelist(&self) -> bool {
        self.skip_ip_whitelist
    }

    pub fn api_mode(&self) -> ApiMode {
        self.api_mode
    }

    pub fn set_api_mode(&mut self, api_mode: ApiMode) {
        self.api_mode = api_mode;
    }

    pub fn app_key(&self) -> &str {
        &self.app_key
    }

    pub fn secret_key(&self) -> &SecretString {
        &self.secret_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the field table for the current mode.
    pub fn field_table(&self) -> &'static FieldTable {
        FieldTable::for_mode(self.api_mode)
    }

    /// Appends an entry to the diagnostics log.
    pub fn record_error(&mut self, message: impl Into<String>) {
        self.diagnostics.record(message);
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Returns all recorded diagnostics joined by newlines.
    pub fn error_summary(&self) -> String {
        self.diagnostics.summary()
    }

    /// Signs `params` with this client's secret.
    ///
    /// Failures are recorded in the diagnostics log before being returned.
    ///
    /// # Errors
    ///
    /// Returns `SignatureError::EmptySecret` if the client has no secret.
    pub fn sign(
        &mut self,
        params: &ParameterSet,
        version: SignatureVersion,
    ) -> Result<String, SignatureError> {
        signing::sign(params, &self.secret_key, version).map_err(|e| {
            self.record_error(e.to_string());
            e
        })
    }
}
