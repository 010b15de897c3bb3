//! HandlePingbackHandler - Command handler for inbound gateway pingbacks.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::client::Client;
use crate::domain::foundation::ApiMode;
use crate::domain::pingback::{Pingback, PingbackType};
use crate::domain::product::Product;
use crate::domain::signing::ParameterSet;
use crate::ports::{PingbackStoreError, ProcessedPingbackStore};

/// Command to handle one pingback delivery.
#[derive(Debug, Clone)]
pub struct HandlePingbackCommand {
    /// Request parameters as received.
    pub params: ParameterSet,
    /// Address of the sending peer.
    pub ip_address: String,
    /// Bypasses the address gate (local testing only). The client's own
    /// setting also bypasses it.
    pub skip_ip_whitelist: bool,
}

impl HandlePingbackCommand {
    pub fn new(params: ParameterSet, ip_address: impl Into<String>) -> Self {
        Self {
            params,
            ip_address: ip_address.into(),
            skip_ip_whitelist: false,
        }
    }

    pub fn skipping_ip_whitelist(mut self) -> Self {
        self.skip_ip_whitelist = true;
        self
    }
}

/// Result of pingback processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlePingbackResult {
    /// Goods or currency should be delivered.
    Delivered {
        unique_id: String,
        user_id: String,
        products: Vec<Product>,
    },
    /// A previous delivery should be revoked.
    Cancelled { unique_id: String, user_id: String },
    /// Payment held for risk review; an outcome pingback follows.
    UnderReview { unique_id: String, user_id: String },
    /// Valid, but of a type with no action.
    Ignored { type_code: Option<i64> },
    /// Already processed.
    Duplicate { unique_id: String },
    /// Failed validation.
    Rejected { errors: Vec<String> },
}

impl HandlePingbackResult {
    /// Whether the gateway should be told the pingback was accepted.
    ///
    /// Duplicates are acknowledged so the gateway stops redelivering.
    pub fn is_acknowledged(&self) -> bool {
        !matches!(self, HandlePingbackResult::Rejected { .. })
    }
}

/// Errors from pingback handling.
#[derive(Debug, Error)]
pub enum HandlePingbackError<E> {
    #[error(transparent)]
    Store(#[from] PingbackStoreError),

    /// The caller's delivery failed; the pingback was released for retry.
    #[error("pingback delivery failed: {0}")]
    Delivery(E),
}

/// Handler for validating, classifying and delivering pingbacks.
///
/// An actionable pingback is claimed in the store before `deliver` runs, so
/// concurrent redeliveries of the same pingback deliver once. If `deliver`
/// fails the claim is released and the next redelivery is processed again.
pub struct HandlePingbackHandler {
    store: Arc<dyn ProcessedPingbackStore>,
}

impl HandlePingbackHandler {
    pub fn new(store: Arc<dyn ProcessedPingbackStore>) -> Self {
        Self { store }
    }

    pub fn handle<F, E>(
        &self,
        client: &Client,
        cmd: HandlePingbackCommand,
        deliver: F,
    ) -> Result<HandlePingbackResult, HandlePingbackError<E>>
    where
        F: FnOnce(&HandlePingbackResult) -> Result<(), E>,
        E: std::fmt::Display,
    {
        // 1. Run the validation gates
        let skip_ip_whitelist = cmd.skip_ip_whitelist || client.skips_ip_whitelist();
        let mut pingback = Pingback::new(client, cmd.params, cmd.ip_address);
        if !pingback.validate(skip_ip_whitelist) {
            return Ok(HandlePingbackResult::Rejected {
                errors: pingback.errors().snapshot(),
            });
        }

        // 2. Classify
        let unique_id = pingback.unique_id();
        let user_id = pingback.user_id().unwrap_or_default().to_string();
        let id = unique_id.clone().unwrap_or_default();
        let result = match pingback.pingback_type() {
            Some(PingbackType::Deliverable(_)) => HandlePingbackResult::Delivered {
                unique_id: id,
                user_id,
                products: delivered_products(&pingback),
            },
            Some(PingbackType::Cancelable(_)) => HandlePingbackResult::Cancelled {
                unique_id: id,
                user_id,
            },
            Some(PingbackType::UnderReview) => HandlePingbackResult::UnderReview {
                unique_id: id,
                user_id,
            },
            Some(PingbackType::Other(_)) | None => {
                tracing::debug!(type_code = ?pingback.type_code(), "Ignoring pingback type");
                return Ok(HandlePingbackResult::Ignored {
                    type_code: pingback.type_code(),
                });
            }
        };

        // 3. Claim; a lost claim means another delivery got here first
        if let Some(id) = &unique_id {
            if !self.store.mark_processed(id)? {
                tracing::info!(unique_id = %id, "Skipping duplicate pingback");
                return Ok(HandlePingbackResult::Duplicate {
                    unique_id: id.clone(),
                });
            }
        }

        // 4. Deliver, releasing the claim on failure so a redelivery retries
        if let Err(e) = deliver(&result) {
            tracing::warn!(unique_id = ?unique_id, error = %e, "Pingback delivery failed");
            if let Some(id) = &unique_id {
                if let Err(release_error) = self.store.release(id) {
                    tracing::error!(
                        unique_id = %id,
                        error = %release_error,
                        "Could not release pingback claim"
                    );
                }
            }
            return Err(HandlePingbackError::Delivery(e));
        }

        Ok(result)
    }
}

/// Products named by a deliverable pingback, by API mode.
fn delivered_products(pingback: &Pingback<'_>) -> Vec<Product> {
    match pingback.client().api_mode() {
        ApiMode::VirtualCurrency => Vec::new(),
        ApiMode::Cart => pingback.products(),
        ApiMode::DigitalGoods => match pingback.product() {
            Ok(product) => vec![product],
            Err(e) => {
                tracing::warn!(error = %e, "Pingback product could not be rebuilt");
                Vec::new()
            }
        },
    }
}
