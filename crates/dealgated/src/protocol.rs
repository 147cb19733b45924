//! JSON-lines protocol between dealgated and the process feeding it
//!
//! One command per input line, one output record per output line.

use chrono::{DateTime, Local};
use dealgate_core::{DenialReason, OfferVerdict, RegistryRow, RegistryView};
use dealgate_host_api::{HostError, HostResult, OfferSubject};
use dealgate_util::EntityId;
use serde::{Deserialize, Serialize};

/// Commands accepted on stdin
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum Command {
    /// Intercepted offer check
    Offer(OfferCommand),
    /// A deal with a customer completed
    Complete { customer: String },
    /// Request a registry view
    View,
    /// Re-read the config file
    Reload,
}

/// Subject state as reported by the feeding process.
///
/// Fields are optional so a host that cannot read one is represented
/// faithfully; the gate then defers to the default behavior.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OfferCommand {
    pub customer: Option<String>,
    #[serde(default)]
    pub key: u64,
    pub since_completed: Option<f64>,
    pub since_offered: Option<f64>,
    pub pending_offer: Option<bool>,
    pub pending_instant_deal: Option<bool>,
}

impl OfferSubject for OfferCommand {
    fn seconds_since_deal_completed(&self) -> HostResult<f64> {
        self.since_completed
            .ok_or(HostError::unavailable("since_completed"))
    }

    fn seconds_since_deal_offered(&self) -> HostResult<f64> {
        self.since_offered
            .ok_or(HostError::unavailable("since_offered"))
    }

    fn has_pending_offer(&self) -> HostResult<bool> {
        self.pending_offer
            .ok_or(HostError::unavailable("pending_offer"))
    }

    fn has_pending_instant_deal(&self) -> HostResult<bool> {
        self.pending_instant_deal
            .ok_or(HostError::unavailable("pending_instant_deal"))
    }

    fn display_name(&self) -> HostResult<Option<String>> {
        Ok(self.customer.clone())
    }

    fn fallback_key(&self) -> u64 {
        self.key
    }
}

/// One line of output
#[derive(Debug, Clone, Serialize)]
pub struct Output {
    pub timestamp: DateTime<Local>,
    #[serde(flatten)]
    pub body: OutputBody,
}

impl Output {
    pub fn new(body: OutputBody) -> Self {
        Self {
            timestamp: dealgate_util::now(),
            body,
        }
    }

    pub fn to_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            format!(r#"{{"type":"error","message":"serialization failed: {}"}}"#, e)
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutputBody {
    Decision {
        customer: EntityId,
        allowed: bool,
        reason: Option<DenialReason>,
        remaining_secs: f64,
        message: String,
    },
    FallThrough {
        customer: EntityId,
        error: String,
    },
    Completed {
        customer: EntityId,
        was_tracked: bool,
    },
    Expired {
        customer: EntityId,
    },
    View {
        rows: Vec<RegistryRow>,
        became_visible: bool,
        window_x: f64,
        window_y: f64,
    },
    Reloaded {
        changes: Vec<String>,
    },
    Notification {
        message: String,
    },
    Error {
        message: String,
    },
}

impl From<OfferVerdict> for OutputBody {
    fn from(verdict: OfferVerdict) -> Self {
        match verdict {
            OfferVerdict::Decided { entity, result } => OutputBody::Decision {
                customer: entity,
                allowed: result.is_allowed(),
                reason: result.reason(),
                remaining_secs: result.remaining_secs(),
                message: result.message(),
            },
            OfferVerdict::FallThrough { entity, error } => OutputBody::FallThrough {
                customer: entity,
                error: error.to_string(),
            },
        }
    }
}

impl OutputBody {
    pub fn view(view: RegistryView, window_x: f64, window_y: f64) -> Self {
        OutputBody::View {
            rows: view.rows,
            became_visible: view.became_visible,
            window_x,
            window_y,
        }
    }
}
