//! Host adapter traits

use thiserror::Error;

/// Errors from host adapter operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HostError {
    #[error("Field unavailable: {field}")]
    FieldUnavailable { field: &'static str },

    #[error("Failed to read {field}: {message}")]
    FieldRead {
        field: &'static str,
        message: String,
    },

    #[error("Interception point unavailable: {0}")]
    InterceptionUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl HostError {
    pub fn unavailable(field: &'static str) -> Self {
        Self::FieldUnavailable { field }
    }

    pub fn read(field: &'static str, message: impl Into<String>) -> Self {
        Self::FieldRead {
            field,
            message: message.into(),
        }
    }
}

pub type HostResult<T> = Result<T, HostError>;

/// The entity a deal is being offered to, as seen through the host.
///
/// Implemented by a thin host-specific adapter. Every read may fail; the gate
/// treats any failure as "let the host's default behavior run".
pub trait OfferSubject {
    /// Seconds since a deal with this entity last completed
    fn seconds_since_deal_completed(&self) -> HostResult<f64>;

    /// Seconds since a deal was last offered to this entity
    fn seconds_since_deal_offered(&self) -> HostResult<f64>;

    /// Whether an offer is currently outstanding
    fn has_pending_offer(&self) -> HostResult<bool>;

    /// Whether an instant deal is pending
    fn has_pending_instant_deal(&self) -> HostResult<bool>;

    /// Human-readable name, if the host can resolve one
    fn display_name(&self) -> HostResult<Option<String>> {
        Ok(None)
    }

    /// Stable per-entity key used when no name is available
    fn fallback_key(&self) -> u64;
}

/// In-context notification channel (toasts, chat lines, ...)
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Notifier that drops everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _message: &str) {}
}
