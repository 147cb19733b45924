//! Mock host implementations for testing

use std::sync::{Arc, Mutex, PoisonError};

use crate::{HostError, HostResult, Notifier, OfferSubject};

/// Mock offer subject with directly settable state
#[derive(Debug, Clone, Default)]
pub struct MockSubject {
    pub name: Option<String>,
    pub key: u64,
    pub since_completed: f64,
    pub since_offered: f64,
    pub pending_offer: bool,
    pub pending_instant_deal: bool,

    /// Field whose read should fail
    pub fail_field: Option<&'static str>,

    /// Configure name lookup to fail
    pub fail_name: bool,
}

impl MockSubject {
    /// Subject that is well past any cooldown
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            since_completed: 10_000.0,
            since_offered: 10_000.0,
            ..Default::default()
        }
    }

    pub fn with_since_completed(mut self, secs: f64) -> Self {
        self.since_completed = secs;
        self
    }

    pub fn with_since_offered(mut self, secs: f64) -> Self {
        self.since_offered = secs;
        self
    }

    pub fn with_pending_offer(mut self, pending: bool) -> Self {
        self.pending_offer = pending;
        self
    }

    pub fn with_pending_instant_deal(mut self, pending: bool) -> Self {
        self.pending_instant_deal = pending;
        self
    }

    pub fn failing(mut self, field: &'static str) -> Self {
        self.fail_field = Some(field);
        self
    }

    fn check(&self, field: &'static str) -> HostResult<()> {
        match self.fail_field {
            Some(failing) if failing == field => Err(HostError::unavailable(field)),
            _ => Ok(()),
        }
    }
}

impl OfferSubject for MockSubject {
    fn seconds_since_deal_completed(&self) -> HostResult<f64> {
        self.check("since_completed")?;
        Ok(self.since_completed)
    }

    fn seconds_since_deal_offered(&self) -> HostResult<f64> {
        self.check("since_offered")?;
        Ok(self.since_offered)
    }

    fn has_pending_offer(&self) -> HostResult<bool> {
        self.check("pending_offer")?;
        Ok(self.pending_offer)
    }

    fn has_pending_instant_deal(&self) -> HostResult<bool> {
        self.check("pending_instant_deal")?;
        Ok(self.pending_instant_deal)
    }

    fn display_name(&self) -> HostResult<Option<String>> {
        if self.fail_name {
            return Err(HostError::read("name", "lookup failed"));
        }
        Ok(self.name.clone())
    }

    fn fallback_key(&self) -> u64 {
        self.key
    }
}

/// Notifier that records every message it receives
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}
