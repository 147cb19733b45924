//! Gate engine: reads a host subject, decides, and tracks cooldowns

use dealgate_config::{Settings, SettingsHandle};
use dealgate_host_api::{HostError, HostResult, Notifier, OfferSubject};
use dealgate_util::{EntityId, GameTime};
use std::sync::Arc;
use tracing::debug;

use crate::{
    AdmissionRequest, AdmissionResult, CoreEvent, CooldownRegistry, GateLogger, RegistryView,
    TrackChange, evaluate,
};

/// Outcome of an intercepted offer check
#[derive(Debug, Clone, PartialEq)]
pub enum OfferVerdict {
    /// The gate decided; the host must suppress the offer on denial
    Decided {
        entity: EntityId,
        result: AdmissionResult,
    },
    /// The subject could not be read; the host runs its default behavior
    FallThrough { entity: EntityId, error: HostError },
}

impl OfferVerdict {
    pub fn entity(&self) -> &EntityId {
        match self {
            OfferVerdict::Decided { entity, .. } => entity,
            OfferVerdict::FallThrough { entity, .. } => entity,
        }
    }

    pub fn result(&self) -> Option<&AdmissionResult> {
        match self {
            OfferVerdict::Decided { result, .. } => Some(result),
            OfferVerdict::FallThrough { .. } => None,
        }
    }
}

/// Owns the cooldown registry and applies the admission policy to host
/// subjects. One instance per host; not synchronized.
#[derive(Debug)]
pub struct DealGate {
    settings: SettingsHandle,
    registry: CooldownRegistry,
    logger: GateLogger,
}

impl DealGate {
    pub fn new(settings: SettingsHandle, notifier: Arc<dyn Notifier>) -> Self {
        let logger = GateLogger::new(settings.clone(), notifier);
        let scale = settings.cooldown_scale();

        logger.log(format!(
            "Deal gate initialized - cooldown multiplier: {} ({:.0}s)",
            scale,
            scale.effective_cooldown_secs()
        ));

        Self {
            settings,
            registry: CooldownRegistry::new(),
            logger,
        }
    }

    pub fn settings(&self) -> &SettingsHandle {
        &self.settings
    }

    pub fn registry(&self) -> &CooldownRegistry {
        &self.registry
    }

    /// Decide whether a deal may be offered to `subject` right now
    pub fn check_offer(&mut self, subject: &dyn OfferSubject, now: GameTime) -> OfferVerdict {
        let entity = resolve_entity(subject);

        let request = match self.read_request(subject) {
            Ok(request) => request,
            Err(error) => {
                self.logger.failure(format!(
                    "[{}] Offer check failed, deferring to default behavior: {}",
                    entity, error
                ));
                return OfferVerdict::FallThrough { entity, error };
            }
        };

        self.logger.log(format!(
            "[{}] Offer check - since_completed={:.1}s, since_offered={:.1}s, pending_offer={}, instant={}, multiplier={}",
            entity,
            request.since_completed_secs,
            request.since_offered_secs,
            request.pending_offer,
            request.pending_instant_deal,
            request.scale
        ));

        let result = evaluate(&request);

        self.logger.log(format!(
            "[{}] Result: allowed={}, message='{}'",
            entity,
            result.is_allowed(),
            result.message()
        ));

        match result {
            AdmissionResult::Allowed => {
                if self.registry.stop_tracking(&entity) {
                    self.logger.log(format!("[{}] Stopped cooldown tracking", entity));
                }
            }
            AdmissionResult::Denied { remaining_secs, .. } if remaining_secs > 0.0 => {
                let change = self.registry.start_tracking(&entity, remaining_secs, now);
                self.log_track_change(&entity, change, remaining_secs);
            }
            // Pending-offer denials have no countdown
            AdmissionResult::Denied { .. } => {}
        }

        OfferVerdict::Decided { entity, result }
    }

    /// A deal with `entity` completed; its cooldown is no longer shown
    pub fn record_completed(&mut self, entity: &EntityId) -> bool {
        let removed = self.registry.stop_tracking(entity);
        if removed {
            self.logger
                .log(format!("[{}] Deal completed, stopped cooldown tracking", entity));
        }
        removed
    }

    /// Sweep expired cooldowns. Call from the host's tick loop.
    pub fn tick(&mut self, now: GameTime) -> Vec<CoreEvent> {
        self.registry
            .sweep(now)
            .into_iter()
            .map(|entity| {
                self.logger.log(format!("[{}] Cooldown expired", entity));
                CoreEvent::CooldownExpired { entity }
            })
            .collect()
    }

    /// Snapshot the registry for display, consuming the visibility edge
    pub fn view(&mut self, now: GameTime) -> RegistryView {
        self.registry.snapshot(now)
    }

    /// Swap in reloaded settings; takes effect on the next check
    pub fn apply_settings(&mut self, settings: Settings) -> Vec<CoreEvent> {
        let changes = self.settings.replace(settings);

        // Logged after the swap so a verbosity change applies to its own line
        changes
            .into_iter()
            .map(|change| {
                self.logger.log(change.to_string());
                CoreEvent::SettingsChanged { change }
            })
            .collect()
    }

    fn read_request(&self, subject: &dyn OfferSubject) -> HostResult<AdmissionRequest> {
        Ok(AdmissionRequest {
            since_completed_secs: clamp_elapsed(
                "since_completed",
                subject.seconds_since_deal_completed()?,
            ),
            since_offered_secs: clamp_elapsed(
                "since_offered",
                subject.seconds_since_deal_offered()?,
            ),
            pending_offer: subject.has_pending_offer()?,
            pending_instant_deal: subject.has_pending_instant_deal()?,
            scale: self.settings.cooldown_scale(),
        })
    }

    fn log_track_change(&self, entity: &EntityId, change: TrackChange, remaining_secs: f64) {
        match change {
            TrackChange::Started { became_visible } => self.logger.log(format!(
                "[{}] Started cooldown tracking ({:.0}s){}",
                entity,
                remaining_secs,
                if became_visible { ", tracker visible" } else { "" }
            )),
            TrackChange::Refreshed => self.logger.log(format!(
                "[{}] Refreshed cooldown tracking ({:.0}s)",
                entity, remaining_secs
            )),
            TrackChange::Stopped | TrackChange::Unchanged => {}
        }
    }
}

/// Name the subject, falling back to its key when the host has no name
fn resolve_entity(subject: &dyn OfferSubject) -> EntityId {
    match subject.display_name() {
        Ok(Some(name)) if !name.trim().is_empty() => EntityId::new(name),
        Ok(_) => EntityId::from_fallback_key(subject.fallback_key()),
        Err(e) => {
            debug!(error = %e, "Name lookup failed, using fallback key");
            EntityId::from_fallback_key(subject.fallback_key())
        }
    }
}

/// Negative or NaN elapsed times are treated as zero
fn clamp_elapsed(field: &'static str, secs: f64) -> f64 {
    if secs >= 0.0 {
        secs
    } else {
        debug!(field, value = secs, "Clamping invalid elapsed time to zero");
        0.0
    }
}
