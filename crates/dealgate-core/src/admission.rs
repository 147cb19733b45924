//! Deal admission policy
//!
//! Pure decision function: no state, no I/O. Rules are checked in a fixed
//! order and the first match wins.

use dealgate_util::CooldownScale;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inputs for one admission decision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdmissionRequest {
    /// Seconds since a deal with this entity last completed
    pub since_completed_secs: f64,
    /// Seconds since a deal was last offered to this entity
    pub since_offered_secs: f64,
    /// An offer is outstanding and unresolved
    pub pending_offer: bool,
    /// The offer being made is an instant deal
    pub pending_instant_deal: bool,
    pub scale: CooldownScale,
}

/// Why an offer was denied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    PendingOffer,
    RecentlyCompleted,
    RecentlyOffered,
}

/// Outcome of an admission decision
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AdmissionResult {
    Allowed,
    Denied {
        reason: DenialReason,
        /// Always 0 for [`DenialReason::PendingOffer`]
        remaining_secs: f64,
    },
}

impl AdmissionResult {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AdmissionResult::Allowed)
    }

    pub fn reason(&self) -> Option<DenialReason> {
        match self {
            AdmissionResult::Allowed => None,
            AdmissionResult::Denied { reason, .. } => Some(*reason),
        }
    }

    /// Seconds until the offer would be allowed; 0 when allowed
    pub fn remaining_secs(&self) -> f64 {
        match self {
            AdmissionResult::Allowed => 0.0,
            AdmissionResult::Denied { remaining_secs, .. } => *remaining_secs,
        }
    }

    /// Human-readable explanation, empty when allowed
    pub fn message(&self) -> String {
        match self {
            AdmissionResult::Allowed => String::new(),
            AdmissionResult::Denied {
                reason: DenialReason::PendingOffer,
                ..
            } => "Customer already has a pending offer".into(),
            AdmissionResult::Denied {
                reason: DenialReason::RecentlyCompleted,
                remaining_secs,
            } => format!(
                "Customer recently completed a deal ({:.0}s remaining)",
                remaining_secs
            ),
            AdmissionResult::Denied {
                reason: DenialReason::RecentlyOffered,
                remaining_secs,
            } => format!(
                "Customer was recently offered a deal ({:.0}s remaining)",
                remaining_secs
            ),
        }
    }
}

impl fmt::Display for AdmissionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdmissionResult::Allowed => f.write_str("allowed"),
            AdmissionResult::Denied { .. } => write!(f, "denied: {}", self.message()),
        }
    }
}

/// Effective cooldown in seconds for a scale
pub fn effective_cooldown(scale: CooldownScale) -> f64 {
    scale.effective_cooldown_secs()
}

/// Decide whether a deal may be offered.
///
/// Denial comparisons are strict: an elapsed time equal to the effective
/// cooldown counts as elapsed.
pub fn evaluate(request: &AdmissionRequest) -> AdmissionResult {
    // Guards against double-offering; independent of the cooldown scale
    if request.pending_offer {
        return AdmissionResult::Denied {
            reason: DenialReason::PendingOffer,
            remaining_secs: 0.0,
        };
    }

    let cooldown = effective_cooldown(request.scale);

    if request.since_completed_secs < cooldown {
        return AdmissionResult::Denied {
            reason: DenialReason::RecentlyCompleted,
            remaining_secs: cooldown - request.since_completed_secs,
        };
    }

    // Instant deals skip the re-offer rule only
    if request.since_offered_secs < cooldown && !request.pending_instant_deal {
        return AdmissionResult::Denied {
            reason: DenialReason::RecentlyOffered,
            remaining_secs: cooldown - request.since_offered_secs,
        };
    }

    AdmissionResult::Allowed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scale(value: f64) -> CooldownScale {
        CooldownScale::new(value).unwrap()
    }

    fn request(multiplier: f64, since_completed: f64, since_offered: f64) -> AdmissionRequest {
        AdmissionRequest {
            since_completed_secs: since_completed,
            since_offered_secs: since_offered,
            pending_offer: false,
            pending_instant_deal: false,
            scale: scale(multiplier),
        }
    }

    #[test]
    fn test_effective_cooldown() {
        assert_eq!(effective_cooldown(scale(0.0)), 0.0);
        assert_eq!(effective_cooldown(scale(0.5)), 180.0);
        assert_eq!(effective_cooldown(scale(1.0)), 360.0);
        assert_eq!(effective_cooldown(scale(2.0)), 720.0);
    }

    #[test]
    fn test_pending_offer_always_denies() {
        for multiplier in [0.0, 1.0, 2.0] {
            for elapsed in [0.0, 359.0, 1000.0] {
                let mut req = request(multiplier, elapsed, elapsed);
                req.pending_offer = true;
                req.pending_instant_deal = true;

                let result = evaluate(&req);
                assert_eq!(
                    result,
                    AdmissionResult::Denied {
                        reason: DenialReason::PendingOffer,
                        remaining_secs: 0.0,
                    }
                );
                assert!(result.message().contains("pending offer"));
            }
        }
    }

    #[test]
    fn test_completed_cooldown_boundaries() {
        let cases = [
            (0.0, 100.0, true),
            (0.0, 0.0, true),
            (1.0, 359.0, false),
            (1.0, 360.0, true),
            (1.0, 361.0, true),
            (0.5, 179.0, false),
            (0.5, 180.0, true),
            (2.0, 719.0, false),
            (2.0, 720.0, true),
        ];

        for (multiplier, since, allowed) in cases {
            let result = evaluate(&request(multiplier, since, 1000.0));
            assert_eq!(
                result.is_allowed(),
                allowed,
                "multiplier={} since_completed={}",
                multiplier,
                since
            );
        }
    }

    #[test]
    fn test_completed_denial_carries_remaining() {
        let result = evaluate(&request(1.0, 359.0, 1000.0));
        assert_eq!(result.reason(), Some(DenialReason::RecentlyCompleted));
        assert_eq!(result.remaining_secs(), 1.0);
    }

    #[test]
    fn test_offered_cooldown_boundaries() {
        let denied = evaluate(&request(0.5, 1000.0, 179.0));
        assert_eq!(denied.reason(), Some(DenialReason::RecentlyOffered));
        assert_eq!(denied.remaining_secs(), 1.0);

        assert!(evaluate(&request(0.5, 1000.0, 180.0)).is_allowed());
    }

    #[test]
    fn test_instant_deal_bypasses_offer_rule() {
        let mut req = request(0.5, 1000.0, 100.0);
        req.pending_instant_deal = true;
        assert!(evaluate(&req).is_allowed());

        req.pending_instant_deal = false;
        assert_eq!(
            evaluate(&req),
            AdmissionResult::Denied {
                reason: DenialReason::RecentlyOffered,
                remaining_secs: 80.0,
            }
        );
    }

    #[test]
    fn test_instant_deal_does_not_bypass_completed_rule() {
        let mut req = request(1.0, 100.0, 1000.0);
        req.pending_instant_deal = true;

        let result = evaluate(&req);
        assert_eq!(result.reason(), Some(DenialReason::RecentlyCompleted));
        assert_eq!(result.remaining_secs(), 260.0);
    }

    #[test]
    fn test_completed_rule_checked_before_offered_rule() {
        let result = evaluate(&request(1.0, 300.0, 10.0));
        assert_eq!(result.reason(), Some(DenialReason::RecentlyCompleted));
        assert_eq!(result.remaining_secs(), 60.0);
    }

    #[test]
    fn test_zero_scale_disables_cooldown() {
        assert!(evaluate(&request(0.0, 0.0, 0.0)).is_allowed());
    }

    #[test]
    fn test_messages_include_remaining_time() {
        let result = evaluate(&request(1.0, 0.0, 0.0));
        assert_eq!(
            result.message(),
            "Customer recently completed a deal (360s remaining)"
        );
        assert_eq!(AdmissionResult::Allowed.message(), "");
    }

    #[test]
    fn test_result_serialization() {
        let result = evaluate(&request(0.5, 1000.0, 100.0));
        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json["outcome"], "denied");
        assert_eq!(json["reason"], "recently_offered");
        assert_eq!(json["remaining_secs"], 80.0);
    }
}
