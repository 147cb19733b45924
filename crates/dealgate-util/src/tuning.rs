//! Tuning values shared between configuration and the core engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Vanilla cooldown between deals with the same customer, in seconds
pub const BASE_COOLDOWN_SECS: f64 = 360.0;

/// Multiplier applied to [`BASE_COOLDOWN_SECS`].
///
/// Always finite and non-negative. Zero disables the cooldown entirely.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct CooldownScale(f64);

impl CooldownScale {
    pub const DISABLED: CooldownScale = CooldownScale(0.0);
    pub const VANILLA: CooldownScale = CooldownScale(1.0);

    /// Returns `None` for negative, NaN or infinite values
    pub fn new(value: f64) -> Option<Self> {
        if value.is_finite() && value >= 0.0 {
            Some(Self(value))
        } else {
            None
        }
    }

    pub fn get(&self) -> f64 {
        self.0
    }

    /// Effective cooldown in seconds: base × scale
    pub fn effective_cooldown_secs(&self) -> f64 {
        BASE_COOLDOWN_SECS * self.0
    }
}

impl Default for CooldownScale {
    fn default() -> Self {
        Self::VANILLA
    }
}

impl fmt::Display for CooldownScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}x", self.0)
    }
}

impl TryFrom<f64> for CooldownScale {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| {
            format!("cooldown multiplier must be finite and >= 0, got {}", value)
        })
    }
}

impl From<CooldownScale> for f64 {
    fn from(scale: CooldownScale) -> Self {
        scale.0
    }
}

/// How much the gate reports about its decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogVerbosity {
    /// Nothing is reported
    #[default]
    Silent,
    /// Diagnostic lines go to the log
    Basic,
    /// Log, plus in-context notifications to the user
    Verbose,
}

impl fmt::Display for LogVerbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogVerbosity::Silent => "silent",
            LogVerbosity::Basic => "basic",
            LogVerbosity::Verbose => "verbose",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_cooldown_scales_linearly() {
        let cases = [(0.0, 0.0), (0.5, 180.0), (1.0, 360.0), (2.0, 720.0)];
        for (scale, expected) in cases {
            let scale = CooldownScale::new(scale).unwrap();
            assert_eq!(scale.effective_cooldown_secs(), expected);
        }
    }

    #[test]
    fn test_rejects_invalid_scale() {
        assert!(CooldownScale::new(-0.1).is_none());
        assert!(CooldownScale::new(f64::NAN).is_none());
        assert!(CooldownScale::new(f64::INFINITY).is_none());
        assert!(CooldownScale::new(0.0).is_some());
    }

    #[test]
    fn test_scale_serde() {
        let scale: CooldownScale = serde_json::from_str("2.0").unwrap();
        assert_eq!(scale.get(), 2.0);
        assert!(serde_json::from_str::<CooldownScale>("-1.0").is_err());
    }

    #[test]
    fn test_verbosity_ordering() {
        assert!(LogVerbosity::Silent < LogVerbosity::Basic);
        assert!(LogVerbosity::Basic < LogVerbosity::Verbose);
        assert_eq!(LogVerbosity::default(), LogVerbosity::Silent);
    }

    #[test]
    fn test_verbosity_serde_names() {
        let v: LogVerbosity = serde_json::from_str("\"verbose\"").unwrap();
        assert_eq!(v, LogVerbosity::Verbose);
        assert_eq!(v.to_string(), "verbose");
    }
}
