//! Validated settings structures

use crate::schema::{RawConfig, RawDisplayConfig, RawEconomyConfig};
use crate::validation::parse_log_level;
use dealgate_util::{CooldownScale, LogVerbosity};

/// Validated settings ready for use by the gate
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub economy: EconomySettings,
    pub display: DisplaySettings,
}

impl Settings {
    /// Convert from raw config (after validation)
    pub fn from_raw(raw: RawConfig) -> Self {
        Self {
            economy: EconomySettings::from_raw(raw.economy),
            display: DisplaySettings::from_raw(raw.display),
        }
    }
}

/// Cooldown and logging settings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EconomySettings {
    pub cooldown_scale: CooldownScale,
    pub log_verbosity: LogVerbosity,
}

impl EconomySettings {
    fn from_raw(raw: RawEconomyConfig) -> Self {
        Self {
            cooldown_scale: raw
                .deal_cooldown_multiplier
                .and_then(CooldownScale::new)
                .unwrap_or_default(),
            log_verbosity: raw
                .debug_log_level
                .as_deref()
                .and_then(|level| parse_log_level(level).ok())
                .unwrap_or_default(),
        }
    }
}

/// Where and whether the host shows the cooldown tracker
#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySettings {
    pub window_x: f64,
    pub window_y: f64,
    pub show_window: bool,
    pub toggle_key: String,
}

impl DisplaySettings {
    fn from_raw(raw: RawDisplayConfig) -> Self {
        let defaults = Self::default();
        Self {
            window_x: raw.window_x.unwrap_or(defaults.window_x),
            window_y: raw.window_y.unwrap_or(defaults.window_y),
            show_window: raw.show_window.unwrap_or(defaults.show_window),
            toggle_key: raw.toggle_key.unwrap_or(defaults.toggle_key),
        }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            window_x: 20.0,
            window_y: 20.0,
            show_window: true,
            toggle_key: "[".into(),
        }
    }
}
