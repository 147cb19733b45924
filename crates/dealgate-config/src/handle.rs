//! Live settings shared between the gate and whatever reloads configuration

use crate::settings::{DisplaySettings, Settings};
use dealgate_util::{CooldownScale, LogVerbosity};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

/// A single setting that differs between two [`Settings`] values
#[derive(Debug, Clone, PartialEq)]
pub enum SettingChange {
    CooldownScale {
        old: CooldownScale,
        new: CooldownScale,
    },
    LogVerbosity {
        old: LogVerbosity,
        new: LogVerbosity,
    },
    Display {
        old: DisplaySettings,
        new: DisplaySettings,
    },
}

impl SettingChange {
    /// Field-by-field difference from `old` to `new`
    pub fn diff(old: &Settings, new: &Settings) -> Vec<SettingChange> {
        let mut changes = Vec::new();

        if old.economy.cooldown_scale != new.economy.cooldown_scale {
            changes.push(SettingChange::CooldownScale {
                old: old.economy.cooldown_scale,
                new: new.economy.cooldown_scale,
            });
        }

        if old.economy.log_verbosity != new.economy.log_verbosity {
            changes.push(SettingChange::LogVerbosity {
                old: old.economy.log_verbosity,
                new: new.economy.log_verbosity,
            });
        }

        if old.display != new.display {
            changes.push(SettingChange::Display {
                old: old.display.clone(),
                new: new.display.clone(),
            });
        }

        changes
    }
}

impl fmt::Display for SettingChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingChange::CooldownScale { old, new } => write!(
                f,
                "Deal cooldown changed: {} -> {} ({:.0}s)",
                old,
                new,
                new.effective_cooldown_secs()
            ),
            SettingChange::LogVerbosity { old, new } => {
                write!(f, "Debug log level changed: {} -> {}", old, new)
            }
            SettingChange::Display { new, .. } => write!(
                f,
                "Display settings changed: window at ({:.0}, {:.0}), shown={}, toggle key '{}'",
                new.window_x, new.window_y, new.show_window, new.toggle_key
            ),
        }
    }
}

/// Cheaply cloneable handle to the current settings.
///
/// Readers always see the latest value; nothing downstream caches it.
#[derive(Debug, Clone, Default)]
pub struct SettingsHandle {
    inner: Arc<RwLock<Settings>>,
}

impl SettingsHandle {
    pub fn new(settings: Settings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(settings)),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Settings> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn current(&self) -> Settings {
        self.read().clone()
    }

    pub fn cooldown_scale(&self) -> CooldownScale {
        self.read().economy.cooldown_scale
    }

    pub fn log_verbosity(&self) -> LogVerbosity {
        self.read().economy.log_verbosity
    }

    pub fn display(&self) -> DisplaySettings {
        self.read().display.clone()
    }

    /// Swap in new settings, returning what changed
    pub fn replace(&self, settings: Settings) -> Vec<SettingChange> {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let changes = SettingChange::diff(&guard, &settings);
        *guard = settings;
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_scale(scale: f64) -> Settings {
        let mut settings = Settings::default();
        settings.economy.cooldown_scale = CooldownScale::new(scale).unwrap();
        settings
    }

    #[test]
    fn test_replace_reports_changes() {
        let handle = SettingsHandle::new(with_scale(1.0));
        let clone = handle.clone();

        let changes = handle.replace(with_scale(2.0));
        assert_eq!(changes.len(), 1);
        assert_eq!(
            changes[0].to_string(),
            "Deal cooldown changed: 1.0x -> 2.0x (720s)"
        );

        // Clones observe the new value immediately
        assert_eq!(clone.cooldown_scale().get(), 2.0);
    }

    #[test]
    fn test_replace_with_identical_settings() {
        let handle = SettingsHandle::new(with_scale(0.5));
        assert!(handle.replace(with_scale(0.5)).is_empty());
    }

    #[test]
    fn test_verbosity_change_message() {
        let handle = SettingsHandle::default();
        let mut next = Settings::default();
        next.economy.log_verbosity = LogVerbosity::Verbose;

        let changes = handle.replace(next);
        assert_eq!(changes[0].to_string(), "Debug log level changed: silent -> verbose");
        assert_eq!(handle.log_verbosity(), LogVerbosity::Verbose);
    }

    #[test]
    fn test_display_change_detected() {
        let handle = SettingsHandle::default();
        let mut next = Settings::default();
        next.display.show_window = false;

        let changes = handle.replace(next);
        assert!(matches!(changes[0], SettingChange::Display { .. }));
        assert!(!handle.display().show_window);
    }
}
