//! Raw configuration schema (as parsed from TOML)

use serde::{Deserialize, Serialize};

/// Raw configuration as parsed from TOML
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawConfig {
    /// Config schema version
    pub config_version: u32,

    /// Deal economy settings
    #[serde(default)]
    pub economy: RawEconomyConfig,

    /// Cooldown tracker display settings (owned by the host)
    #[serde(default)]
    pub display: RawDisplayConfig,
}

/// Deal economy settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawEconomyConfig {
    /// Scales customer deal cooldowns (0.0 = instant, 1.0 = vanilla 360s, 2.0 = double)
    pub deal_cooldown_multiplier: Option<f64>,

    /// Debug log level: "silent", "basic" or "verbose"
    pub debug_log_level: Option<String>,
}

/// Cooldown tracker window settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawDisplayConfig {
    /// Horizontal position of the tracker window
    pub window_x: Option<f64>,

    /// Vertical position of the tracker window
    pub window_y: Option<f64>,

    /// Whether the tracker window is shown at all
    pub show_window: Option<bool>,

    /// Key that toggles the tracker window
    pub toggle_key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
            config_version = 1

            [economy]
            deal_cooldown_multiplier = 0.5
            debug_log_level = "verbose"

            [display]
            window_x = 40.0
            window_y = 80.0
            show_window = false
            toggle_key = "F7"
        "#;

        let config: RawConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.economy.deal_cooldown_multiplier, Some(0.5));
        assert_eq!(config.economy.debug_log_level.as_deref(), Some("verbose"));
        assert_eq!(config.display.show_window, Some(false));
        assert_eq!(config.display.toggle_key.as_deref(), Some("F7"));
    }

    #[test]
    fn parse_sections_optional() {
        let config: RawConfig = toml::from_str("config_version = 1").unwrap();
        assert!(config.economy.deal_cooldown_multiplier.is_none());
        assert!(config.display.window_x.is_none());
    }
}
