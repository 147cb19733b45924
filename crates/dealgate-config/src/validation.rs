//! Configuration validation

use crate::schema::{RawConfig, RawDisplayConfig, RawEconomyConfig};
use dealgate_util::{CooldownScale, LogVerbosity};
use thiserror::Error;

/// Validation error
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Invalid cooldown multiplier {value}: must be finite and >= 0")]
    InvalidMultiplier { value: f64 },

    #[error("Invalid debug log level '{0}': expected silent, basic or verbose")]
    InvalidLogLevel(String),

    #[error("Invalid window position {axis}={value}: must be finite")]
    InvalidWindowPosition { axis: &'static str, value: f64 },

    #[error("Toggle key cannot be empty")]
    EmptyToggleKey,
}

/// Validate a raw configuration
pub fn validate_config(config: &RawConfig) -> Vec<ValidationError> {
    let mut errors = validate_economy(&config.economy);
    errors.extend(validate_display(&config.display));
    errors
}

fn validate_economy(economy: &RawEconomyConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(value) = economy.deal_cooldown_multiplier
        && CooldownScale::new(value).is_none()
    {
        errors.push(ValidationError::InvalidMultiplier { value });
    }

    if let Some(level) = &economy.debug_log_level
        && let Err(e) = parse_log_level(level)
    {
        errors.push(e);
    }

    errors
}

fn validate_display(display: &RawDisplayConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (axis, value) in [("window_x", display.window_x), ("window_y", display.window_y)] {
        if let Some(value) = value
            && !value.is_finite()
        {
            errors.push(ValidationError::InvalidWindowPosition { axis, value });
        }
    }

    if let Some(key) = &display.toggle_key
        && key.trim().is_empty()
    {
        errors.push(ValidationError::EmptyToggleKey);
    }

    errors
}

/// Parse a log level name. Accepts the legacy names "none", "console" and "toast".
pub fn parse_log_level(s: &str) -> Result<LogVerbosity, ValidationError> {
    match s.trim().to_lowercase().as_str() {
        "silent" | "none" => Ok(LogVerbosity::Silent),
        "basic" | "console" => Ok(LogVerbosity::Basic),
        "verbose" | "toast" => Ok(LogVerbosity::Verbose),
        _ => Err(ValidationError::InvalidLogLevel(s.to_string())),
    }
}
