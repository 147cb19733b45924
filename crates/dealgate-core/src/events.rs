//! Core events emitted by the gate

use dealgate_config::SettingChange;
use dealgate_util::EntityId;

/// Events emitted by the gate engine
#[derive(Debug, Clone, PartialEq)]
pub enum CoreEvent {
    /// An entity's cooldown ran out and it was swept from the registry
    CooldownExpired { entity: EntityId },

    /// A setting changed on reload
    SettingsChanged { change: SettingChange },
}
