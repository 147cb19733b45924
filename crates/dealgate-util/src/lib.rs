//! Shared utilities for dealgate
//!
//! This crate provides:
//! - ID types (EntityId)
//! - Time utilities (game-clock instants, wall-clock helpers)
//! - Tuning values shared by config and core (CooldownScale, LogVerbosity)
//! - Default paths for the config file

mod ids;
mod paths;
mod time;
mod tuning;

pub use ids::*;
pub use paths::*;
pub use time::*;
pub use tuning::*;
