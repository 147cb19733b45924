//! Cooldown admission policy and tracking registry for dealgate
//!
//! This crate contains:
//! - Admission policy (may a deal be offered to this entity right now?)
//! - Cooldown registry (who is cooling down, and for how long)
//! - The gate engine that reads a host subject, decides, and keeps the
//!   registry in step with each decision
//! - Verbosity-gated logging and notifications

mod admission;
mod events;
mod gate;
mod logger;
mod registry;

pub use admission::*;
pub use events::*;
pub use gate::*;
pub use logger::*;
pub use registry::*;
