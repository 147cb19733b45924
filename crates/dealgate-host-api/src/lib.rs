//! Host capability interfaces for dealgate
//!
//! This crate defines the narrow interface a host implements so the gate
//! can read an offer subject without knowing the host's concrete types:
//! - OfferSubject: elapsed times and pending flags for one entity
//! - Notifier: in-context, user-visible notification channel
//! - Mock implementations for testing

mod mock;
mod traits;

pub use mock::*;
pub use traits::*;
