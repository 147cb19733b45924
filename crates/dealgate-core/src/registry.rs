//! Cooldown tracking registry
//!
//! Tracks which entities are cooling down and when each cooldown ends.
//! Eviction only happens in [`CooldownRegistry::sweep`]; there are no
//! background timers. Not synchronized: callers confine it to one thread
//! or wrap it in a lock.

use dealgate_util::{EntityId, GameTime};
use serde::Serialize;
use std::collections::HashMap;

/// What a call to [`CooldownRegistry::start_tracking`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackChange {
    /// Entity was absent and is now tracked
    Started {
        /// The registry went from empty to non-empty
        became_visible: bool,
    },
    /// Entity was already tracked; its expiry was overwritten
    Refreshed,
    /// Non-positive remaining time removed a tracked entity
    Stopped,
    /// Non-positive remaining time for an untracked entity
    Unchanged,
}

/// One row of a [`RegistryView`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistryRow {
    pub entity: EntityId,
    pub remaining_secs: f64,
}

/// Point-in-time copy of the registry for display
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RegistryView {
    /// Soonest-expiring first
    pub rows: Vec<RegistryRow>,
    /// Registry went from empty to non-empty since the previous view
    pub became_visible: bool,
}

impl RegistryView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Per-entity cooldown expiries
#[derive(Debug, Default)]
pub struct CooldownRegistry {
    expiries: HashMap<EntityId, GameTime>,
    /// Latched on empty -> non-empty, cleared by `snapshot` or on emptying
    became_visible: bool,
}

impl CooldownRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track `entity` until `now + remaining_secs`.
    ///
    /// A non-positive (or NaN) remaining time stops tracking instead.
    pub fn start_tracking(
        &mut self,
        entity: &EntityId,
        remaining_secs: f64,
        now: GameTime,
    ) -> TrackChange {
        if remaining_secs.is_nan() || remaining_secs <= 0.0 {
            return if self.stop_tracking(entity) {
                TrackChange::Stopped
            } else {
                TrackChange::Unchanged
            };
        }

        let was_empty = self.expiries.is_empty();
        let expiry = now + remaining_secs;

        if self.expiries.insert(entity.clone(), expiry).is_some() {
            return TrackChange::Refreshed;
        }

        if was_empty {
            self.became_visible = true;
        }

        TrackChange::Started {
            became_visible: was_empty,
        }
    }

    /// Stop tracking `entity`. Returns whether it was tracked.
    pub fn stop_tracking(&mut self, entity: &EntityId) -> bool {
        let removed = self.expiries.remove(entity).is_some();
        self.clear_flag_if_empty();
        removed
    }

    /// Remove every entry whose expiry is at or before `now`
    pub fn sweep(&mut self, now: GameTime) -> Vec<EntityId> {
        let mut expired: Vec<EntityId> = self
            .expiries
            .iter()
            .filter(|(_, expiry)| **expiry <= now)
            .map(|(entity, _)| entity.clone())
            .collect();
        expired.sort();

        for entity in &expired {
            self.expiries.remove(entity);
        }

        self.clear_flag_if_empty();
        expired
    }

    /// Build a view of live entries and consume the visibility flag.
    ///
    /// Entries that have expired but not yet been swept are left out.
    pub fn snapshot(&mut self, now: GameTime) -> RegistryView {
        let mut rows: Vec<RegistryRow> = self
            .expiries
            .iter()
            .map(|(entity, expiry)| RegistryRow {
                entity: entity.clone(),
                remaining_secs: expiry.seconds_until(now),
            })
            .filter(|row| row.remaining_secs > 0.0)
            .collect();

        rows.sort_by(|a, b| {
            a.remaining_secs
                .total_cmp(&b.remaining_secs)
                .then_with(|| a.entity.cmp(&b.entity))
        });

        let became_visible = std::mem::take(&mut self.became_visible);

        RegistryView {
            rows,
            became_visible,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.expiries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.expiries.len()
    }

    pub fn expiry_of(&self, entity: &EntityId) -> Option<GameTime> {
        self.expiries.get(entity).copied()
    }

    fn clear_flag_if_empty(&mut self) {
        if self.expiries.is_empty() {
            self.became_visible = false;
        }
    }
}
