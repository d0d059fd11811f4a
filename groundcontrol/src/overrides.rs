//! Local override layers.
//!
//! Three layers, checked in strict precedence order: per-actor, per-flag,
//! full. An actor override beats a flag override for the same flag, and both
//! beat the full override. Overrides are pure in-memory state with no
//! failure modes.

use std::collections::HashMap;

/// The three override layers for one client instance.
#[derive(Debug, Default)]
pub(crate) struct OverrideStore {
    /// flag name -> actor id -> forced value
    actor: HashMap<String, HashMap<String, bool>>,
    /// flag name -> forced value, all actors
    flag: HashMap<String, bool>,
    /// forced value for every flag and actor
    full: Option<bool>,
}

impl OverrideStore {
    /// Upsert an actor-level override.
    pub fn set_actor(&mut self, flag_name: &str, actor_id: &str, enabled: bool) {
        self.actor
            .entry(flag_name.to_string())
            .or_default()
            .insert(actor_id.to_string(), enabled);
    }

    /// Upsert a flag-level override. Existing actor overrides for the flag
    /// are kept and still win.
    pub fn set_flag(&mut self, flag_name: &str, enabled: bool) {
        self.flag.insert(flag_name.to_string(), enabled);
    }

    /// Set the full override.
    pub fn set_full(&mut self, enabled: bool) {
        self.full = Some(enabled);
    }

    /// Clear the full override.
    pub fn clear_full(&mut self) {
        self.full = None;
    }

    /// Clear all three layers.
    pub fn reset(&mut self) {
        self.actor.clear();
        self.flag.clear();
        self.full = None;
    }

    /// Resolve the flag against the override layers.
    ///
    /// Actor layer: the first actor in `actors` (caller-supplied order) with
    /// an explicit override wins, regardless of when overrides were set.
    /// Then the flag layer, then the full override. `None` means no layer
    /// applies and the caller falls through to cache/network.
    pub fn lookup(&self, flag_name: &str, actors: &[String]) -> Option<bool> {
        if !actors.is_empty()
            && let Some(per_actor) = self.actor.get(flag_name)
        {
            for actor_id in actors {
                if let Some(enabled) = per_actor.get(actor_id) {
                    return Some(*enabled);
                }
            }
        }

        if let Some(enabled) = self.flag.get(flag_name) {
            return Some(*enabled);
        }

        self.full
    }
}
