//! Live UAV session tracking
//!
//! Keyed map from UAV id to the aggregated [`UavObject`]. Every decoded
//! record with a non-empty id is merged into the live record for that id;
//! aircraft that stop broadcasting are swept out by [`SessionManager::cleanup`].
//!
//! All methods are synchronous and callbacks fire on the calling thread,
//! inside the mutating call, before it returns.

use std::collections::{
    hash_map,
    HashMap,
};

use chrono::{
    DateTime,
    TimeDelta,
    Utc,
};
use ridbee_types::UavObject;

/// Event callback slot. Unset means "do not notify".
pub type UavCallback = Box<dyn FnMut(&UavObject) + Send>;

pub struct SessionManager {
    uavs: HashMap<String, UavObject>,
    timeout: TimeDelta,
    on_new: Option<UavCallback>,
    on_update: Option<UavCallback>,
    on_timeout: Option<UavCallback>,
}

impl SessionManager {
    pub fn new(timeout_ms: u32) -> Self {
        Self {
            uavs: HashMap::new(),
            timeout: TimeDelta::milliseconds(i64::from(timeout_ms)),
            on_new: None,
            on_update: None,
            on_timeout: None,
        }
    }

    /// Merges a decoded record into the session map.
    ///
    /// Records with an empty id are rejected. A previously unseen id installs
    /// the record as-is and fires `on_new`; a known id merges field-wise and
    /// fires `on_update`. Exactly one of the two callbacks fires, after the
    /// merge, before this returns.
    ///
    /// Returns whether the id was new.
    pub fn update(&mut self, uav: UavObject) -> bool {
        if uav.id.is_empty() {
            return false;
        }

        match self.uavs.entry(uav.id.clone()) {
            hash_map::Entry::Vacant(vacant) => {
                let stored = vacant.insert(uav);
                if let Some(on_new) = &mut self.on_new {
                    on_new(stored);
                }
                true
            }
            hash_map::Entry::Occupied(mut occupied) => {
                let existing = occupied.get_mut();
                merge(existing, uav);
                if let Some(on_update) = &mut self.on_update {
                    on_update(existing);
                }
                false
            }
        }
    }

    /// Snapshot of all tracked aircraft, most recently seen first.
    pub fn active_uavs(&self) -> Vec<UavObject> {
        let mut uavs: Vec<UavObject> = self.uavs.values().cloned().collect();
        uavs.sort_by(|a, b| b.last_seen.cmp(&a.last_seen));
        uavs
    }

    pub fn get(&self, id: &str) -> Option<&UavObject> {
        self.uavs.get(id)
    }

    pub fn count(&self) -> usize {
        self.uavs.len()
    }

    /// Removes aircraft not seen for longer than the configured timeout,
    /// firing `on_timeout` for each. Returns the removed ids.
    ///
    /// This is the only path that fires `on_timeout`; aged-out aircraft stay
    /// visible until it runs.
    pub fn cleanup(&mut self) -> Vec<String> {
        self.cleanup_at(Utc::now())
    }

    /// [`Self::cleanup`] against an explicit clock.
    pub fn cleanup_at(&mut self, now: DateTime<Utc>) -> Vec<String> {
        let timeout = self.timeout;
        let expired: Vec<String> = self
            .uavs
            .iter()
            .filter(|(_, uav)| now.signed_duration_since(uav.last_seen) > timeout)
            .map(|(id, _)| id.clone())
            .collect();

        for id in &expired {
            if let Some(uav) = self.uavs.remove(id) {
                tracing::debug!(id = %uav.id, "uav timed out");
                if let Some(on_timeout) = &mut self.on_timeout {
                    on_timeout(&uav);
                }
            }
        }

        expired
    }

    /// Drops all tracked aircraft without firing events.
    pub fn clear(&mut self) {
        self.uavs.clear();
    }

    pub fn set_on_new(&mut self, callback: impl FnMut(&UavObject) + Send + 'static) {
        self.on_new = Some(Box::new(callback));
    }

    pub fn set_on_update(&mut self, callback: impl FnMut(&UavObject) + Send + 'static) {
        self.on_update = Some(Box::new(callback));
    }

    pub fn set_on_timeout(&mut self, callback: impl FnMut(&UavObject) + Send + 'static) {
        self.on_timeout = Some(Box::new(callback));
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("uavs", &self.uavs.len())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Field-wise merge of an incoming partial record into the stored one.
///
/// Signal data always refreshes; message sections only replace the stored
/// section when the incoming one is valid, so a location-only frame never
/// wipes a previously received operator id.
fn merge(existing: &mut UavObject, incoming: UavObject) {
    existing.rssi = incoming.rssi;
    existing.last_seen = incoming.last_seen;
    existing.message_count += 1;

    if incoming.location.valid {
        existing.location = incoming.location;
    }
    if incoming.system.valid {
        existing.system = incoming.system;
    }
    if incoming.self_id.valid {
        existing.self_id = incoming.self_id;
    }
    if incoming.operator_id.valid {
        existing.operator_id = incoming.operator_id;
    }
    if !incoming.auth_data.is_empty() {
        existing.auth_data = incoming.auth_data;
    }
}
