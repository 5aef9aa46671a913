use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::llt::{Comparison, LltResult, LoadReport};
use crate::vehicle::{Vehicle, VehicleConfig};

/// Named vehicle slots a single session may hold at once.
pub const MAX_SLOTS_PER_SESSION: usize = 16;

/// One connected client. Vehicles live in named slots ("baseline", "candidate", ...).
pub struct Session {
    pub id: String,
    pub vehicles: HashMap<String, Vehicle>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SlotInfo {
    pub slot: String,
    pub config: VehicleConfig,
}

pub struct SharedSessionState {
    pub sessions: HashMap<String, Session>,
    pub evaluations: u64,
}

impl SharedSessionState {
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
            evaluations: 0,
        }
    }

    pub fn add_session(&mut self) -> String {
        let id = Uuid::new_v4().to_string();
        self.sessions.insert(
            id.clone(),
            Session {
                id: id.clone(),
                vehicles: HashMap::new(),
            },
        );
        id
    }

    pub fn remove_session(&mut self, id: &str) {
        self.sessions.remove(id);
    }

    fn session_mut(&mut self, id: &str) -> Option<&mut Session> {
        self.sessions.get_mut(id)
    }

    /// Replace `slot` with the reference car + `overrides`.
    pub fn load(&mut self, session: &str, slot: &str, overrides: &Value) -> Result<SlotInfo, String> {
        let vehicle = Vehicle::with_overrides(overrides).map_err(|e| e.to_string())?;
        self.install(session, slot, vehicle)
    }

    /// Deep-merge `overrides` onto the car already in `slot` (reference car if empty).
    pub fn update(&mut self, session: &str, slot: &str, overrides: &Value) -> Result<SlotInfo, String> {
        let base = self
            .sessions
            .get(session)
            .and_then(|s| s.vehicles.get(slot))
            .map(|v| *v.config())
            .unwrap_or_default();
        let vehicle = base
            .merged(overrides)
            .and_then(Vehicle::new)
            .map_err(|e| e.to_string())?;
        self.install(session, slot, vehicle)
    }

    fn install(&mut self, session: &str, slot: &str, vehicle: Vehicle) -> Result<SlotInfo, String> {
        let s = self
            .session_mut(session)
            .ok_or_else(|| format!("unknown session {session}"))?;
        if !s.vehicles.contains_key(slot) && s.vehicles.len() >= MAX_SLOTS_PER_SESSION {
            return Err(format!(
                "slot limit reached ({MAX_SLOTS_PER_SESSION}); remove a slot before loading '{slot}'"
            ));
        }
        let info = SlotInfo { slot: slot.to_string(), config: *vehicle.config() };
        s.vehicles.insert(slot.to_string(), vehicle);
        Ok(info)
    }

    pub fn remove(&mut self, session: &str, slot: &str) -> Result<(), String> {
        self.session_mut(session)
            .and_then(|s| s.vehicles.remove(slot))
            .map(|_| ())
            .ok_or_else(|| format!("no vehicle loaded in slot '{slot}'"))
    }

    pub fn report(&mut self, session: &str, slot: &str) -> Result<LoadReport, String> {
        let vehicle = self
            .session_mut(session)
            .and_then(|s| s.vehicles.get_mut(slot))
            .ok_or_else(|| format!("no vehicle loaded in slot '{slot}'"))?;
        let report = vehicle.report().map_err(|e| e.to_string())?;
        self.evaluations += 1;
        Ok(report)
    }

    pub fn compare(&mut self, session: &str, baseline: &str, candidate: &str) -> Result<Comparison, String> {
        let s = self
            .session_mut(session)
            .ok_or_else(|| format!("unknown session {session}"))?;

        // Take the baseline out so both slots can be borrowed mutably.
        let mut a = s
            .vehicles
            .remove(baseline)
            .ok_or_else(|| format!("no vehicle loaded in slot '{baseline}'"))?;
        let result: LltResult<Comparison> = if baseline == candidate {
            let mut b = a.clone();
            a.compare_to(&mut b)
        } else {
            match s.vehicles.get_mut(candidate) {
                Some(b) => a.compare_to(b),
                None => {
                    s.vehicles.insert(baseline.to_string(), a);
                    return Err(format!("no vehicle loaded in slot '{candidate}'"));
                }
            }
        };
        s.vehicles.insert(baseline.to_string(), a);

        let cmp = result.map_err(|e| e.to_string())?;
        self.evaluations += 1;
        Ok(cmp)
    }
}
