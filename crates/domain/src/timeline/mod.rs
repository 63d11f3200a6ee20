//! Timeline — the per-device view of what switches when.
//!
//! Schedules are flattened into raw windows, one per targeted device
//! and slot. The merger folds adjacent same-action windows into
//! effective slots, and the conflict detector reports minutes where
//! differing actions collide. Both operate on one device's windows.

mod conflict;
mod merge;

pub use conflict::detect_conflicts;
pub use merge::merge_adjacent_windows;

use serde::{Deserialize, Serialize};

use crate::id::{DeviceId, ScheduleId};
use crate::schedule::{DeviceAction, TimeSlot};

/// One slot of one schedule, exploded onto a single device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawWindow {
    pub slot: TimeSlot,
    pub action: DeviceAction,
    pub schedule_id: ScheduleId,
    pub schedule_name: String,
}

/// A schedule that contributed to an effective slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSchedule {
    pub id: ScheduleId,
    pub name: String,
}

/// A merged switching window with the schedules that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveSlot {
    pub slot: TimeSlot,
    pub action: DeviceAction,
    pub source_schedules: Vec<SourceSchedule>,
}

/// Everything one device does today, slots sorted by start time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveDeviceSchedule {
    pub device_id: DeviceId,
    pub device_name: String,
    pub slots: Vec<EffectiveSlot>,
}

/// One schedule's claim inside a conflicted range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictingAction {
    pub schedule_id: ScheduleId,
    pub schedule_name: String,
    pub action: DeviceAction,
}

/// A range of minutes where schedules demand differing actions from
/// the same device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConflict {
    pub device_id: DeviceId,
    pub device_name: String,
    /// Exact intersection of the colliding windows.
    pub time_slot: TimeSlot,
    pub conflicting_actions: Vec<ConflictingAction>,
}
