//! Schedule resolver — turns stored schedules into per-device timelines.
//!
//! Resolution answers "what does every device do today": each
//! applicable schedule is exploded into raw windows per targeted
//! device, conflicts between differing actions are reported, and
//! same-action windows are folded into effective slots sorted by
//! start time. Resolution never fails; schedules that cannot be
//! resolved are logged and skipped.

use std::collections::HashMap;

use spotswitch_domain::id::DeviceId;
use spotswitch_domain::schedule::{DeviceAction, Schedule, ScheduleConfig};
use spotswitch_domain::time::CivilDate;
use spotswitch_domain::timeline::{
    EffectiveDeviceSchedule, RawWindow, ScheduleConflict, detect_conflicts,
    merge_adjacent_windows,
};

use crate::ports::DeviceDirectory;

/// Outcome of resolving all schedules for one date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// One entry per targeted device, in first-seen order.
    pub effective_schedules: Vec<EffectiveDeviceSchedule>,
    /// Ranges where schedules demand differing actions. Conflicts are
    /// reported, not resolved; the colliding slots stay in the timeline.
    pub conflicts: Vec<ScheduleConflict>,
}

/// Use-case: flatten schedules into what each device does on a date.
pub struct ScheduleResolver<D> {
    directory: D,
}

impl<D: DeviceDirectory> ScheduleResolver<D> {
    /// Create a new resolver.
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    /// Resolve the given schedules for one date.
    ///
    /// Schedules that do not apply on `today`, or fail validation, are
    /// skipped. Within a device, windows merge per action value only;
    /// a window never absorbs one with a different action.
    #[tracing::instrument(skip(self, schedules), fields(count = schedules.len()))]
    pub async fn resolve(&self, schedules: &[Schedule], today: CivilDate) -> Resolution {
        let mut device_order: Vec<DeviceId> = Vec::new();
        let mut windows_by_device: HashMap<DeviceId, Vec<RawWindow>> = HashMap::new();

        for schedule in schedules {
            if !schedule.applies_on(today) {
                continue;
            }
            if let Err(err) = schedule.validate() {
                tracing::warn!(schedule = %schedule.name, %err, "skipping invalid schedule");
                continue;
            }
            let ScheduleConfig::TimeSlots { slots, action, .. } = &schedule.config else {
                continue;
            };
            for device_id in &schedule.device_ids {
                if !windows_by_device.contains_key(device_id) {
                    device_order.push(*device_id);
                }
                let windows = windows_by_device.entry(*device_id).or_default();
                for slot in slots {
                    windows.push(RawWindow {
                        slot: slot.clone(),
                        action: *action,
                        schedule_id: schedule.id,
                        schedule_name: schedule.name.clone(),
                    });
                }
            }
        }

        let mut resolution = Resolution::default();
        for device_id in device_order {
            let Some(windows) = windows_by_device.remove(&device_id) else {
                continue;
            };
            let device_name = self.device_name(device_id).await;

            resolution
                .conflicts
                .extend(detect_conflicts(device_id, &device_name, &windows));

            let mut slots = Vec::new();
            for action in DeviceAction::ALL {
                let subset: Vec<RawWindow> = windows
                    .iter()
                    .filter(|window| window.action == action)
                    .cloned()
                    .collect();
                slots.extend(merge_adjacent_windows(&subset));
            }
            slots.sort_by_key(|slot| slot.slot.start_minute());

            resolution.effective_schedules.push(EffectiveDeviceSchedule {
                device_id,
                device_name,
                slots,
            });
        }
        resolution
    }

    /// Display name from the directory, falling back to the raw id.
    async fn device_name(&self, device_id: DeviceId) -> String {
        match self.directory.get_name(device_id).await {
            Ok(Some(name)) => name,
            Ok(None) => device_id.to_string(),
            Err(err) => {
                tracing::warn!(%device_id, %err, "device name lookup failed");
                device_id.to_string()
            }
        }
    }
}
