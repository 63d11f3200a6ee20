use crate::id::DeviceId;
use crate::schedule::{TimeSlot, minutes_to_time, overlap_range};
use crate::timeline::{ConflictingAction, RawWindow, ScheduleConflict};

/// Report every minute range where one device's windows demand
/// differing actions.
///
/// Windows are compared pairwise. Each overlapping pair with differing
/// actions yields the exact intersection of the two windows; pairs
/// landing on an already-reported range fold into that record instead
/// of duplicating it. Within a record each schedule appears once.
#[must_use]
pub fn detect_conflicts(
    device_id: DeviceId,
    device_name: &str,
    windows: &[RawWindow],
) -> Vec<ScheduleConflict> {
    let mut conflicts: Vec<ScheduleConflict> = Vec::new();
    for (index, first) in windows.iter().enumerate() {
        for second in &windows[index + 1..] {
            if first.action == second.action {
                continue;
            }
            let Some((start, end)) = overlap_range(
                first.slot.start_minute(),
                first.slot.end_minute(),
                second.slot.start_minute(),
                second.slot.end_minute(),
            ) else {
                continue;
            };
            let time_slot = TimeSlot::new(minutes_to_time(start), minutes_to_time(end));
            let found = conflicts
                .iter()
                .position(|conflict| conflict.time_slot == time_slot);
            let position = match found {
                Some(position) => position,
                None => {
                    conflicts.push(ScheduleConflict {
                        device_id,
                        device_name: device_name.to_string(),
                        time_slot,
                        conflicting_actions: Vec::new(),
                    });
                    conflicts.len() - 1
                }
            };
            push_action(&mut conflicts[position], first);
            push_action(&mut conflicts[position], second);
        }
    }
    conflicts
}

fn push_action(conflict: &mut ScheduleConflict, window: &RawWindow) {
    if conflict
        .conflicting_actions
        .iter()
        .all(|action| action.schedule_id != window.schedule_id)
    {
        conflict.conflicting_actions.push(ConflictingAction {
            schedule_id: window.schedule_id,
            schedule_name: window.schedule_name.clone(),
            action: window.action,
        });
    }
}
