use crate::schedule::{DeviceAction, TimeSlot, adjacent, adjusted_end, time_to_minutes};
use crate::timeline::{EffectiveSlot, RawWindow, SourceSchedule};

/// Fold one device's same-action windows into effective slots.
///
/// Windows are ordered by start minute, then absorbed left to right:
/// a window starting exactly where the current slot ends extends it,
/// and a window sharing the current start collapses into it, keeping
/// the longer span. Overlapping windows that are neither stay
/// separate slots. Every absorbed window's schedule is recorded as a
/// source, each schedule once.
///
/// Callers pass windows of a single action value.
#[must_use]
pub fn merge_adjacent_windows(windows: &[RawWindow]) -> Vec<EffectiveSlot> {
    let mut ordered: Vec<&RawWindow> = windows.iter().collect();
    ordered.sort_by_key(|window| window.slot.start_minute());

    let mut merged = Vec::new();
    let mut current: Option<Accumulator> = None;
    for window in ordered {
        if let Some(acc) = current.as_mut() {
            if acc.try_absorb(window) {
                continue;
            }
        }
        if let Some(acc) = current.take() {
            merged.push(acc.finish());
        }
        current = Some(Accumulator::start(window));
    }
    if let Some(acc) = current {
        merged.push(acc.finish());
    }
    merged
}

struct Accumulator {
    start: String,
    end: String,
    start_minute: i32,
    action: DeviceAction,
    sources: Vec<SourceSchedule>,
}

impl Accumulator {
    fn start(window: &RawWindow) -> Self {
        Self {
            start: window.slot.start.clone(),
            end: window.slot.end.clone(),
            start_minute: window.slot.start_minute(),
            action: window.action,
            sources: vec![SourceSchedule {
                id: window.schedule_id,
                name: window.schedule_name.clone(),
            }],
        }
    }

    fn end_minute_adjusted(&self) -> i32 {
        adjusted_end(self.start_minute, time_to_minutes(&self.end))
    }

    fn try_absorb(&mut self, window: &RawWindow) -> bool {
        if window.slot.start_minute() == self.start_minute {
            if window.slot.end_minute_adjusted() > self.end_minute_adjusted() {
                self.end.clone_from(&window.slot.end);
            }
            self.add_source(window);
            return true;
        }
        if adjacent(&self.end, &window.slot.start) {
            self.end.clone_from(&window.slot.end);
            self.add_source(window);
            return true;
        }
        false
    }

    fn add_source(&mut self, window: &RawWindow) {
        if self.sources.iter().all(|source| source.id != window.schedule_id) {
            self.sources.push(SourceSchedule {
                id: window.schedule_id,
                name: window.schedule_name.clone(),
            });
        }
    }

    fn finish(self) -> EffectiveSlot {
        EffectiveSlot {
            slot: TimeSlot::new(self.start, self.end),
            action: self.action,
            source_schedules: self.sources,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::merge_adjacent_windows;
    use crate::id::ScheduleId;
    use crate::schedule::{DeviceAction, TimeSlot};
    use crate::timeline::RawWindow;

    fn window(start: &str, end: &str, schedule_id: ScheduleId, name: &str) -> RawWindow {
        RawWindow {
            slot: TimeSlot::new(start, end),
            action: DeviceAction::On,
            schedule_id,
            schedule_name: name.to_string(),
        }
    }

    #[test]
    fn should_merge_chain_of_adjacent_windows() {
        let first = ScheduleId::new();
        let second = ScheduleId::new();
        let windows = vec![
            window("10:00", "10:30", first, "First"),
            window("10:30", "11:00", second, "Second"),
            window("11:00", "11:30", first, "First"),
        ];
        let merged = merge_adjacent_windows(&windows);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].slot, TimeSlot::new("10:00", "11:30"));
        assert_eq!(merged[0].source_schedules.len(), 2);
    }

    #[test]
    fn should_keep_non_adjacent_windows_separate() {
        let id = ScheduleId::new();
        let windows = vec![
            window("10:00", "10:30", id, "First"),
            window("11:00", "11:30", id, "First"),
        ];
        let merged = merge_adjacent_windows(&windows);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].slot, TimeSlot::new("10:00", "10:30"));
        assert_eq!(merged[1].slot, TimeSlot::new("11:00", "11:30"));
    }

    #[test]
    fn should_not_merge_overlapping_windows() {
        let windows = vec![
            window("10:00", "11:00", ScheduleId::new(), "First"),
            window("10:30", "11:30", ScheduleId::new(), "Second"),
        ];
        let merged = merge_adjacent_windows(&windows);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].slot, TimeSlot::new("10:00", "11:00"));
        assert_eq!(merged[1].slot, TimeSlot::new("10:30", "11:30"));
    }

    #[test]
    fn should_collapse_same_start_windows_keeping_longer() {
        let first = ScheduleId::new();
        let second = ScheduleId::new();
        let windows = vec![
            window("10:00", "10:30", first, "Short"),
            window("10:00", "11:00", second, "Long"),
        ];
        let merged = merge_adjacent_windows(&windows);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].slot, TimeSlot::new("10:00", "11:00"));
        assert_eq!(merged[0].source_schedules.len(), 2);
    }

    #[test]
    fn should_sort_windows_before_merging() {
        let id = ScheduleId::new();
        let windows = vec![
            window("11:00", "11:30", id, "First"),
            window("10:00", "10:30", id, "First"),
            window("10:30", "11:00", id, "First"),
        ];
        let merged = merge_adjacent_windows(&windows);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].slot, TimeSlot::new("10:00", "11:30"));
    }

    #[test]
    fn should_record_each_source_schedule_once() {
        let id = ScheduleId::new();
        let windows = vec![
            window("10:00", "10:30", id, "Repeated"),
            window("10:30", "11:00", id, "Repeated"),
        ];
        let merged = merge_adjacent_windows(&windows);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].source_schedules.len(), 1);
        assert_eq!(merged[0].source_schedules[0].name, "Repeated");
    }

    #[test]
    fn should_extend_past_midnight_on_adjacency() {
        let windows = vec![
            window("22:00", "23:00", ScheduleId::new(), "Evening"),
            window("23:00", "00:30", ScheduleId::new(), "Night"),
        ];
        let merged = merge_adjacent_windows(&windows);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].slot, TimeSlot::new("22:00", "00:30"));
    }

    #[test]
    fn should_yield_nothing_for_empty_input() {
        assert!(merge_adjacent_windows(&[]).is_empty());
    }
}
