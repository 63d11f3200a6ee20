//! Schedules — named switching plans binding devices to time windows.

mod action;
mod config;
mod slot;

pub use action::DeviceAction;
pub use config::{Repeat, ScheduleConfig};
pub use slot::{
    MINUTES_PER_DAY, TimeSlot, adjacent, adjusted_end, is_valid_time, minutes_to_time,
    overlap_range, ranges_overlap, time_to_minutes,
};

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::{DeviceId, ScheduleId};
use crate::time::{CivilDate, Timestamp, now};

/// A user-defined switching plan for one or more devices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: ScheduleId,
    pub name: String,
    pub device_ids: Vec<DeviceId>,
    pub enabled: bool,
    pub config: ScheduleConfig,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Schedule {
    #[must_use]
    pub fn builder() -> ScheduleBuilder {
        ScheduleBuilder::default()
    }

    /// Check the schedule's structural invariants.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the name is empty, no device
    /// is targeted, a time-slot config has no slots or a malformed
    /// boundary, or a single-shot schedule carries no date.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.device_ids.is_empty() {
            return Err(ValidationError::NoDevices);
        }
        if let ScheduleConfig::TimeSlots {
            slots,
            repeat,
            date,
            ..
        } = &self.config
        {
            if slots.is_empty() {
                return Err(ValidationError::NoTimeSlots);
            }
            for slot in slots {
                slot.validate()?;
            }
            if *repeat == Repeat::Once && date.is_none() {
                return Err(ValidationError::MissingDate);
            }
        }
        Ok(())
    }

    /// Whether this schedule drives switching on the given date.
    ///
    /// Only enabled time-slot schedules apply: daily ones on every
    /// date, single-shot ones on their recorded date alone. Other
    /// config kinds never produce windows.
    #[must_use]
    pub fn applies_on(&self, today: CivilDate) -> bool {
        if !self.enabled {
            return false;
        }
        match &self.config {
            ScheduleConfig::TimeSlots { repeat, date, .. } => match repeat {
                Repeat::Daily => true,
                Repeat::Once => *date == Some(today),
            },
            _ => false,
        }
    }
}

#[derive(Debug, Default)]
pub struct ScheduleBuilder {
    id: Option<ScheduleId>,
    name: String,
    device_ids: Vec<DeviceId>,
    enabled: Option<bool>,
    config: Option<ScheduleConfig>,
}

impl ScheduleBuilder {
    #[must_use]
    pub fn id(mut self, id: ScheduleId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Add one target device.
    #[must_use]
    pub fn device_id(mut self, device_id: DeviceId) -> Self {
        self.device_ids.push(device_id);
        self
    }

    /// Replace the target device list.
    #[must_use]
    pub fn device_ids(mut self, device_ids: Vec<DeviceId>) -> Self {
        self.device_ids = device_ids;
        self
    }

    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    #[must_use]
    pub fn config(mut self, config: ScheduleConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build and validate the schedule.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the assembled schedule
    /// violates an invariant, see [`Schedule::validate`].
    pub fn build(self) -> Result<Schedule, ValidationError> {
        let timestamp = now();
        let schedule = Schedule {
            id: self.id.unwrap_or_default(),
            name: self.name,
            device_ids: self.device_ids,
            enabled: self.enabled.unwrap_or(true),
            config: self.config.unwrap_or(ScheduleConfig::TimeSlots {
                slots: Vec::new(),
                action: DeviceAction::On,
                repeat: Repeat::Daily,
                date: None,
            }),
            created_at: timestamp,
            updated_at: timestamp,
        };
        schedule.validate()?;
        Ok(schedule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time_slots(slots: Vec<TimeSlot>) -> ScheduleConfig {
        ScheduleConfig::TimeSlots {
            slots,
            action: DeviceAction::On,
            repeat: Repeat::Daily,
            date: None,
        }
    }

    #[test]
    fn should_build_valid_schedule() {
        let device_id = DeviceId::new();
        let schedule = Schedule::builder()
            .name("Morning heating")
            .device_id(device_id)
            .config(time_slots(vec![TimeSlot::new("06:00", "08:30")]))
            .build()
            .unwrap();
        assert_eq!(schedule.name, "Morning heating");
        assert_eq!(schedule.device_ids, vec![device_id]);
        assert!(schedule.enabled);
        assert_eq!(schedule.created_at, schedule.updated_at);
    }

    #[test]
    fn should_reject_empty_name() {
        let result = Schedule::builder()
            .name("   ")
            .device_id(DeviceId::new())
            .config(time_slots(vec![TimeSlot::new("06:00", "08:30")]))
            .build();
        assert_eq!(result.unwrap_err(), ValidationError::EmptyName);
    }

    #[test]
    fn should_reject_schedule_without_devices() {
        let result = Schedule::builder()
            .name("Morning heating")
            .config(time_slots(vec![TimeSlot::new("06:00", "08:30")]))
            .build();
        assert_eq!(result.unwrap_err(), ValidationError::NoDevices);
    }

    #[test]
    fn should_reject_time_slot_schedule_without_slots() {
        let result = Schedule::builder()
            .name("Morning heating")
            .device_id(DeviceId::new())
            .build();
        assert_eq!(result.unwrap_err(), ValidationError::NoTimeSlots);
    }

    #[test]
    fn should_reject_malformed_slot_boundary() {
        let result = Schedule::builder()
            .name("Morning heating")
            .device_id(DeviceId::new())
            .config(time_slots(vec![TimeSlot::new("06:00", "25:00")]))
            .build();
        assert_eq!(
            result.unwrap_err(),
            ValidationError::InvalidTime {
                value: "25:00".to_string()
            }
        );
    }

    #[test]
    fn should_reject_single_shot_schedule_without_date() {
        let result = Schedule::builder()
            .name("Boost")
            .device_id(DeviceId::new())
            .config(ScheduleConfig::TimeSlots {
                slots: vec![TimeSlot::new("06:00", "08:30")],
                action: DeviceAction::On,
                repeat: Repeat::Once,
                date: None,
            })
            .build();
        assert_eq!(result.unwrap_err(), ValidationError::MissingDate);
    }

    #[test]
    fn should_accept_price_threshold_schedule() {
        let schedule = Schedule::builder()
            .name("Cheap power")
            .device_id(DeviceId::new())
            .config(ScheduleConfig::PriceThreshold {
                max_price_cents: 4.5,
                action: DeviceAction::On,
            })
            .build()
            .unwrap();
        assert_eq!(schedule.config.kind(), "price_threshold");
    }

    #[test]
    fn should_replace_device_list() {
        let devices = vec![DeviceId::new(), DeviceId::new()];
        let schedule = Schedule::builder()
            .name("Morning heating")
            .device_id(DeviceId::new())
            .device_ids(devices.clone())
            .config(time_slots(vec![TimeSlot::new("06:00", "08:30")]))
            .build()
            .unwrap();
        assert_eq!(schedule.device_ids, devices);
    }

    #[test]
    fn should_apply_daily_schedule_on_any_date() {
        let schedule = Schedule::builder()
            .name("Morning heating")
            .device_id(DeviceId::new())
            .config(time_slots(vec![TimeSlot::new("06:00", "08:30")]))
            .build()
            .unwrap();
        let today = CivilDate::from_ymd_opt(2026, 6, 15).unwrap();
        assert!(schedule.applies_on(today));
    }

    #[test]
    fn should_apply_single_shot_schedule_on_its_date_only() {
        let date = CivilDate::from_ymd_opt(2026, 6, 15).unwrap();
        let schedule = Schedule::builder()
            .name("Boost")
            .device_id(DeviceId::new())
            .config(ScheduleConfig::TimeSlots {
                slots: vec![TimeSlot::new("06:00", "08:30")],
                action: DeviceAction::On,
                repeat: Repeat::Once,
                date: Some(date),
            })
            .build()
            .unwrap();
        assert!(schedule.applies_on(date));
        assert!(!schedule.applies_on(date.succ_opt().unwrap()));
    }

    #[test]
    fn should_not_apply_disabled_schedule() {
        let schedule = Schedule::builder()
            .name("Morning heating")
            .device_id(DeviceId::new())
            .enabled(false)
            .config(time_slots(vec![TimeSlot::new("06:00", "08:30")]))
            .build()
            .unwrap();
        let today = CivilDate::from_ymd_opt(2026, 6, 15).unwrap();
        assert!(!schedule.applies_on(today));
    }

    #[test]
    fn should_not_apply_price_driven_schedule() {
        let schedule = Schedule::builder()
            .name("Cheap power")
            .device_id(DeviceId::new())
            .config(ScheduleConfig::CheapestHours {
                hours: 6,
                action: DeviceAction::On,
            })
            .build()
            .unwrap();
        let today = CivilDate::from_ymd_opt(2026, 6, 15).unwrap();
        assert!(!schedule.applies_on(today));
    }

    #[test]
    fn should_roundtrip_schedule_through_serde_json() {
        let schedule = Schedule::builder()
            .name("Morning heating")
            .device_id(DeviceId::new())
            .config(time_slots(vec![TimeSlot::new("06:00", "08:30")]))
            .build()
            .unwrap();
        let json = serde_json::to_string(&schedule).unwrap();
        let parsed: Schedule = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, schedule);
    }
}
