use serde::{Deserialize, Serialize};

use crate::schedule::{DeviceAction, TimeSlot};
use crate::time::CivilDate;

/// How often a schedule applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Repeat {
    /// Single-shot on a specific date; disabled after its first start.
    Once,
    /// Applies every day.
    #[default]
    Daily,
}

impl std::fmt::Display for Repeat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Once => write!(f, "once"),
            Self::Daily => write!(f, "daily"),
        }
    }
}

/// What a schedule switches on, and when.
///
/// Only [`ScheduleConfig::TimeSlots`] produces switching windows today.
/// The price-driven kinds are carried in the data model so stored
/// schedules round-trip, but the resolver ignores them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScheduleConfig {
    /// Explicit HH:MM windows with a shared action.
    TimeSlots {
        slots: Vec<TimeSlot>,
        action: DeviceAction,
        #[serde(default)]
        repeat: Repeat,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        date: Option<CivilDate>,
    },
    /// Act whenever the spot price stays below a ceiling.
    PriceThreshold {
        max_price_cents: f64,
        action: DeviceAction,
    },
    /// Act during the cheapest hours of the day.
    CheapestHours { hours: u8, action: DeviceAction },
    /// Act within a bounded part of the day.
    TimeRange {
        start: String,
        end: String,
        action: DeviceAction,
    },
}

impl ScheduleConfig {
    /// Stable lowercase tag, matching the serialized `type` field.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TimeSlots { .. } => "time_slots",
            Self::PriceThreshold { .. } => "price_threshold",
            Self::CheapestHours { .. } => "cheapest_hours",
            Self::TimeRange { .. } => "time_range",
        }
    }
}
