//! Seed file loading — the virtual fleet and its schedules from TOML.
//!
//! The store is in-memory, so the daemon reads its devices and
//! schedules from a seed file at startup. Schedules reference devices
//! by display name; names that do not resolve are logged and dropped
//! rather than failing the whole startup.

use serde::Deserialize;

use spotswitch_adapter_virtual::{
    VirtualDevice, VirtualDeviceRegistry, VirtualHeater, VirtualLight, VirtualPlug,
};
use spotswitch_domain::id::DeviceId;
use spotswitch_domain::schedule::{DeviceAction, Repeat, Schedule, ScheduleConfig, TimeSlot};
use spotswitch_domain::time::CivilDate;

const DEFAULT_PLUG_WATTS: u32 = 1500;
const DEFAULT_HEATER_WATTS: u32 = 1000;

/// The parsed seed file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SeedFile {
    pub devices: Vec<DeviceSeed>,
    pub schedules: Vec<ScheduleSeed>,
}

/// One simulated device.
#[derive(Debug, Deserialize)]
pub struct DeviceSeed {
    pub kind: DeviceKind,
    pub name: String,
    /// Rated load, where the device kind has one.
    #[serde(default)]
    pub watts: Option<u32>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Plug,
    Heater,
    Light,
}

/// One schedule, bound to devices by display name.
#[derive(Debug, Deserialize)]
pub struct ScheduleSeed {
    pub name: String,
    pub devices: Vec<String>,
    pub action: DeviceAction,
    #[serde(default)]
    pub repeat: Repeat,
    /// Date for single-shot schedules, `YYYY-MM-DD` as a string.
    #[serde(default)]
    pub date: Option<CivilDate>,
    pub slots: Vec<TimeSlot>,
}

/// Seed file errors.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// TOML parse failure.
    #[error("failed to parse seed file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read seed file")]
    Io(#[from] std::io::Error),
}

/// Read the seed file, treating a missing file as an empty seed.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load(path: &str) -> Result<SeedFile, SeedError> {
    match std::fs::read_to_string(path) {
        Ok(content) => toml::from_str(&content).map_err(SeedError::Parse),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(SeedFile::default()),
        Err(err) => Err(SeedError::Io(err)),
    }
}

/// Register every seeded device with the registry.
pub fn build_fleet(seed: &SeedFile, registry: &VirtualDeviceRegistry) {
    for device in &seed.devices {
        let virtual_device = match device.kind {
            DeviceKind::Plug => VirtualDevice::Plug(VirtualPlug::new(
                &device.name,
                device.watts.unwrap_or(DEFAULT_PLUG_WATTS),
            )),
            DeviceKind::Heater => VirtualDevice::Heater(VirtualHeater::new(
                &device.name,
                device.watts.unwrap_or(DEFAULT_HEATER_WATTS),
            )),
            DeviceKind::Light => VirtualDevice::Light(VirtualLight::new(&device.name)),
        };
        registry.register(virtual_device);
    }
}

/// Turn seeded schedules into domain schedules, resolving device names
/// against the registry. Unresolvable names and invalid schedules are
/// logged and skipped.
pub fn build_schedules(seed: &SeedFile, registry: &VirtualDeviceRegistry) -> Vec<Schedule> {
    let mut schedules = Vec::new();
    for entry in &seed.schedules {
        let device_ids: Vec<DeviceId> = entry
            .devices
            .iter()
            .filter_map(|name| {
                let found = registry.find_by_name(name);
                if found.is_none() {
                    tracing::warn!(schedule = %entry.name, device = %name, "unknown device in seed file");
                }
                found
            })
            .collect();

        let result = Schedule::builder()
            .name(&entry.name)
            .device_ids(device_ids)
            .config(ScheduleConfig::TimeSlots {
                slots: entry.slots.clone(),
                action: entry.action,
                repeat: entry.repeat,
                date: entry.date,
            })
            .build();
        match result {
            Ok(schedule) => schedules.push(schedule),
            Err(err) => {
                tracing::warn!(schedule = %entry.name, %err, "skipping seeded schedule");
            }
        }
    }
    schedules
}
