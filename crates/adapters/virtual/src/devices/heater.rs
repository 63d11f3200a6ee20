//! Virtual heater — a resistive load that heats while on.

use spotswitch_domain::device::PowerState;
use spotswitch_domain::schedule::DeviceAction;

use crate::devices::apply_action;

/// A simulated electric heater.
pub struct VirtualHeater {
    name: String,
    rated_watts: u32,
    power: PowerState,
}

impl VirtualHeater {
    /// Create a heater, switched off.
    #[must_use]
    pub fn new(name: impl Into<String>, rated_watts: u32) -> Self {
        Self {
            name: name.into(),
            rated_watts,
            power: PowerState::Off,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn power(&self) -> PowerState {
        self.power
    }

    /// Heat emitted right now.
    #[must_use]
    pub fn heat_output_watts(&self) -> u32 {
        if self.power.is_on() { self.rated_watts } else { 0 }
    }

    pub fn switch(&mut self, action: DeviceAction) -> PowerState {
        self.power = apply_action(self.power, action);
        self.power
    }
}
