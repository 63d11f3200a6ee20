//! Virtual device implementations — plug, heater, light.
//!
//! Devices are plain state machines; the registry serializes access
//! to them, so switching takes `&mut self`.

mod heater;
mod light;
mod plug;

pub use heater::VirtualHeater;
pub use light::VirtualLight;
pub use plug::VirtualPlug;

use spotswitch_domain::device::PowerState;
use spotswitch_domain::schedule::DeviceAction;

/// Wrapper enum for the concrete virtual device types.
pub enum VirtualDevice {
    Plug(VirtualPlug),
    Heater(VirtualHeater),
    Light(VirtualLight),
}

impl VirtualDevice {
    /// Display name the device was created with.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Plug(d) => d.name(),
            Self::Heater(d) => d.name(),
            Self::Light(d) => d.name(),
        }
    }

    /// Current power state.
    #[must_use]
    pub fn power(&self) -> PowerState {
        match self {
            Self::Plug(d) => d.power(),
            Self::Heater(d) => d.power(),
            Self::Light(d) => d.power(),
        }
    }

    /// Apply an action, returning the resulting power state.
    pub fn switch(&mut self, action: DeviceAction) -> PowerState {
        match self {
            Self::Plug(d) => d.switch(action),
            Self::Heater(d) => d.switch(action),
            Self::Light(d) => d.switch(action),
        }
    }
}

/// Resolve an action against a device's current power state.
pub(crate) fn apply_action(current: PowerState, action: DeviceAction) -> PowerState {
    match action {
        DeviceAction::On => PowerState::On,
        DeviceAction::Off => PowerState::Off,
        DeviceAction::Toggle => current.inverted(),
    }
}
