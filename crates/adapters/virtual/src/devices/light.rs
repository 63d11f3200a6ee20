//! Virtual light — switches between dark and full brightness.

use spotswitch_domain::device::PowerState;
use spotswitch_domain::schedule::DeviceAction;

use crate::devices::apply_action;

/// A simulated light.
pub struct VirtualLight {
    name: String,
    power: PowerState,
}

impl VirtualLight {
    /// Create a light, switched off.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
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

    /// Brightness in percent.
    #[must_use]
    pub fn brightness(&self) -> u8 {
        if self.power.is_on() { 100 } else { 0 }
    }

    pub fn switch(&mut self, action: DeviceAction) -> PowerState {
        self.power = apply_action(self.power, action);
        self.power
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_be_dark_while_off() {
        let light = VirtualLight::new("Hallway light");
        assert_eq!(light.brightness(), 0);
    }

    #[test]
    fn should_shine_at_full_brightness_while_on() {
        let mut light = VirtualLight::new("Hallway light");
        light.switch(DeviceAction::On);
        assert_eq!(light.brightness(), 100);
    }

    #[test]
    fn should_toggle_from_off_to_on() {
        let mut light = VirtualLight::new("Hallway light");
        assert_eq!(light.switch(DeviceAction::Toggle), PowerState::On);
    }
}
