use serde::{Deserialize, Serialize};

/// What a schedule does to its devices when a window opens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceAction {
    /// Switch the device on. Windows with this action are switched off
    /// again when they close.
    #[default]
    On,
    /// Switch the device off.
    Off,
    /// Flip the device's current power state.
    Toggle,
}

impl DeviceAction {
    /// Every action value, in a fixed order.
    pub const ALL: [Self; 3] = [Self::On, Self::Off, Self::Toggle];
}

impl std::fmt::Display for DeviceAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::On => write!(f, "on"),
            Self::Off => write!(f, "off"),
            Self::Toggle => write!(f, "toggle"),
        }
    }
}
