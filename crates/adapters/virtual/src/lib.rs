//! # spotswitch-adapter-virtual
//!
//! Virtual fleet of simulated devices for demos and tests.
//!
//! The registry implements both device-facing ports: it answers name
//! lookups as the [`DeviceDirectory`] and switches its simulated
//! devices as the [`DeviceActuator`]. Devices can be marked
//! unreachable to rehearse failure handling without real hardware.
//!
//! ## Provided devices
//!
//! | Device | Behaviour |
//! |--------|-----------|
//! | [`VirtualPlug`] | On/off, draws its rated wattage while on |
//! | [`VirtualHeater`] | On/off, emits its rated heat while on |
//! | [`VirtualLight`] | On/off, full brightness while on |
//!
//! ## Dependency rule
//!
//! Depends on `spotswitch-app` (port traits) and `spotswitch-domain` only.

mod devices;

pub use devices::{VirtualDevice, VirtualHeater, VirtualLight, VirtualPlug};

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use spotswitch_app::ports::{DeviceActuator, DeviceDirectory};
use spotswitch_domain::device::{DeviceStatus, PowerState};
use spotswitch_domain::error::{ActuationError, SpotSwitchError};
use spotswitch_domain::id::DeviceId;
use spotswitch_domain::schedule::DeviceAction;

/// Registry owning a fleet of simulated devices.
///
/// Cheap to clone; clones share the same fleet.
#[derive(Clone, Default)]
pub struct VirtualDeviceRegistry {
    inner: Arc<RegistryInner>,
}

#[derive(Default)]
struct RegistryInner {
    devices: Mutex<HashMap<DeviceId, VirtualDevice>>,
    unreachable: Mutex<HashSet<DeviceId>>,
    statuses: Mutex<HashMap<DeviceId, DeviceStatus>>,
}

impl VirtualDeviceRegistry {
    /// Add a device to the fleet and return its assigned id.
    pub fn register(&self, device: VirtualDevice) -> DeviceId {
        let device_id = DeviceId::new();
        self.lock_devices().insert(device_id, device);
        device_id
    }

    /// Simulate the device (dis)appearing from the network.
    pub fn set_reachable(&self, device_id: DeviceId, reachable: bool) {
        let mut unreachable = self.lock_unreachable();
        if reachable {
            unreachable.remove(&device_id);
        } else {
            unreachable.insert(device_id);
        }
    }

    /// Look a device up by its display name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<DeviceId> {
        self.lock_devices()
            .iter()
            .find(|(_, device)| device.name() == name)
            .map(|(id, _)| *id)
    }

    /// Current power state of a device, `None` for unknown ids.
    #[must_use]
    pub fn power(&self, device_id: DeviceId) -> Option<PowerState> {
        self.lock_devices().get(&device_id).map(VirtualDevice::power)
    }

    /// Last recorded reachability status, `None` before the first
    /// switching attempt.
    #[must_use]
    pub fn status(&self, device_id: DeviceId) -> Option<DeviceStatus> {
        self.lock_statuses().get(&device_id).copied()
    }

    #[must_use]
    pub fn device_count(&self) -> usize {
        self.lock_devices().len()
    }

    fn try_actuate(
        &self,
        device_id: DeviceId,
        action: DeviceAction,
    ) -> Result<PowerState, ActuationError> {
        if self.lock_unreachable().contains(&device_id) {
            return Err(ActuationError {
                device_id,
                message: "device is unreachable".to_string(),
            });
        }
        let mut devices = self.lock_devices();
        let Some(device) = devices.get_mut(&device_id) else {
            return Err(ActuationError {
                device_id,
                message: "unknown device".to_string(),
            });
        };
        Ok(device.switch(action))
    }

    fn lock_devices(&self) -> MutexGuard<'_, HashMap<DeviceId, VirtualDevice>> {
        self.inner
            .devices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_unreachable(&self) -> MutexGuard<'_, HashSet<DeviceId>> {
        self.inner
            .unreachable
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_statuses(&self) -> MutexGuard<'_, HashMap<DeviceId, DeviceStatus>> {
        self.inner
            .statuses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl DeviceDirectory for VirtualDeviceRegistry {
    fn get_name(
        &self,
        device_id: DeviceId,
    ) -> impl Future<Output = Result<Option<String>, SpotSwitchError>> + Send {
        let name = self
            .lock_devices()
            .get(&device_id)
            .map(|device| device.name().to_string());
        async { Ok(name) }
    }

    fn set_status(
        &self,
        device_id: DeviceId,
        status: DeviceStatus,
    ) -> impl Future<Output = Result<(), SpotSwitchError>> + Send {
        self.lock_statuses().insert(device_id, status);
        async { Ok(()) }
    }
}

impl DeviceActuator for VirtualDeviceRegistry {
    fn actuate(
        &self,
        device_id: DeviceId,
        action: DeviceAction,
    ) -> impl Future<Output = Result<PowerState, ActuationError>> + Send {
        let result = self.try_actuate(device_id, action);
        async move { result }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with_plug() -> (VirtualDeviceRegistry, DeviceId) {
        let registry = VirtualDeviceRegistry::default();
        let id = registry.register(VirtualDevice::Plug(VirtualPlug::new("Sauna plug", 2000)));
        (registry, id)
    }

    #[tokio::test]
    async fn should_switch_registered_device_on() {
        let (registry, id) = registry_with_plug();
        let state = registry.actuate(id, DeviceAction::On).await.unwrap();
        assert_eq!(state, PowerState::On);
        assert_eq!(registry.power(id), Some(PowerState::On));
    }

    #[tokio::test]
    async fn should_resolve_toggle_against_device_state() {
        let (registry, id) = registry_with_plug();
        assert_eq!(
            registry.actuate(id, DeviceAction::Toggle).await.unwrap(),
            PowerState::On
        );
        assert_eq!(
            registry.actuate(id, DeviceAction::Toggle).await.unwrap(),
            PowerState::Off
        );
    }

    #[tokio::test]
    async fn should_fail_for_unknown_device() {
        let registry = VirtualDeviceRegistry::default();
        let result = registry.actuate(DeviceId::new(), DeviceAction::On).await;
        let err = result.unwrap_err();
        assert!(err.to_string().contains("unknown device"));
    }

    #[tokio::test]
    async fn should_fail_for_unreachable_device() {
        let (registry, id) = registry_with_plug();
        registry.set_reachable(id, false);

        let err = registry.actuate(id, DeviceAction::On).await.unwrap_err();
        assert!(err.to_string().contains("unreachable"));
        // The device state is untouched.
        assert_eq!(registry.power(id), Some(PowerState::Off));
    }

    #[tokio::test]
    async fn should_recover_when_reachable_again() {
        let (registry, id) = registry_with_plug();
        registry.set_reachable(id, false);
        assert!(registry.actuate(id, DeviceAction::On).await.is_err());

        registry.set_reachable(id, true);
        assert!(registry.actuate(id, DeviceAction::On).await.is_ok());
    }

    #[tokio::test]
    async fn should_answer_name_lookups() {
        let (registry, id) = registry_with_plug();
        let name = registry.get_name(id).await.unwrap();
        assert_eq!(name.as_deref(), Some("Sauna plug"));

        let missing = registry.get_name(DeviceId::new()).await.unwrap();
        assert_eq!(missing, None);
    }

    #[tokio::test]
    async fn should_record_device_status() {
        let (registry, id) = registry_with_plug();
        assert_eq!(registry.status(id), None);

        registry.set_status(id, DeviceStatus::Offline).await.unwrap();
        assert_eq!(registry.status(id), Some(DeviceStatus::Offline));

        registry.set_status(id, DeviceStatus::Online).await.unwrap();
        assert_eq!(registry.status(id), Some(DeviceStatus::Online));
    }

    #[test]
    fn should_find_devices_by_name() {
        let registry = VirtualDeviceRegistry::default();
        let heater = registry.register(VirtualDevice::Heater(VirtualHeater::new(
            "Bathroom heater",
            1200,
        )));
        registry.register(VirtualDevice::Light(VirtualLight::new("Hallway light")));

        assert_eq!(registry.find_by_name("Bathroom heater"), Some(heater));
        assert_eq!(registry.find_by_name("Garage door"), None);
        assert_eq!(registry.device_count(), 2);
    }

    #[test]
    fn should_share_fleet_between_clones() {
        let registry = VirtualDeviceRegistry::default();
        let clone = registry.clone();
        let id = registry.register(VirtualDevice::Light(VirtualLight::new("Hallway light")));
        assert_eq!(clone.find_by_name("Hallway light"), Some(id));
    }
}
