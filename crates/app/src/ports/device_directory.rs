//! Device directory port — names and reachability of switchable devices.

use std::future::Future;

use spotswitch_domain::device::DeviceStatus;
use spotswitch_domain::error::SpotSwitchError;
use spotswitch_domain::id::DeviceId;

/// Lookup of device metadata kept by the installation.
pub trait DeviceDirectory {
    /// Get a device's display name, or `None` for an unknown device.
    fn get_name(
        &self,
        device_id: DeviceId,
    ) -> impl Future<Output = Result<Option<String>, SpotSwitchError>> + Send;

    /// Record whether a device answered its last switching attempt.
    fn set_status(
        &self,
        device_id: DeviceId,
        status: DeviceStatus,
    ) -> impl Future<Output = Result<(), SpotSwitchError>> + Send;
}
