//! Actuator port — the driver that physically switches devices.

use std::future::Future;

use spotswitch_domain::device::PowerState;
use spotswitch_domain::error::ActuationError;
use spotswitch_domain::id::DeviceId;
use spotswitch_domain::schedule::DeviceAction;

/// Driver applying power actions to devices.
///
/// The actuator holds no scheduling state. It is told which action to
/// apply and answers with the power state the device ended up in, so a
/// `toggle` resolves against the device's own state.
pub trait DeviceActuator {
    /// Apply an action to a device.
    fn actuate(
        &self,
        device_id: DeviceId,
        action: DeviceAction,
    ) -> impl Future<Output = Result<PowerState, ActuationError>> + Send;
}
