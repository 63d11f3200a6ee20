//! Schedule store port — persistence for schedules and the execution log.

use std::future::Future;

use spotswitch_domain::error::SpotSwitchError;
use spotswitch_domain::execution_log::ExecutionLogEntry;
use spotswitch_domain::id::ScheduleId;
use spotswitch_domain::schedule::Schedule;

/// Store for persisting [`Schedule`]s and recording switching attempts.
pub trait ScheduleStore {
    /// Get all enabled schedules.
    fn list_enabled(&self) -> impl Future<Output = Result<Vec<Schedule>, SpotSwitchError>> + Send;

    /// Enable or disable a schedule by its unique identifier.
    fn set_enabled(
        &self,
        id: ScheduleId,
        enabled: bool,
    ) -> impl Future<Output = Result<(), SpotSwitchError>> + Send;

    /// Append one entry to the execution log.
    fn append_log(
        &self,
        entry: ExecutionLogEntry,
    ) -> impl Future<Output = Result<(), SpotSwitchError>> + Send;
}
