//! # spotswitch-adapter-storage-memory
//!
//! In-memory [`ScheduleStore`] implementation.
//!
//! Everything lives in process memory and disappears on restart. It
//! backs the daemon's seeded configuration and keeps tests free of IO.
//!
//! ## Dependency rule
//!
//! Depends on `spotswitch-app` (port traits) and `spotswitch-domain` only.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use spotswitch_app::ports::ScheduleStore;
use spotswitch_domain::error::{NotFoundError, SpotSwitchError};
use spotswitch_domain::execution_log::ExecutionLogEntry;
use spotswitch_domain::id::ScheduleId;
use spotswitch_domain::schedule::Schedule;
use spotswitch_domain::time::now;

/// Store keeping schedules and the execution log in memory.
///
/// Cheap to clone; clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryScheduleStore {
    inner: Arc<StoreInner>,
}

#[derive(Default)]
struct StoreInner {
    schedules: Mutex<HashMap<ScheduleId, Schedule>>,
    log: Mutex<Vec<ExecutionLogEntry>>,
}

impl MemoryScheduleStore {
    /// Insert or replace a schedule.
    pub fn insert(&self, schedule: Schedule) {
        self.lock_schedules().insert(schedule.id, schedule);
    }

    /// Get a schedule by id.
    #[must_use]
    pub fn get(&self, id: ScheduleId) -> Option<Schedule> {
        self.lock_schedules().get(&id).cloned()
    }

    #[must_use]
    pub fn schedule_count(&self) -> usize {
        self.lock_schedules().len()
    }

    /// Snapshot of the execution log, oldest entry first.
    #[must_use]
    pub fn log_entries(&self) -> Vec<ExecutionLogEntry> {
        self.lock_log().clone()
    }

    fn lock_schedules(&self) -> MutexGuard<'_, HashMap<ScheduleId, Schedule>> {
        self.inner
            .schedules
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_log(&self) -> MutexGuard<'_, Vec<ExecutionLogEntry>> {
        self.inner
            .log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl ScheduleStore for MemoryScheduleStore {
    fn list_enabled(&self) -> impl Future<Output = Result<Vec<Schedule>, SpotSwitchError>> + Send {
        let mut list: Vec<_> = self
            .lock_schedules()
            .values()
            .filter(|schedule| schedule.enabled)
            .cloned()
            .collect();
        // Stable order so resolution output does not depend on map
        // iteration order.
        list.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.name.cmp(&b.name))
        });
        async { Ok(list) }
    }

    fn set_enabled(
        &self,
        id: ScheduleId,
        enabled: bool,
    ) -> impl Future<Output = Result<(), SpotSwitchError>> + Send {
        let result = {
            let mut schedules = self.lock_schedules();
            match schedules.get_mut(&id) {
                Some(schedule) => {
                    schedule.enabled = enabled;
                    schedule.updated_at = now();
                    Ok(())
                }
                None => Err(SpotSwitchError::NotFound(NotFoundError {
                    entity: "Schedule",
                    id: id.to_string(),
                })),
            }
        };
        async { result }
    }

    fn append_log(
        &self,
        entry: ExecutionLogEntry,
    ) -> impl Future<Output = Result<(), SpotSwitchError>> + Send {
        self.lock_log().push(entry);
        async { Ok(()) }
    }
}
