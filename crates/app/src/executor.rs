//! Schedule executor — fires switching events minute by minute.
//!
//! Every tick re-resolves the enabled schedules against the current
//! local date and compares the current minute with each effective
//! slot's boundaries. A minute matching a slot's start fires the
//! slot's action; a minute matching the end of an `on` slot switches
//! the device back off. Other actions leave the device alone when
//! their window closes.
//!
//! Device failures are isolated: a device that does not answer is
//! marked offline and logged, and the tick moves on to the next one.
//! Storage failures abort the tick instead, nothing can be recorded
//! without the store.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::{DateTime, Local, Timelike};

use spotswitch_domain::device::DeviceStatus;
use spotswitch_domain::error::SpotSwitchError;
use spotswitch_domain::execution_log::ExecutionLogEntry;
use spotswitch_domain::id::ScheduleId;
use spotswitch_domain::schedule::{
    DeviceAction, MINUTES_PER_DAY, Repeat, Schedule, ScheduleConfig,
};
use spotswitch_domain::time::minute_of_day;
use spotswitch_domain::timeline::{EffectiveDeviceSchedule, EffectiveSlot, SourceSchedule};

use crate::ports::{Clock, DeviceActuator, DeviceDirectory, ScheduleStore};
use crate::resolver::ScheduleResolver;

/// What a single call to [`ScheduleExecutor::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The minute was evaluated.
    Completed(TickSummary),
    /// A previous tick was still running, nothing was evaluated.
    Skipped,
}

/// Counters from one completed tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub start_events: usize,
    pub end_events: usize,
    pub failed_actuations: usize,
}

/// Use-case: drive devices through their resolved timelines.
pub struct ScheduleExecutor<S, A, D, C> {
    store: S,
    actuator: A,
    directory: D,
    resolver: ScheduleResolver<D>,
    clock: C,
    in_flight: AtomicBool,
}

impl<S, A, D, C> ScheduleExecutor<S, A, D, C>
where
    S: ScheduleStore,
    A: DeviceActuator,
    D: DeviceDirectory + Clone,
    C: Clock,
{
    /// Create a new executor.
    pub fn new(store: S, actuator: A, directory: D, clock: C) -> Self {
        Self {
            store,
            actuator,
            resolver: ScheduleResolver::new(directory.clone()),
            directory,
            clock,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Evaluate the current minute once.
    ///
    /// Ticks never overlap: while one is still running, further calls
    /// return [`TickOutcome::Skipped`] without touching any device.
    ///
    /// # Errors
    ///
    /// Returns a storage error when loading schedules, disabling a
    /// single-shot schedule, recording a device status, or appending
    /// to the execution log fails. Device failures do not surface
    /// here; they are logged, counted and isolated per device.
    #[tracing::instrument(skip(self))]
    pub async fn tick(&self) -> Result<TickOutcome, SpotSwitchError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::warn!("previous tick still running, skipping this minute");
            return Ok(TickOutcome::Skipped);
        }
        let result = self.run_tick().await;
        self.in_flight.store(false, Ordering::SeqCst);
        result.map(TickOutcome::Completed)
    }

    /// Run the executor forever, ticking once per `period`.
    ///
    /// The first tick is aligned to the next whole minute of the
    /// clock. Ticks that would pile up behind a slow one are dropped
    /// rather than replayed in a burst.
    pub async fn run(&self, period: Duration) {
        let start = tokio::time::Instant::now() + delay_to_next_minute(&self.clock.now());
        let mut interval = tokio::time::interval_at(start, period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            match self.tick().await {
                Ok(TickOutcome::Completed(summary)) => {
                    tracing::info!(
                        start_events = summary.start_events,
                        end_events = summary.end_events,
                        failed_actuations = summary.failed_actuations,
                        "tick completed"
                    );
                }
                Ok(TickOutcome::Skipped) => {}
                Err(err) => {
                    tracing::error!(%err, "tick aborted");
                }
            }
        }
    }

    async fn run_tick(&self) -> Result<TickSummary, SpotSwitchError> {
        let now = self.clock.now();
        let today = now.date_naive();
        let minute = minute_of_day(&now);

        let schedules = self.store.list_enabled().await?;
        let resolution = self.resolver.resolve(&schedules, today).await;

        let mut summary = TickSummary::default();
        for device in &resolution.effective_schedules {
            for slot in &device.slots {
                if minute == slot.slot.start_minute() {
                    summary.start_events += 1;
                    self.fire_start(device, slot, &schedules, &mut summary)
                        .await?;
                }
                if slot.action == DeviceAction::On
                    && minute == slot.slot.end_minute_adjusted() % MINUTES_PER_DAY
                {
                    summary.end_events += 1;
                    self.fire_end(device, slot, &mut summary).await?;
                }
            }
        }
        Ok(summary)
    }

    /// A slot's window opens: apply its action, then retire any
    /// single-shot schedule that contributed to it.
    async fn fire_start(
        &self,
        device: &EffectiveDeviceSchedule,
        slot: &EffectiveSlot,
        schedules: &[Schedule],
        summary: &mut TickSummary,
    ) -> Result<(), SpotSwitchError> {
        let names = source_names(&slot.source_schedules);
        let reason = format!(
            "window {} opens ({}), scheduled by {names}",
            slot.slot, slot.action
        );
        self.dispatch(device, slot.action, &slot.source_schedules, &reason, summary)
            .await?;

        // Single-shot schedules retire as soon as their start event has
        // been recorded, whether or not the device answered.
        for source in &slot.source_schedules {
            if is_single_shot(schedules, source.id) {
                self.store.set_enabled(source.id, false).await?;
                tracing::info!(schedule = %source.name, "single-shot schedule disabled after firing");
            }
        }
        Ok(())
    }

    /// An `on` slot's window closes: switch the device back off.
    async fn fire_end(
        &self,
        device: &EffectiveDeviceSchedule,
        slot: &EffectiveSlot,
        summary: &mut TickSummary,
    ) -> Result<(), SpotSwitchError> {
        let names = source_names(&slot.source_schedules);
        let reason = format!("window {} closes, switching off for {names}", slot.slot);
        self.dispatch(
            device,
            DeviceAction::Off,
            &slot.source_schedules,
            &reason,
            summary,
        )
        .await
    }

    /// Apply one action to one device and record the attempt, one log
    /// entry per source schedule.
    async fn dispatch(
        &self,
        device: &EffectiveDeviceSchedule,
        action: DeviceAction,
        sources: &[SourceSchedule],
        reason: &str,
        summary: &mut TickSummary,
    ) -> Result<(), SpotSwitchError> {
        match self.actuator.actuate(device.device_id, action).await {
            Ok(state) => {
                tracing::debug!(device = %device.device_name, %action, %state, "device switched");
                self.directory
                    .set_status(device.device_id, DeviceStatus::Online)
                    .await?;
                for source in sources {
                    let entry = ExecutionLogEntry::builder()
                        .schedule_id(source.id)
                        .device_id(device.device_id)
                        .action(action)
                        .trigger_reason(reason)
                        .build();
                    self.store.append_log(entry).await?;
                }
            }
            Err(err) => {
                summary.failed_actuations += 1;
                tracing::warn!(device = %device.device_name, %action, %err, "device failed to switch");
                self.directory
                    .set_status(device.device_id, DeviceStatus::Offline)
                    .await?;
                for source in sources {
                    let entry = ExecutionLogEntry::builder()
                        .schedule_id(source.id)
                        .device_id(device.device_id)
                        .action(action)
                        .trigger_reason(reason)
                        .failure(err.to_string())
                        .build();
                    self.store.append_log(entry).await?;
                }
            }
        }
        Ok(())
    }
}

fn is_single_shot(schedules: &[Schedule], id: ScheduleId) -> bool {
    schedules.iter().any(|schedule| {
        schedule.id == id
            && matches!(
                schedule.config,
                ScheduleConfig::TimeSlots {
                    repeat: Repeat::Once,
                    ..
                }
            )
    })
}

fn source_names(sources: &[SourceSchedule]) -> String {
    sources
        .iter()
        .map(|source| source.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Time until the next whole minute of the clock.
fn delay_to_next_minute(now: &DateTime<Local>) -> Duration {
    let into_minute = Duration::new(u64::from(now.second()), now.nanosecond());
    Duration::from_secs(60).saturating_sub(into_minute)
}
