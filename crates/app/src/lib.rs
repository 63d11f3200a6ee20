//! # spotswitch-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `ScheduleStore` — schedules and the execution log
//!   - `DeviceDirectory` — device names and reachability status
//!   - `DeviceActuator` — the driver that actually switches devices
//!   - `Clock` — wall-clock time, replaceable in tests
//! - Provide the **use-case engines**:
//!   - `ScheduleResolver` — flatten schedules into per-device timelines
//!   - `ScheduleExecutor` — fire start/end events minute by minute
//! - Orchestrate domain objects without knowing *how* persistence or
//!   device IO works
//!
//! ## Dependency rule
//! Depends on `spotswitch-domain` only (plus `tokio::time` for the tick
//! loop). Never imports adapter crates. Adapters depend on *this* crate,
//! not the reverse.

pub mod executor;
pub mod ports;
pub mod resolver;
