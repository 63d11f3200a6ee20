//! # spotswitch-domain
//!
//! Pure domain model for the spotswitch scheduling engine.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Schedules** (user-authored switching rules over HH:MM windows)
//! - Define the device vocabulary (power state, online/offline status)
//! - Define the **Timeline** (raw windows, merged effective slots, conflicts)
//! - Define **Execution log** entries (append-only audit records)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod device;
pub mod execution_log;
pub mod schedule;
pub mod timeline;
