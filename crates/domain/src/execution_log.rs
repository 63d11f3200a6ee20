//! Execution log — the record of every switching attempt.

use serde::{Deserialize, Serialize};

use crate::id::{DeviceId, ExecutionLogId, ScheduleId};
use crate::schedule::DeviceAction;
use crate::time::{Timestamp, now};

/// One switching attempt on one device, successful or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionLogEntry {
    pub id: ExecutionLogId,
    pub schedule_id: ScheduleId,
    pub device_id: DeviceId,
    pub action: DeviceAction,
    /// Human-readable account of why the action fired.
    pub trigger_reason: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub executed_at: Timestamp,
}

impl ExecutionLogEntry {
    #[must_use]
    pub fn builder() -> ExecutionLogEntryBuilder {
        ExecutionLogEntryBuilder::default()
    }
}

#[derive(Debug, Default)]
pub struct ExecutionLogEntryBuilder {
    schedule_id: ScheduleId,
    device_id: DeviceId,
    action: DeviceAction,
    trigger_reason: String,
    error_message: Option<String>,
}

impl ExecutionLogEntryBuilder {
    #[must_use]
    pub fn schedule_id(mut self, schedule_id: ScheduleId) -> Self {
        self.schedule_id = schedule_id;
        self
    }

    #[must_use]
    pub fn device_id(mut self, device_id: DeviceId) -> Self {
        self.device_id = device_id;
        self
    }

    #[must_use]
    pub fn action(mut self, action: DeviceAction) -> Self {
        self.action = action;
        self
    }

    #[must_use]
    pub fn trigger_reason(mut self, trigger_reason: impl Into<String>) -> Self {
        self.trigger_reason = trigger_reason.into();
        self
    }

    /// Mark the attempt as failed with the device's error.
    #[must_use]
    pub fn failure(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    #[must_use]
    pub fn build(self) -> ExecutionLogEntry {
        ExecutionLogEntry {
            id: ExecutionLogId::new(),
            schedule_id: self.schedule_id,
            device_id: self.device_id,
            action: self.action,
            trigger_reason: self.trigger_reason,
            success: self.error_message.is_none(),
            error_message: self.error_message,
            executed_at: now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ExecutionLogEntry;
    use crate::schedule::DeviceAction;

    #[test]
    fn should_build_successful_entry() {
        let entry = ExecutionLogEntry::builder()
            .action(DeviceAction::On)
            .trigger_reason("window 06:00-08:30 opens")
            .build();
        assert!(entry.success);
        assert_eq!(entry.error_message, None);
        assert_eq!(entry.trigger_reason, "window 06:00-08:30 opens");
    }

    #[test]
    fn should_build_failed_entry() {
        let entry = ExecutionLogEntry::builder()
            .action(DeviceAction::Off)
            .trigger_reason("window 06:00-08:30 closes")
            .failure("device is unreachable")
            .build();
        assert!(!entry.success);
        assert_eq!(
            entry.error_message.as_deref(),
            Some("device is unreachable")
        );
    }

    #[test]
    fn should_skip_error_message_when_successful() {
        let entry = ExecutionLogEntry::builder()
            .action(DeviceAction::On)
            .trigger_reason("manual")
            .build();
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("error_message").is_none());
    }
}
