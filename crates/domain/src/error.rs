//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`SpotSwitchError`] via `#[from]`.

use crate::id::DeviceId;

/// Top-level error for the spotswitch workspace.
#[derive(Debug, thiserror::Error)]
pub enum SpotSwitchError {
    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A lookup came back empty.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// A storage adapter failed.
    #[error("storage error")]
    Storage(#[from] StorageError),

    /// A device refused or failed an actuation.
    #[error("actuation error")]
    Actuation(#[from] ActuationError),
}

/// Domain invariant violations raised by `validate()` implementations.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("schedule must target at least one device")]
    NoDevices,
    #[error("time slot schedule must define at least one slot")]
    NoTimeSlots,
    #[error("invalid time of day: {value}")]
    InvalidTime { value: String },
    #[error("one-time schedule requires a date")]
    MissingDate,
}

/// A lookup failed to find the requested record.
#[derive(Debug, thiserror::Error)]
#[error("{entity} not found: {id}")]
pub struct NotFoundError {
    /// Human-readable entity kind, e.g. `"Schedule"`.
    pub entity: &'static str,
    /// The identifier that was looked up.
    pub id: String,
}

/// Failure reported by a storage adapter.
#[derive(Debug, thiserror::Error)]
#[error("storage failure: {0}")]
pub struct StorageError(pub String);

/// A device refused or failed a switching request.
#[derive(Debug, thiserror::Error)]
#[error("device {device_id} failed to switch: {message}")]
pub struct ActuationError {
    pub device_id: DeviceId,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_describe_invalid_time_with_offending_value() {
        let err = ValidationError::InvalidTime {
            value: "25:99".to_string(),
        };
        assert_eq!(err.to_string(), "invalid time of day: 25:99");
    }

    #[test]
    fn should_describe_not_found_with_entity_and_id() {
        let err = NotFoundError {
            entity: "Schedule",
            id: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Schedule not found: abc");
    }

    #[test]
    fn should_wrap_validation_error_via_from() {
        let err: SpotSwitchError = ValidationError::EmptyName.into();
        assert!(matches!(
            err,
            SpotSwitchError::Validation(ValidationError::EmptyName)
        ));
    }

    #[test]
    fn should_describe_actuation_failure_with_device() {
        let device_id = DeviceId::new();
        let err = ActuationError {
            device_id,
            message: "timeout".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains(&device_id.to_string()));
        assert!(display.contains("timeout"));
    }
}
