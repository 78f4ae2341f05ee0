#![forbid(unsafe_code)]

//! Lifecycle status of a tracked operation.

use std::fmt;

/// Where a tracked operation currently is in its lifecycle.
///
/// A tracker holds exactly one status at a time. Every [`invoke`] re-enters
/// [`Pending`](Status::Pending) regardless of the current status; the only
/// way out of `Pending` is the wrapped operation settling.
///
/// [`invoke`]: crate::OperationTracker::invoke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    /// No run has started yet.
    #[default]
    Idle,
    /// A run has started and has not settled.
    Pending,
    /// The most recent run settled with a value.
    Success,
    /// The most recent run settled with an error.
    Error,
}

impl Status {
    /// Whether the most recent run has settled (success or error).
    #[must_use]
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Success | Self::Error)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Error => "error",
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_idle() {
        assert_eq!(Status::default(), Status::Idle);
    }

    #[test]
    fn settled_states() {
        assert!(!Status::Idle.is_settled());
        assert!(!Status::Pending.is_settled());
        assert!(Status::Success.is_settled());
        assert!(Status::Error.is_settled());
    }

    #[test]
    fn display_names() {
        assert_eq!(Status::Idle.to_string(), "idle");
        assert_eq!(Status::Pending.to_string(), "pending");
        assert_eq!(Status::Success.to_string(), "success");
        assert_eq!(Status::Error.to_string(), "error");
    }
}
