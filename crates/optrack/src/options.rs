#![forbid(unsafe_code)]

//! Lifecycle hook configuration for [`OperationTracker`].
//!
//! All hooks are optional; an absent hook is a no-op. Hooks fire *before*
//! the corresponding status write, so a hook observes the tracker's state
//! as it was just prior to the transition it announces.
//!
//! [`OperationTracker`]: crate::OperationTracker

use crate::Status;

/// A lifecycle hook taking no arguments.
type Hook = Box<dyn Fn()>;

/// Optional lifecycle hooks and initial-status override for a tracker.
///
/// Built with chained setters:
///
/// ```
/// use optrack::{Status, TrackerOptions};
///
/// let options: TrackerOptions<String, String> = TrackerOptions::new()
///     .on_pending(|| {})
///     .default_status(Status::Idle);
/// ```
pub struct TrackerOptions<T, E> {
    pub(crate) on_idle: Option<Hook>,
    pub(crate) on_pending: Option<Hook>,
    pub(crate) on_success: Option<Box<dyn Fn(&T)>>,
    pub(crate) on_error: Option<Box<dyn Fn(&E)>>,
    pub(crate) on_finally: Option<Hook>,
    pub(crate) default_status: Option<Status>,
}

impl<T, E> TrackerOptions<T, E> {
    /// Create an empty option set: no hooks, initial status [`Status::Idle`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            on_idle: None,
            on_pending: None,
            on_success: None,
            on_error: None,
            on_finally: None,
            default_status: None,
        }
    }

    /// Hook for the idle state.
    ///
    /// Reserved: the current lifecycle never transitions back to idle
    /// after construction, so this hook is accepted but not fired.
    #[must_use]
    pub fn on_idle(mut self, f: impl Fn() + 'static) -> Self {
        self.on_idle = Some(Box::new(f));
        self
    }

    /// Hook fired when a run starts, before the `Pending` status write.
    #[must_use]
    pub fn on_pending(mut self, f: impl Fn() + 'static) -> Self {
        self.on_pending = Some(Box::new(f));
        self
    }

    /// Hook fired when a run settles successfully, with the new value,
    /// before the `Success` status and result writes.
    #[must_use]
    pub fn on_success(mut self, f: impl Fn(&T) + 'static) -> Self {
        self.on_success = Some(Box::new(f));
        self
    }

    /// Hook fired when a run settles with an error, with that error,
    /// before the `Error` status and error writes.
    #[must_use]
    pub fn on_error(mut self, f: impl Fn(&E) + 'static) -> Self {
        self.on_error = Some(Box::new(f));
        self
    }

    /// Hook fired after every settlement, success or error, once the
    /// success/error branch has fully applied.
    #[must_use]
    pub fn on_finally(mut self, f: impl Fn() + 'static) -> Self {
        self.on_finally = Some(Box::new(f));
        self
    }

    /// Override the status a fresh tracker starts in (default
    /// [`Status::Idle`]).
    #[must_use]
    pub fn default_status(mut self, status: Status) -> Self {
        self.default_status = Some(status);
        self
    }
}

impl<T, E> Default for TrackerOptions<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> std::fmt::Debug for TrackerOptions<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackerOptions")
            .field("on_idle", &self.on_idle.is_some())
            .field("on_pending", &self.on_pending.is_some())
            .field("on_success", &self.on_success.is_some())
            .field("on_error", &self.on_error.is_some())
            .field("on_finally", &self.on_finally.is_some())
            .field("default_status", &self.default_status)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
