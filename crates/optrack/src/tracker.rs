#![forbid(unsafe_code)]

//! The leaf tracker: one asynchronous operation, observable lifecycle.
//!
//! # Design
//!
//! [`OperationTracker`] owns a type-erased async operation and three
//! observable cells (`status`, `result`, `error`). Calling
//! [`invoke()`](OperationTracker::invoke) runs the synchronous prefix
//! immediately — fire `on_pending`, write `Pending`, start the operation —
//! and returns a future that applies the settlement effects when awaited:
//! the success or error branch, then `on_finally`, then the original
//! outcome to the caller. Errors are recorded *and* re-surfaced, never
//! swallowed.
//!
//! The tracker is a cheap-`Clone` handle: all fields are `Rc`-shared, so
//! clones observe and mutate the same state. The operation itself is boxed
//! behind `Rc<dyn Fn(..) -> LocalBoxFuture<..>>`, which lets a registry
//! hold trackers built from distinct closure types.
//!
//! # Invariants
//!
//! 1. Within one run, the order is: `on_pending` → `Pending` write →
//!    operation start → settlement → (`on_success` → `Success` → result
//!    write → error clear) or (`on_error` → `Error` → error write →
//!    result clear) → `on_finally`.
//! 2. `result` and `error` are never both set.
//! 3. Entering `Pending` does not clear the previous run's `result` or
//!    `error`; only the next settlement overwrites them.
//! 4. The future returned by `invoke` yields the operation's own
//!    `Result`, error included.
//!
//! # Races
//!
//! Overlapping `invoke` calls on one tracker are allowed and unordered
//! across runs: whichever future settles last overwrites
//! `status`/`result`/`error`, even if it belongs to the older call.
//! Callers needing mutual exclusion should allocate one tracker per
//! logical run (as [`TrackerRegistry::set`] does) or serialize calls.
//!
//! [`TrackerRegistry::set`]: crate::TrackerRegistry::set

use std::future::Future;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use optrack_reactive::{Observable, Subscription};

use crate::{Status, TrackerOptions};

/// The wrapped operation, type-erased to a boxed local future.
type Operation<Args, T, E> = Rc<dyn Fn(Args) -> LocalBoxFuture<'static, Result<T, E>>>;

/// Tracks the lifecycle of one asynchronous operation as observable state.
///
/// See the [module docs](self) for ordering and race semantics.
pub struct OperationTracker<Args, T, E> {
    operation: Operation<Args, T, E>,
    options: Rc<TrackerOptions<T, E>>,
    status: Observable<Status>,
    result: Observable<Option<T>>,
    error: Observable<Option<E>>,
}

impl<Args, T, E> Clone for OperationTracker<Args, T, E> {
    fn clone(&self) -> Self {
        Self {
            operation: Rc::clone(&self.operation),
            options: Rc::clone(&self.options),
            status: self.status.clone(),
            result: self.result.clone(),
            error: self.error.clone(),
        }
    }
}

impl<Args, T: 'static, E: 'static> std::fmt::Debug for OperationTracker<Args, T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperationTracker")
            .field("status", &self.status.get())
            .field("has_result", &self.result.with(Option::is_some))
            .field("has_error", &self.error.with(Option::is_some))
            .finish()
    }
}

impl<Args, T, E> OperationTracker<Args, T, E>
where
    Args: 'static,
    T: Clone + 'static,
    E: Clone + 'static,
{
    /// Create a tracker around `operation`.
    ///
    /// The status starts at `options.default_status` (or [`Status::Idle`]);
    /// `result` and `error` start absent. Nothing runs until
    /// [`invoke()`](Self::invoke).
    #[must_use]
    pub fn new<Op, Fut>(operation: Op, options: TrackerOptions<T, E>) -> Self
    where
        Op: Fn(Args) -> Fut + 'static,
        Fut: Future<Output = Result<T, E>> + 'static,
    {
        let initial = options.default_status.unwrap_or_default();
        Self {
            operation: Rc::new(move |args| operation(args).boxed_local()),
            options: Rc::new(options),
            status: Observable::new(initial),
            result: Observable::new(None),
            error: Observable::new(None),
        }
    }

    /// Start a new run of the wrapped operation.
    ///
    /// The pending transition happens before this method returns: the
    /// `on_pending` hook fires, `status` becomes [`Status::Pending`], and
    /// the operation is started. Awaiting the returned future drives the
    /// run to settlement and yields the operation's own outcome.
    ///
    /// Reinvocable from any status; see the [module docs](self) for the
    /// overlapping-call race.
    pub fn invoke(&self, args: Args) -> impl Future<Output = Result<T, E>> + use<Args, T, E> {
        if let Some(hook) = &self.options.on_pending {
            hook();
        }
        self.status.set(Status::Pending);
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "tracker.pending");

        let run = (self.operation)(args);
        let tracker = self.clone();
        async move {
            match run.await {
                Ok(value) => {
                    tracker.settle_success(&value);
                    Ok(value)
                }
                Err(error) => {
                    tracker.settle_error(&error);
                    Err(error)
                }
            }
        }
    }

    /// Current lifecycle status.
    #[must_use]
    pub fn status(&self) -> Status {
        self.status.get()
    }

    /// Result of the most recent successful run, if any.
    #[must_use]
    pub fn result(&self) -> Option<T> {
        self.result.get()
    }

    /// Error of the most recent failed run, if any.
    #[must_use]
    pub fn error(&self) -> Option<E> {
        self.error.get()
    }

    /// Observe status changes. The callback fires on every transition
    /// until the returned guard is dropped.
    pub fn subscribe_status(&self, f: impl Fn(&Status) + 'static) -> Subscription {
        self.status.subscribe(f)
    }

    /// Observe result changes (settlement writes only, per invariant 3).
    pub fn subscribe_result(&self, f: impl Fn(&Option<T>) + 'static) -> Subscription {
        self.result.subscribe(f)
    }

    /// Observe error changes (settlement writes only, per invariant 3).
    pub fn subscribe_error(&self, f: impl Fn(&Option<E>) + 'static) -> Subscription {
        self.error.subscribe(f)
    }

    fn settle_success(&self, value: &T) {
        if let Some(hook) = &self.options.on_success {
            hook(value);
        }
        self.status.set(Status::Success);
        self.result.replace(Some(value.clone()));
        // Skip the write when already clear: no spurious notification.
        if self.error.with(Option::is_some) {
            self.error.replace(None);
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "tracker.success");
        if let Some(hook) = &self.options.on_finally {
            hook();
        }
    }

    fn settle_error(&self, error: &E) {
        if let Some(hook) = &self.options.on_error {
            hook(error);
        }
        self.status.set(Status::Error);
        self.error.replace(Some(error.clone()));
        if self.result.with(Option::is_some) {
            self.result.replace(None);
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "tracker.error");
        if let Some(hook) = &self.options.on_finally {
            hook();
        }
    }
}

/// Build an [`OperationTracker`] — the free-function spelling of
/// [`OperationTracker::new`], for call sites that read better without the
/// type name.
#[must_use]
pub fn track<Args, T, E, Op, Fut>(
    operation: Op,
    options: TrackerOptions<T, E>,
) -> OperationTracker<Args, T, E>
where
    Args: 'static,
    T: Clone + 'static,
    E: Clone + 'static,
    Op: Fn(Args) -> Fut + 'static,
    Fut: Future<Output = Result<T, E>> + 'static,
{
    OperationTracker::new(operation, options)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
