#![forbid(unsafe_code)]

//! Shared, version-tracked value cells with subscriber callbacks.
//!
//! # Design
//!
//! [`Observable<T>`] wraps a value in shared, reference-counted storage.
//! Reads go through [`get()`](Observable::get) (clone) or
//! [`with()`](Observable::with) (borrow). Writes go through
//! [`set()`](Observable::set), which suppresses no-op writes of an equal
//! value, or [`replace()`](Observable::replace), which writes
//! unconditionally. Every effective write bumps a version counter and
//! notifies subscribers in registration order.
//!
//! Subscribers are held weakly: the strong half lives inside the
//! [`Subscription`] guard returned by [`subscribe()`](Observable::subscribe),
//! so dropping the guard retires the callback. Dead entries are swept
//! lazily at the start of each notification cycle.
//!
//! # Invariants
//!
//! 1. `version()` increments by exactly 1 per value change.
//! 2. Subscribers run in registration order within one notification.
//! 3. `set()` of an equal value performs no write, no bump, no callbacks.
//! 4. A dropped `Subscription` never fires again.
//!
//! # Failure Modes
//!
//! - **Re-entrant write from a subscriber**: callbacks receive `&T` while
//!   the cell is borrowed, so calling `set()`/`replace()` on the *same*
//!   observable from inside one of its subscribers panics on the
//!   `RefCell` borrow. Reading (`get()`/`with()`) from a subscriber is
//!   fine, as is writing to a *different* observable.
//! - **Subscriber panics**: the value and version are already updated;
//!   later subscribers in the same cycle are skipped by the unwind.

use std::any::Any;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Boxed subscriber callback. The [`Subscription`] guard holds the strong
/// reference; the observable only keeps a `Weak`.
struct Subscriber<T>(Box<dyn Fn(&T)>);

/// Shared interior for [`Observable<T>`].
struct ObservableInner<T> {
    value: T,
    /// Monotonically increasing version, bumped on each effective write.
    version: u64,
    /// Weak subscriber list, in registration order. Swept lazily.
    subscribers: Vec<Weak<Subscriber<T>>>,
}

/// A shared, version-tracked value with change notification.
///
/// Cloning an `Observable` creates a new handle to the **same** inner
/// state; all handles observe the same value, version, and subscribers.
pub struct Observable<T> {
    inner: Rc<RefCell<ObservableInner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

impl<T: 'static> Observable<T> {
    /// Create a new observable holding `value`, at version 0, with no
    /// subscribers.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ObservableInner {
                value,
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Get a clone of the current value.
    #[must_use]
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.inner.borrow().value.clone()
    }

    /// Access the current value by reference without cloning.
    ///
    /// # Panics
    ///
    /// Panics if the closure writes to this same observable (re-entrant
    /// borrow).
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Current version number. Increments by 1 on each effective write.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Set the value, notifying subscribers if it changed.
    ///
    /// Setting a value equal to the current one is a no-op: no write, no
    /// version bump, no notifications.
    pub fn set(&self, value: T)
    where
        T: PartialEq,
    {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return;
            }
            inner.value = value;
            inner.version += 1;
        }
        self.notify();
    }

    /// Replace the value unconditionally, returning the previous one.
    ///
    /// Always bumps the version and notifies, even if the new value
    /// compares equal to the old (no `PartialEq` bound is required).
    pub fn replace(&self, value: T) -> T {
        let old = {
            let mut inner = self.inner.borrow_mut();
            inner.version += 1;
            std::mem::replace(&mut inner.value, value)
        };
        self.notify();
        old
    }

    /// Register a change callback, returning its RAII guard.
    ///
    /// The callback fires after every effective write, receiving a
    /// reference to the new value. It stops firing once the returned
    /// [`Subscription`] is dropped.
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> Subscription {
        let subscriber: Rc<Subscriber<T>> = Rc::new(Subscriber(Box::new(f)));
        self.inner
            .borrow_mut()
            .subscribers
            .push(Rc::downgrade(&subscriber));
        Subscription {
            _subscriber: subscriber,
        }
    }

    /// Run all live subscribers against the current value, sweeping dead
    /// entries first.
    fn notify(&self) {
        // Upgrade outside the callback loop so a subscriber may register
        // further subscriptions without hitting the mutable borrow.
        let live: Vec<Rc<Subscriber<T>>> = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.retain(|weak| weak.strong_count() > 0);
            inner.subscribers.iter().filter_map(Weak::upgrade).collect()
        };
        for subscriber in live {
            let inner = self.inner.borrow();
            (subscriber.0)(&inner.value);
        }
    }
}

/// RAII guard for a registered subscriber callback.
///
/// Dropping the guard retires the callback: it will not run in any
/// notification cycle that starts after the drop.
pub struct Subscription {
    _subscriber: Rc<dyn Any>,
}

impl Subscription {
    /// Keep the callback alive for the remaining lifetime of the
    /// observable, discarding the guard.
    pub fn forget(self) {
        std::mem::forget(self);
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
