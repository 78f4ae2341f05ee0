#![forbid(unsafe_code)]

//! Reactive value cells for single-threaded UI state.
//!
//! This crate provides the change-tracking primitive that the tracker
//! layer builds on:
//!
//! - [`Observable`]: a shared, version-tracked value wrapper with change
//!   notification via subscriber callbacks.
//! - [`Subscription`]: RAII guard that automatically unsubscribes on drop.
//!
//! # Architecture
//!
//! `Observable<T>` uses `Rc<RefCell<..>>` for single-threaded shared
//! ownership. Subscribers are stored as `Weak` function pointers and
//! cleaned up lazily during notification.
//!
//! # Invariants
//!
//! 1. Version increments exactly once per mutation that changes the value.
//! 2. Subscribers are notified in registration order.
//! 3. Setting a value equal to the current value is a no-op (no version
//!    bump, no notifications).
//! 4. Dropping a [`Subscription`] removes the callback before the next
//!    notification cycle.
//! 5. [`Observable::replace`] is the unconditional write: it always bumps
//!    the version and notifies, and requires no `PartialEq` on `T`.

pub mod observable;

pub use observable::{Observable, Subscription};
