#![forbid(unsafe_code)]

//! Reactive lifecycle tracking for asynchronous operations.
//!
//! Wrap an async operation in an [`OperationTracker`] and its lifecycle
//! (`idle → pending → success | error`) becomes observable state a UI can
//! render from: [`status`](OperationTracker::status),
//! [`result`](OperationTracker::result), and
//! [`error`](OperationTracker::error), each with change subscriptions.
//! Optional [`TrackerOptions`] hooks cover side-effecting concerns
//! (toasts, navigation) orthogonal to rendering. A [`TrackerRegistry`]
//! keys many independent trackers under one store.
//!
//! Everything is single-threaded and lock-free (`Rc` handles, `!Send`
//! futures), intended for an event-loop/UI thread.
//!
//! # Example
//!
//! ```
//! use futures::executor::block_on;
//! use optrack::{track, Status, TrackerOptions};
//!
//! let greeter = track(
//!     |name: String| async move { Ok::<_, String>(format!("Hello, {name}!")) },
//!     TrackerOptions::new(),
//! );
//! assert_eq!(greeter.status(), Status::Idle);
//!
//! let run = greeter.invoke("World".into());
//! assert_eq!(greeter.status(), Status::Pending);
//!
//! block_on(run).unwrap();
//! assert_eq!(greeter.status(), Status::Success);
//! assert_eq!(greeter.result(), Some("Hello, World!".to_string()));
//! ```

pub mod options;
pub mod registry;
pub mod status;
pub mod tracker;

pub use options::TrackerOptions;
pub use optrack_reactive::{Observable, Subscription};
pub use registry::TrackerRegistry;
pub use status::Status;
pub use tracker::{OperationTracker, track};
