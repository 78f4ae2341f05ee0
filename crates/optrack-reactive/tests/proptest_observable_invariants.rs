//! Property-based invariant tests for the observable cell.
//!
//! These tests verify structural invariants that must hold for any valid
//! inputs:
//!
//! 1. `version()` counts exactly the value-changing `set()` calls.
//! 2. `set()` of an equal value never notifies.
//! 3. Subscriber notification count equals the version delta.
//! 4. `replace()` bumps version and notifies once per call, always.
//! 5. The final value equals the last written value.
//! 6. A dropped subscription receives no further notifications.
//! 7. Cloned handles agree on value and version.

use std::cell::Cell;
use std::rc::Rc;

use optrack_reactive::Observable;
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

/// A write against the cell under test.
#[derive(Debug, Clone)]
enum Write {
    Set(i32),
    Replace(i32),
}

fn write_strategy() -> impl Strategy<Value = Write> {
    prop_oneof![
        (-8i32..8).prop_map(Write::Set),
        (-8i32..8).prop_map(Write::Replace),
    ]
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn version_counts_effective_writes(
        initial in -8i32..8,
        writes in proptest::collection::vec(write_strategy(), 0..64),
    ) {
        let cell = Observable::new(initial);
        let notifications = Rc::new(Cell::new(0u64));
        let notifications_clone = Rc::clone(&notifications);
        let _sub = cell.subscribe(move |_| {
            notifications_clone.set(notifications_clone.get() + 1);
        });

        let mut current = initial;
        let mut expected_version = 0u64;
        for write in writes {
            match write {
                Write::Set(v) => {
                    cell.set(v);
                    if v != current {
                        current = v;
                        expected_version += 1;
                    }
                }
                Write::Replace(v) => {
                    cell.replace(v);
                    current = v;
                    expected_version += 1;
                }
            }
        }

        // Invariants 1, 3, 4, 5.
        prop_assert_eq!(cell.version(), expected_version);
        prop_assert_eq!(notifications.get(), expected_version);
        prop_assert_eq!(cell.get(), current);
    }

    #[test]
    fn equal_sets_never_notify(
        value in -8i32..8,
        repeats in 1usize..32,
    ) {
        let cell = Observable::new(value);
        let notifications = Rc::new(Cell::new(0u64));
        let notifications_clone = Rc::clone(&notifications);
        let _sub = cell.subscribe(move |_| {
            notifications_clone.set(notifications_clone.get() + 1);
        });

        for _ in 0..repeats {
            cell.set(value);
        }

        // Invariant 2.
        prop_assert_eq!(cell.version(), 0);
        prop_assert_eq!(notifications.get(), 0);
    }

    #[test]
    fn dropped_subscription_is_silent(
        before in proptest::collection::vec(any::<i32>(), 0..16),
        after in proptest::collection::vec(any::<i32>(), 0..16),
    ) {
        let cell = Observable::new(0i64);
        let notifications = Rc::new(Cell::new(0u64));
        let notifications_clone = Rc::clone(&notifications);
        let sub = cell.subscribe(move |_| {
            notifications_clone.set(notifications_clone.get() + 1);
        });

        for v in &before {
            cell.replace(i64::from(*v));
        }
        let seen = notifications.get();
        prop_assert_eq!(seen, before.len() as u64);

        drop(sub);
        for v in &after {
            cell.replace(i64::from(*v));
        }

        // Invariant 6.
        prop_assert_eq!(notifications.get(), seen);
    }

    #[test]
    fn cloned_handles_agree(
        writes in proptest::collection::vec(any::<i32>(), 1..32),
    ) {
        let cell = Observable::new(0i32);
        let handle = cell.clone();

        for (i, v) in writes.iter().enumerate() {
            if i % 2 == 0 {
                cell.replace(*v);
            } else {
                handle.replace(*v);
            }
        }

        // Invariant 7.
        prop_assert_eq!(cell.get(), handle.get());
        prop_assert_eq!(cell.version(), handle.version());
        prop_assert_eq!(cell.version(), writes.len() as u64);
    }
}
