#![forbid(unsafe_code)]

//! Keyed collection of independent trackers.
//!
//! A [`TrackerRegistry`] maps string keys to [`OperationTracker`]
//! instances so a UI can track many independent operations (one per list
//! row, say) under one named store. Entries keep insertion order. Keys are
//! unique; [`set()`](TrackerRegistry::set) on an existing key replaces the
//! tracker — the prior instance is abandoned, and any in-flight run it had
//! settles against its own, now unreachable, state.
//!
//! The registry itself is observable: [`subscribe()`](TrackerRegistry::subscribe)
//! fires on every `set`, while per-entry changes are observed through the
//! trackers' own subscriptions. Entries are never merged and share no
//! state with each other.

use std::future::Future;

use indexmap::IndexMap;
use optrack_reactive::{Observable, Subscription};

use crate::{OperationTracker, TrackerOptions};

/// An insertion-ordered map from string keys to independent
/// [`OperationTracker`]s.
pub struct TrackerRegistry<Args, T, E> {
    trackers: IndexMap<String, OperationTracker<Args, T, E>>,
    /// Bumped on every `set`, so subscribers see map mutations too.
    revision: Observable<u64>,
}

impl<Args, T, E> TrackerRegistry<Args, T, E>
where
    Args: 'static,
    T: Clone + 'static,
    E: Clone + 'static,
{
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            trackers: IndexMap::new(),
            revision: Observable::new(0),
        }
    }

    /// Look up the tracker at `key`. No side effects.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&OperationTracker<Args, T, E>> {
        self.trackers.get(key)
    }

    /// Build a fresh tracker for `operation` and store it under `key`,
    /// replacing any prior entry at that key.
    pub fn set<Op, Fut>(&mut self, key: impl Into<String>, operation: Op, options: TrackerOptions<T, E>)
    where
        Op: Fn(Args) -> Fut + 'static,
        Fut: Future<Output = Result<T, E>> + 'static,
    {
        self.trackers
            .insert(key.into(), OperationTracker::new(operation, options));
        self.revision.set(self.revision.get() + 1);
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "registry.set", entries = self.trackers.len());
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.trackers.len()
    }

    /// Whether the registry holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trackers.is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.trackers.keys().map(String::as_str)
    }

    /// Observe registry mutations. The callback fires after every
    /// [`set()`](Self::set) until the returned guard is dropped.
    pub fn subscribe(&self, f: impl Fn() + 'static) -> Subscription {
        self.revision.subscribe(move |_| f())
    }
}

impl<Args, T, E> Default for TrackerRegistry<Args, T, E>
where
    Args: 'static,
    T: Clone + 'static,
    E: Clone + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<Args, T, E> std::fmt::Debug for TrackerRegistry<Args, T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackerRegistry")
            .field("keys", &self.trackers.keys().collect::<Vec<_>>())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Status;
    use futures::executor::block_on;
    use std::cell::Cell;
    use std::rc::Rc;

    async fn hello(name: String) -> Result<String, String> {
        Ok(format!("Hello, {name}!"))
    }

    async fn goodbye(name: String) -> Result<String, String> {
        Ok(format!("Goodbye, {name}!"))
    }

    #[test]
    fn entries_are_independent() {
        let mut registry = TrackerRegistry::new();
        registry.set("k1", hello, TrackerOptions::new());
        registry.set("k2", goodbye, TrackerOptions::new());

        let first = registry.get("k1").expect("k1 present");
        let second = registry.get("k2").expect("k2 present");
        assert_eq!(first.status(), Status::Idle);
        assert_eq!(second.status(), Status::Idle);

        block_on(first.invoke("World".into())).unwrap();
        assert_eq!(first.status(), Status::Success);
        assert_eq!(second.status(), Status::Idle);
        assert_eq!(first.result(), Some("Hello, World!".to_string()));
    }

    #[test]
    fn missing_key_is_absent() {
        let registry: TrackerRegistry<String, String, String> = TrackerRegistry::new();
        assert!(registry.get("nope").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn set_replaces_existing_entry() {
        let mut registry = TrackerRegistry::new();
        registry.set("k", hello, TrackerOptions::new());
        block_on(registry.get("k").unwrap().invoke("World".into())).unwrap();
        assert_eq!(registry.get("k").unwrap().status(), Status::Success);

        // Replacement starts from a fresh tracker, not the old state.
        registry.set("k", goodbye, TrackerOptions::new());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("k").unwrap().status(), Status::Idle);
        assert_eq!(registry.get("k").unwrap().result(), None);
    }

    #[test]
    fn abandoned_tracker_settles_against_its_own_state() {
        let mut registry = TrackerRegistry::new();
        registry.set("k", hello, TrackerOptions::new());
        let old = registry.get("k").unwrap().clone();
        let run = old.invoke("World".into());

        registry.set("k", goodbye, TrackerOptions::new());
        block_on(run).unwrap();

        assert_eq!(old.status(), Status::Success);
        assert_eq!(old.result(), Some("Hello, World!".to_string()));
        assert_eq!(registry.get("k").unwrap().status(), Status::Idle);
    }

    #[test]
    fn keys_keep_insertion_order() {
        let mut registry = TrackerRegistry::new();
        registry.set("b", hello, TrackerOptions::new());
        registry.set("a", hello, TrackerOptions::new());
        registry.set("c", hello, TrackerOptions::new());

        let keys: Vec<&str> = registry.keys().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn subscription_fires_on_set() {
        let count = Rc::new(Cell::new(0u32));
        let count_clone = Rc::clone(&count);

        let mut registry = TrackerRegistry::new();
        let _sub = registry.subscribe(move || count_clone.set(count_clone.get() + 1));

        registry.set("a", hello, TrackerOptions::new());
        registry.set("a", goodbye, TrackerOptions::new());
        assert_eq!(count.get(), 2);
    }
}
