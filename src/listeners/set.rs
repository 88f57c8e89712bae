//! # Copy-on-write listener registry.
//!
//! Readers (publishers) take an atomic snapshot with no locking; writers
//! (subscribe / cancel) serialize on a mutex, clone the list, and swap it in.
//! A publish therefore never observes a half-updated set.
//!
//! ```text
//! subscribe ──┐                       publish ──► load_full() ──► Arc<Vec<Entry>>
//! cancel    ──┴─► lock ─► clone ─► edit ─► store
//! ```

use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use super::listener::Listener;

/// A registered listener with its id and cancellation flag.
pub(crate) struct ListenerEntry {
    id: u64,
    listener: Arc<dyn Listener>,
    token: CancellationToken,
}

impl ListenerEntry {
    #[inline]
    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    pub(crate) fn name(&self) -> &'static str {
        self.listener.name()
    }

    #[inline]
    pub(crate) fn listener(&self) -> &Arc<dyn Listener> {
        &self.listener
    }

    #[inline]
    pub(crate) fn token(&self) -> &CancellationToken {
        &self.token
    }

    #[inline]
    pub(crate) fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

pub(crate) struct ListenerSet {
    entries: ArcSwap<Vec<Arc<ListenerEntry>>>,
    /// Serializes writers; holds the next id to hand out.
    next_id: Mutex<u64>,
}

impl ListenerSet {
    pub(crate) fn new() -> Self {
        Self {
            entries: ArcSwap::from_pointee(Vec::new()),
            next_id: Mutex::new(1),
        }
    }

    /// Appends a listener; it is last in delivery order.
    pub(crate) fn insert(&self, listener: Arc<dyn Listener>) -> Arc<ListenerEntry> {
        let mut next_id = self.next_id.lock();
        let entry = Arc::new(ListenerEntry {
            id: *next_id,
            listener,
            token: CancellationToken::new(),
        });
        *next_id += 1;

        let mut list: Vec<Arc<ListenerEntry>> = self.entries.load().iter().cloned().collect();
        list.push(Arc::clone(&entry));
        self.entries.store(Arc::new(list));
        entry
    }

    /// Removes the entry with `id`. Returns `false` if it was not present.
    pub(crate) fn remove(&self, id: u64) -> bool {
        let _writer = self.next_id.lock();
        let current = self.entries.load_full();
        if !current.iter().any(|e| e.id == id) {
            return false;
        }
        let list: Vec<Arc<ListenerEntry>> =
            current.iter().filter(|e| e.id != id).cloned().collect();
        self.entries.store(Arc::new(list));
        true
    }

    /// Current membership, in registration order.
    #[inline]
    pub(crate) fn snapshot(&self) -> Arc<Vec<Arc<ListenerEntry>>> {
        self.entries.load_full()
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.entries.load().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Event;
    use crate::listeners::ListenerFn;

    fn noop(name: &'static str) -> Arc<dyn Listener> {
        ListenerFn::arc(name, |_: &Event| {})
    }

    #[test]
    fn snapshot_is_unaffected_by_later_writes() {
        let set = ListenerSet::new();
        let a = set.insert(noop("a"));
        let before = set.snapshot();

        set.insert(noop("b"));
        assert!(set.remove(a.id()));

        assert_eq!(before.len(), 1);
        assert_eq!(before[0].name(), "a");
        let after = set.snapshot();
        assert_eq!(after.len(), 1);
        assert_eq!(after[0].name(), "b");
    }

    #[test]
    fn remove_unknown_id_is_noop() {
        let set = ListenerSet::new();
        let a = set.insert(noop("a"));
        assert!(set.remove(a.id()));
        assert!(!set.remove(a.id()));
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn ids_are_unique_and_ordered() {
        let set = ListenerSet::new();
        let a = set.insert(noop("a"));
        let b = set.insert(noop("b"));
        assert!(a.id() < b.id());
        let names: Vec<_> = set.snapshot().iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
