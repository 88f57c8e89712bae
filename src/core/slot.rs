//! # Exclusive-slot arbitration.
//!
//! The slot holds at most **one** exclusive listener subscribed to the bus.
//! Activating a listener displaces the current occupant; deactivating only
//! clears the slot if the caller still owns it.
//!
//! ## States
//! ```text
//!            activate(L)                 activate(L')
//!   Empty ───────────────► Occupied(L) ───────────────► Occupied(L')
//!     ▲                      │    ▲ │                    (L cancelled first)
//!     │    deactivate(L)     │    │ │ deactivate(X), X ≠ L
//!     └──────────────────────┘    └─┘ (no-op)
//! ```
//!
//! ## Invariants
//! - The previous occupant is cancelled before the new one is subscribed, so
//!   no event snapshot ever contains two exclusive listeners.
//! - All transitions happen under one mutex; concurrent activations serialize.
//! - Ownership is checked by listener identity, not by "slot is non-empty".

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::events::{Bus, Subscription};
use crate::listeners::{Listener, same_listener};

/// State of the exclusive slot.
enum SlotState {
    /// No exclusive listener is installed.
    Empty,

    /// One listener is installed and subscribed.
    Occupied {
        listener: Arc<dyn Listener>,
        subscription: Subscription,
    },
}

/// Single-occupant register for the exclusive listener.
pub struct ExclusiveSlot {
    bus: Bus,
    state: Mutex<SlotState>,
}

impl ExclusiveSlot {
    /// Creates an empty slot bound to `bus`.
    pub fn new(bus: Bus) -> Self {
        Self {
            bus,
            state: Mutex::new(SlotState::Empty),
        }
    }

    /// Installs `listener` as the sole exclusive listener.
    ///
    /// Cancels the current occupant (if any), subscribes `listener`, and stores
    /// it. Re-activating the current occupant re-subscribes it.
    pub fn activate(&self, listener: Arc<dyn Listener>) {
        let mut state = self.state.lock();

        if let SlotState::Occupied {
            listener: previous,
            subscription,
        } = std::mem::replace(&mut *state, SlotState::Empty)
        {
            subscription.cancel();
            debug!(
                previous = previous.name(),
                next = listener.name(),
                "exclusive listener displaced"
            );
        }

        let subscription = self.bus.subscribe(Arc::clone(&listener));
        *state = SlotState::Occupied {
            listener,
            subscription,
        };
    }

    /// Clears the slot if `listener` is the current occupant; otherwise does nothing.
    ///
    /// Returns `true` if the slot was cleared.
    pub fn deactivate(&self, listener: &Arc<dyn Listener>) -> bool {
        let mut state = self.state.lock();

        let owned = match &*state {
            SlotState::Occupied { listener: current, .. } => same_listener(current, listener),
            SlotState::Empty => false,
        };
        if !owned {
            debug!(listener = listener.name(), "stale exclusive deactivation ignored");
            return false;
        }

        if let SlotState::Occupied { subscription, .. } =
            std::mem::replace(&mut *state, SlotState::Empty)
        {
            subscription.cancel();
        }
        debug!(listener = listener.name(), "exclusive slot cleared");
        true
    }

    /// Returns `true` if an exclusive listener is installed.
    pub fn is_occupied(&self) -> bool {
        matches!(*self.state.lock(), SlotState::Occupied { .. })
    }

    /// Returns `true` if `listener` is the current occupant.
    pub fn is_owned_by(&self, listener: &Arc<dyn Listener>) -> bool {
        match &*self.state.lock() {
            SlotState::Occupied { listener: current, .. } => same_listener(current, listener),
            SlotState::Empty => false,
        }
    }

    /// Name of the current occupant, if any.
    pub fn occupant_name(&self) -> Option<&'static str> {
        match &*self.state.lock() {
            SlotState::Occupied { listener, .. } => Some(listener.name()),
            SlotState::Empty => None,
        }
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
    fn starts_empty() {
        let (bus, _dispatcher) = Bus::new(None);
        let slot = ExclusiveSlot::new(bus.clone());
        assert!(!slot.is_occupied());
        assert_eq!(slot.occupant_name(), None);
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn activation_sequence_keeps_only_last() {
        let (bus, _dispatcher) = Bus::new(None);
        let slot = ExclusiveSlot::new(bus.clone());
        let listeners: Vec<_> = ["s1", "s2", "s3", "s4"].into_iter().map(noop).collect();

        for l in &listeners {
            slot.activate(Arc::clone(l));
            assert_eq!(bus.listener_count(), 1);
        }

        assert!(slot.is_owned_by(&listeners[3]));
        for l in &listeners[..3] {
            assert!(!slot.is_owned_by(l));
        }
        assert_eq!(slot.occupant_name(), Some("s4"));
    }

    #[test]
    fn deactivate_requires_ownership() {
        let (bus, _dispatcher) = Bus::new(None);
        let slot = ExclusiveSlot::new(bus.clone());
        let a = noop("a");
        let b = noop("b");

        slot.activate(Arc::clone(&a));
        assert!(!slot.deactivate(&b));
        assert!(slot.is_owned_by(&a));
        assert_eq!(bus.listener_count(), 1);

        assert!(slot.deactivate(&a));
        assert!(!slot.is_occupied());
        assert_eq!(bus.listener_count(), 0);

        // Repeated teardown is harmless.
        assert!(!slot.deactivate(&a));
    }

    #[test]
    fn reactivating_occupant_resubscribes() {
        let (bus, _dispatcher) = Bus::new(None);
        let slot = ExclusiveSlot::new(bus.clone());
        let a = noop("a");

        slot.activate(Arc::clone(&a));
        slot.activate(Arc::clone(&a));
        assert!(slot.is_owned_by(&a));
        assert_eq!(bus.listener_count(), 1);
    }

    #[test]
    fn ordinary_listeners_are_untouched() {
        let (bus, _dispatcher) = Bus::new(None);
        let slot = ExclusiveSlot::new(bus.clone());
        let _ordinary = bus.subscribe(noop("ordinary"));

        slot.activate(noop("a"));
        slot.activate(noop("b"));
        assert_eq!(bus.listener_count(), 2);
    }

    #[test]
    fn concurrent_activation_leaves_one_occupant() {
        let (bus, _dispatcher) = Bus::new(None);
        let slot = Arc::new(ExclusiveSlot::new(bus.clone()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let slot = Arc::clone(&slot);
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        slot.activate(noop("racer"));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert!(slot.is_occupied());
        assert_eq!(bus.listener_count(), 1);
    }
}
