//! # Router: the injectable owner of the bus and the exclusive slot.
//!
//! A host creates one [`Router`] and hands it to every screen it constructs.
//! Screens register ordinary listeners on create, claim the exclusive slot on
//! foreground, and release both on destroy.
//!
//! ## High-level architecture
//! ```text
//!   Router::new(cfg)
//!     ├─ Bus::new()            → (bus, dispatcher)
//!     ├─ tokio::spawn(dispatcher.run())
//!     └─ ExclusiveSlot::new(bus)
//!
//!   Screen A          Screen B           Producers
//!     │ subscribe        │ subscribe        │ publish(Event)
//!     │ on_foreground ───┼──────────────────┼──► slot: Occupied(A)
//!     │                  │ on_foreground ───┼──► slot: cancel A, Occupied(B)
//!     │ on_destroy ──────┼──────────────────┼──► slot: owner is B → no-op
//! ```
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use screenbus::{Event, EventKind, ListenerFn, Router, RouterConfig};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), screenbus::BusError> {
//!     let router = Router::new(RouterConfig::default());
//!
//!     let screen: Arc<dyn screenbus::Listener> = ListenerFn::arc("article", |ev: &Event| {
//!         println!("foreground screen got {}", ev.kind.as_label());
//!     });
//!     router.on_foreground(Arc::clone(&screen));
//!
//!     router.publish(EventKind::NetworkConnected);
//!     router.flush().await?;
//!
//!     router.on_teardown(&screen);
//!     router.shutdown().await;
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::config::RouterConfig;
use super::slot::ExclusiveSlot;
use crate::error::BusError;
use crate::events::{Bus, BusStats, Dispatcher, Event, Subscription};
use crate::listeners::Listener;

/// Event router shared by every screen of a host.
pub struct Router {
    cfg: RouterConfig,
    bus: Bus,
    slot: ExclusiveSlot,
    dispatcher: Mutex<Option<JoinHandle<()>>>,
}

impl Router {
    /// Creates a router and spawns its dispatcher on the current tokio runtime.
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime. Use [`Router::with_dispatcher`]
    /// to drive delivery yourself.
    pub fn new(cfg: RouterConfig) -> Arc<Self> {
        let (router, dispatcher) = Self::with_dispatcher(cfg);
        let handle = tokio::spawn(dispatcher.run());
        *router.dispatcher.lock() = Some(handle);
        info!(router = router.cfg.name, "router started");
        router
    }

    /// Creates a router whose dispatcher the caller runs (e.g. on its UI task).
    pub fn with_dispatcher(cfg: RouterConfig) -> (Arc<Self>, Dispatcher) {
        let (bus, dispatcher) = Bus::new(cfg.slow_listener_threshold());
        let router = Arc::new(Self {
            slot: ExclusiveSlot::new(bus.clone()),
            bus,
            cfg,
            dispatcher: Mutex::new(None),
        });
        (router, dispatcher)
    }

    /// Publishes an event to ordinary listeners and the exclusive occupant.
    #[inline]
    pub fn publish(&self, event: impl Into<Event>) {
        self.bus.publish(event);
    }

    /// Registers an ordinary listener.
    #[inline]
    pub fn subscribe(&self, listener: Arc<dyn Listener>) -> Subscription {
        self.bus.subscribe(listener)
    }

    /// Makes `listener` the exclusive listener, displacing the previous one.
    pub fn on_foreground(&self, listener: Arc<dyn Listener>) {
        debug!(router = self.cfg.name, listener = listener.name(), "foreground");
        self.slot.activate(listener);
    }

    /// Releases the exclusive slot if `listener` still owns it.
    ///
    /// Returns `true` if the slot was cleared.
    pub fn on_teardown(&self, listener: &Arc<dyn Listener>) -> bool {
        self.slot.deactivate(listener)
    }

    /// Resolves once every event published before this call was delivered.
    pub async fn flush(&self) -> Result<(), BusError> {
        self.bus.flush().await
    }

    /// Stops delivery after draining queued events and waits for the
    /// dispatcher if this router spawned it.
    pub async fn shutdown(&self) {
        self.bus.close();
        let handle = self.dispatcher.lock().take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
        info!(router = self.cfg.name, "router stopped");
    }

    #[inline]
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    #[inline]
    pub fn slot(&self) -> &ExclusiveSlot {
        &self.slot
    }

    #[inline]
    pub fn config(&self) -> &RouterConfig {
        &self.cfg
    }

    #[inline]
    pub fn stats(&self) -> BusStats {
        self.bus.stats()
    }
}
