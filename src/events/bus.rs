//! # Event bus with a single delivery task.
//!
//! [`Bus`] accepts events from any thread and hands them to a [`Dispatcher`],
//! which invokes listeners one at a time on whatever task runs it. Hosts that
//! need side effects on their main thread run the dispatcher there; otherwise
//! the [`Router`](crate::Router) spawns it on the current tokio runtime.
//!
//! ## Architecture
//! ```text
//! Publishers (many, any thread):      Dispatcher (one task):
//!   NetworkMonitor ──┐
//!   SyncEngine     ──┼──► publish ──► [unbounded queue] ──► for entry in snapshot:
//!   ThemeSettings  ──┘      │                                  skip if cancelled
//!                           │                                  listener.on_event(&ev)
//!                           └─ snapshot of ListenerSet          panic → warn!, continue
//!                              taken at publish time
//! ```
//!
//! ## Rules
//! - **Non-blocking publish**: `publish()` never blocks and never fails; a closed bus drops the event.
//! - **Publish-time membership**: an event goes to the listeners registered when it was published.
//! - **Cancellation wins**: a listener cancelled before delivery is skipped.
//! - **Ordering**: listeners are invoked in registration order; events in publish order.
//! - **Isolation**: a panicking listener is logged and skipped; the rest still receive the event.
//! - **Explicit cancellation**: dropping a [`Subscription`] does not cancel it.

use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

use futures::FutureExt;
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use super::event::Event;
use crate::error::BusError;
use crate::listeners::{Listener, ListenerEntry, ListenerSet};

/// Work items consumed by the dispatcher, in FIFO order.
enum Command {
    Deliver {
        event: Arc<Event>,
        targets: Arc<Vec<Arc<ListenerEntry>>>,
    },
    Flush(oneshot::Sender<()>),
    Close,
}

#[derive(Default)]
struct Counters {
    published: AtomicU64,
    delivered: AtomicU64,
    faults: AtomicU64,
}

/// Point-in-time delivery counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BusStats {
    /// Events accepted by `publish` (including ones dropped by a closed bus).
    pub published: u64,
    /// Successful listener invocations.
    pub delivered: u64,
    /// Listener invocations that panicked.
    pub faults: u64,
}

struct Shared {
    tx: mpsc::UnboundedSender<Command>,
    listeners: ListenerSet,
    counters: Arc<Counters>,
}

/// Publish/subscribe channel for routed events.
///
/// ### Properties
/// - **Any-thread publish**: `publish()` is synchronous and needs no runtime.
/// - **Copy-on-write registry**: subscribe/cancel never block a publish in flight.
/// - **Cloneable**: cheap to clone (internally `Arc`-backed).
#[derive(Clone)]
pub struct Bus {
    shared: Arc<Shared>,
}

impl Bus {
    /// Creates a bus and the dispatcher that delivers its events.
    ///
    /// Nothing is delivered until [`Dispatcher::run`] is polled.
    /// `slow_listener` enables a warning for listeners slower than the given duration.
    pub fn new(slow_listener: Option<Duration>) -> (Self, Dispatcher) {
        let (tx, rx) = mpsc::unbounded_channel();
        let counters = Arc::new(Counters::default());
        let bus = Self {
            shared: Arc::new(Shared {
                tx,
                listeners: ListenerSet::new(),
                counters: Arc::clone(&counters),
            }),
        };
        let dispatcher = Dispatcher {
            rx,
            counters,
            slow_listener,
        };
        (bus, dispatcher)
    }

    /// Publishes an event to every currently registered listener.
    ///
    /// - Returns immediately; delivery happens on the dispatcher.
    /// - If the bus is closed, the event is dropped (logged at `debug`).
    pub fn publish(&self, event: impl Into<Event>) {
        let event = Arc::new(event.into());
        let targets = self.shared.listeners.snapshot();
        self.shared.counters.published.fetch_add(1, Ordering::Relaxed);

        let seq = event.seq;
        let kind = event.kind.as_label();
        if self
            .shared
            .tx
            .send(Command::Deliver { event, targets })
            .is_err()
        {
            debug!(seq, kind, "bus closed; event dropped");
        }
    }

    /// Registers a listener and returns its cancellation handle.
    ///
    /// The listener receives events published **after** this call.
    pub fn subscribe(&self, listener: Arc<dyn Listener>) -> Subscription {
        let entry = self.shared.listeners.insert(listener);
        trace!(listener = entry.name(), id = entry.id(), "listener subscribed");
        Subscription {
            id: entry.id(),
            name: entry.name(),
            token: entry.token().clone(),
            shared: Arc::downgrade(&self.shared),
        }
    }

    /// Resolves once every event published before this call has been delivered.
    pub async fn flush(&self) -> Result<(), BusError> {
        let (ack, done) = oneshot::channel();
        self.shared
            .tx
            .send(Command::Flush(ack))
            .map_err(|_closed| BusError::Closed)?;
        done.await.map_err(|_dropped| BusError::Closed)
    }

    /// Asks the dispatcher to stop after draining everything queued so far.
    pub fn close(&self) {
        let _ = self.shared.tx.send(Command::Close);
    }

    /// Returns `true` once the dispatcher has stopped accepting work.
    pub fn is_closed(&self) -> bool {
        self.shared.tx.is_closed()
    }

    /// Number of listeners currently registered.
    pub fn listener_count(&self) -> usize {
        self.shared.listeners.len()
    }

    /// Snapshot of delivery counters.
    pub fn stats(&self) -> BusStats {
        let c = &self.shared.counters;
        BusStats {
            published: c.published.load(Ordering::Relaxed),
            delivered: c.delivered.load(Ordering::Relaxed),
            faults: c.faults.load(Ordering::Relaxed),
        }
    }
}

/// Delivery loop for a [`Bus`].
///
/// Run it exactly once, on the task that should own listener side effects.
pub struct Dispatcher {
    rx: mpsc::UnboundedReceiver<Command>,
    counters: Arc<Counters>,
    slow_listener: Option<Duration>,
}

impl Dispatcher {
    /// Delivers events until the bus is closed or every [`Bus`] handle is dropped.
    pub async fn run(mut self) {
        while let Some(cmd) = self.rx.recv().await {
            match cmd {
                Command::Deliver { event, targets } => self.deliver(&event, &targets).await,
                Command::Flush(ack) => {
                    let _ = ack.send(());
                }
                Command::Close => {
                    debug!("bus close requested; draining queued events");
                    self.rx.close();
                }
            }
        }
        debug!("dispatcher stopped");
    }

    async fn deliver(&self, event: &Event, targets: &[Arc<ListenerEntry>]) {
        for entry in targets {
            if entry.is_cancelled() {
                trace!(listener = entry.name(), seq = event.seq, "skipping cancelled listener");
                continue;
            }

            let started = Instant::now();
            let fut = entry.listener().on_event(event);
            match AssertUnwindSafe(fut).catch_unwind().await {
                Ok(()) => {
                    self.counters.delivered.fetch_add(1, Ordering::Relaxed);
                }
                Err(panic_err) => {
                    self.counters.faults.fetch_add(1, Ordering::Relaxed);
                    warn!(
                        listener = entry.name(),
                        seq = event.seq,
                        kind = event.kind.as_label(),
                        info = %panic_message(&*panic_err),
                        "listener panicked; continuing with remaining listeners"
                    );
                }
            }

            if let Some(limit) = self.slow_listener {
                let elapsed = started.elapsed();
                if elapsed > limit {
                    warn!(
                        listener = entry.name(),
                        seq = event.seq,
                        elapsed_ms = elapsed.as_millis() as u64,
                        "slow listener"
                    );
                }
            }
        }
    }
}

fn panic_message(any: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = any.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = any.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Cancellation handle returned by [`Bus::subscribe`].
///
/// `cancel()` is idempotent and never fails: cancelling a handle whose bus is
/// gone, or whose listener was already removed, does nothing.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    name: &'static str,
    token: CancellationToken,
    shared: Weak<Shared>,
}

impl Subscription {
    /// Removes the listener from the bus. Pending deliveries to it are skipped.
    pub fn cancel(&self) {
        if self.token.is_cancelled() {
            return;
        }
        self.token.cancel();
        if let Some(shared) = self.shared.upgrade() {
            shared.listeners.remove(self.id);
        }
        trace!(listener = self.name, id = self.id, "listener cancelled");
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Name of the subscribed listener.
    #[inline]
    pub fn listener_name(&self) -> &'static str {
        self.name
    }
}

/// A group of subscriptions cancelled together (e.g. on screen teardown).
#[derive(Debug, Default)]
pub struct Subscriptions {
    items: Vec<Subscription>,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, subscription: Subscription) {
        self.items.push(subscription);
    }

    /// Cancels and forgets every held subscription.
    pub fn cancel_all(&mut self) {
        for sub in self.items.drain(..) {
            sub.cancel();
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use crate::listeners::ListenerFn;
    use parking_lot::Mutex;

    fn recorder(name: &'static str, log: &Arc<Mutex<Vec<(&'static str, u64)>>>) -> Arc<dyn Listener> {
        let log = Arc::clone(log);
        ListenerFn::arc(name, move |ev: &Event| log.lock().push((name, ev.seq)))
    }

    #[tokio::test]
    async fn delivers_in_registration_order() {
        let (bus, dispatcher) = Bus::new(None);
        tokio::spawn(dispatcher.run());

        let log = Arc::new(Mutex::new(Vec::new()));
        let _a = bus.subscribe(recorder("a", &log));
        let _b = bus.subscribe(recorder("b", &log));

        let ev = Event::network_connected();
        let seq = ev.seq;
        bus.publish(ev);
        bus.flush().await.unwrap();

        assert_eq!(*log.lock(), vec![("a", seq), ("b", seq)]);
        assert_eq!(bus.stats().delivered, 2);
    }

    #[tokio::test]
    async fn cancel_is_idempotent_and_stops_delivery() {
        let (bus, dispatcher) = Bus::new(None);
        tokio::spawn(dispatcher.run());

        let log = Arc::new(Mutex::new(Vec::new()));
        let sub = bus.subscribe(recorder("a", &log));
        assert_eq!(bus.listener_count(), 1);

        sub.cancel();
        sub.cancel();
        assert!(sub.is_cancelled());
        assert_eq!(bus.listener_count(), 0);

        bus.publish(EventKind::ThemeOrFontChanged);
        bus.flush().await.unwrap();
        assert!(log.lock().is_empty());
    }

    #[tokio::test]
    async fn cancelled_before_delivery_is_skipped() {
        let (bus, dispatcher) = Bus::new(None);
        let log = Arc::new(Mutex::new(Vec::new()));
        let sub = bus.subscribe(recorder("a", &log));

        // Published while registered, cancelled before the dispatcher runs.
        bus.publish(EventKind::NetworkConnected);
        sub.cancel();

        tokio::spawn(dispatcher.run());
        bus.flush().await.unwrap();
        assert!(log.lock().is_empty());
    }

    #[tokio::test]
    async fn late_subscriber_misses_earlier_events() {
        let (bus, dispatcher) = Bus::new(None);
        let log = Arc::new(Mutex::new(Vec::new()));

        bus.publish(EventKind::NetworkConnected);
        let _sub = bus.subscribe(recorder("late", &log));

        tokio::spawn(dispatcher.run());
        bus.flush().await.unwrap();
        assert!(log.lock().is_empty());
    }

    #[tokio::test]
    async fn close_drains_then_rejects() {
        let (bus, dispatcher) = Bus::new(None);
        let handle = tokio::spawn(dispatcher.run());

        let log = Arc::new(Mutex::new(Vec::new()));
        let _sub = bus.subscribe(recorder("a", &log));
        bus.publish(EventKind::NetworkConnected);
        bus.close();
        handle.await.unwrap();

        assert_eq!(log.lock().len(), 1);
        assert!(bus.is_closed());
        assert_eq!(bus.flush().await, Err(BusError::Closed));

        // Publishing on a closed bus is a silent drop.
        bus.publish(EventKind::NetworkConnected);
        assert_eq!(bus.stats().published, 2);
    }

    #[tokio::test]
    async fn cancel_after_bus_dropped_is_noop() {
        let (bus, dispatcher) = Bus::new(None);
        let log = Arc::new(Mutex::new(Vec::new()));
        let sub = bus.subscribe(recorder("a", &log));
        drop(dispatcher);
        drop(bus);
        sub.cancel();
        assert!(sub.is_cancelled());
    }

    #[tokio::test]
    async fn subscriptions_cancel_all() {
        let (bus, dispatcher) = Bus::new(None);
        tokio::spawn(dispatcher.run());
        let log = Arc::new(Mutex::new(Vec::new()));

        let mut subs = Subscriptions::new();
        subs.push(bus.subscribe(recorder("a", &log)));
        subs.push(bus.subscribe(recorder("b", &log)));
        assert_eq!(subs.len(), 2);

        subs.cancel_all();
        assert!(subs.is_empty());
        assert_eq!(bus.listener_count(), 0);
    }
}
