//! Routed events: types and the publish/subscribe bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish events from any thread and deliver them to listeners on a single
//! dispatch task.
//!
//! ## Contents
//! - [`EventKind`], [`Event`], [`SyncNotice`] event classification and payloads
//! - [`Bus`] copy-on-write listener registry plus the dispatch queue
//! - [`Subscription`], [`Subscriptions`] cancellation handles
//! - [`Dispatcher`] the delivery loop, spawned by the router or driven by the host
//!
//! ## Quick reference
//! - **Publishers**: network monitor, sync engine, theme settings (any thread).
//! - **Consumers**: screen listeners (ordinary and exclusive), `LogListener` (feature `logging`).

mod bus;
mod event;

pub use bus::{Bus, BusStats, Dispatcher, Subscription, Subscriptions};
pub use event::{Event, EventKind, SyncNotice};
