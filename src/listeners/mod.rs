//! # Event listeners.
//!
//! This module provides the [`Listener`] trait, a closure adapter, the
//! copy-on-write registry the bus delivers from, and a built-in logger.
//!
//! ## Listener kinds
//! - **Ordinary** - registered for the lifetime of their owner, receive every event.
//! - **Exclusive** - installed through the [`ExclusiveSlot`](crate::ExclusiveSlot);
//!   at most one is subscribed at any time.
//!
//! Both kinds implement the same trait; the difference is only in how they are registered.

mod listener;
mod set;

#[cfg(feature = "logging")]
mod log;

pub use listener::{Listener, ListenerFn, same_listener};
pub(crate) use set::{ListenerEntry, ListenerSet};

#[cfg(feature = "logging")]
pub use log::LogListener;
