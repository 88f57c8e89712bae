//! # Listener trait.
//!
//! Provides [`Listener`], the extension point for reacting to routed events,
//! and [`ListenerFn`], a closure-backed implementation.
//!
//! ## Rules
//! - Listeners are invoked one at a time on the dispatcher task, in registration order.
//! - Panics are caught, logged and counted; the remaining listeners still run.
//! - A slow listener delays every listener after it, so keep `on_event` short
//!   and hand long work to a background task.
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use screenbus::{Event, EventKind, Listener};
//!
//! struct Rerender;
//!
//! #[async_trait]
//! impl Listener for Rerender {
//!     async fn on_event(&self, ev: &Event) {
//!         if matches!(ev.kind, EventKind::ThemeOrFontChanged) {
//!             // rebuild the view tree
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "rerender" }
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::events::Event;

/// Receiver of routed events.
///
/// ### Implementation requirements
/// - Handle errors internally; do not panic.
/// - Identity matters: the exclusive slot compares listeners by `Arc` pointer,
///   so keep one `Arc` per logical listener and reuse it.
#[async_trait]
pub trait Listener: Send + Sync + 'static {
    /// Processes a single event.
    ///
    /// Called from the dispatcher task, not in the publisher context.
    async fn on_event(&self, event: &Event);

    /// Returns the listener name used in logs.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose - override it when possible.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Returns `true` if both handles point at the same listener instance.
#[inline]
pub fn same_listener(a: &Arc<dyn Listener>, b: &Arc<dyn Listener>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// Closure-backed listener.
pub struct ListenerFn<F> {
    name: &'static str,
    f: F,
}

impl<F> ListenerFn<F>
where
    F: Fn(&Event) + Send + Sync + 'static,
{
    pub fn new(name: &'static str, f: F) -> Self {
        Self { name, f }
    }

    /// Creates the listener and returns it as a shared handle.
    ///
    /// ## Example
    /// ```rust
    /// use std::sync::Arc;
    /// use screenbus::{Event, Listener, ListenerFn};
    ///
    /// let l: Arc<dyn Listener> = ListenerFn::arc("printer", |ev: &Event| {
    ///     println!("{}", ev.kind.as_label());
    /// });
    /// assert_eq!(l.name(), "printer");
    /// ```
    pub fn arc(name: &'static str, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<F> Listener for ListenerFn<F>
where
    F: Fn(&Event) + Send + Sync + 'static,
{
    async fn on_event(&self, event: &Event) {
        (self.f)(event);
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_per_instance() {
        let a: Arc<dyn Listener> = ListenerFn::arc("a", |_: &Event| {});
        let a2 = Arc::clone(&a);
        let b: Arc<dyn Listener> = ListenerFn::arc("a", |_: &Event| {});

        assert!(same_listener(&a, &a2));
        assert!(!same_listener(&a, &b));
    }
}
