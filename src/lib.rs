//! # screenbus
//!
//! **screenbus** is an in-process event router for screen-based applications.
//!
//! Producers publish events from any thread. Every live screen keeps an
//! *ordinary* listener that sees every event, and the foregrounded screen
//! owns the single *exclusive* listener slot, so events like "network is
//! back" or "sync finished" are handled once, by the screen the user is
//! looking at.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │NetworkMonitor│   │  SyncEngine  │   │ThemeSettings │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼ publish          ▼ publish          ▼ publish
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Router (owned by the host, injected into every screen)           │
//! │  - Bus: copy-on-write ListenerSet + unbounded dispatch queue      │
//! │  - ExclusiveSlot: Empty | Occupied(listener, subscription)        │
//! └──────┬───────────────────────────────────────────────┬────────────┘
//!        ▼                                               ▼
//! ┌──────────────────┐                         ┌──────────────────┐
//! │   Dispatcher     │  one task, in order:    │  ExclusiveSlot   │
//! │  for each event  │  ordinary A, ordinary B │  activate(L)     │
//! │  for each entry  │  exclusive (≤ 1)        │  deactivate(L)   │
//! └──────────────────┘                         └──────────────────┘
//! ```
//!
//! ### Screen lifecycle
//! ```text
//! Screen::on_create      ─► subscribe ordinary listener
//! Screen::on_foreground  ─► slot.activate(exclusive)   (previous owner cancelled)
//! Screen::on_background  ─► nothing (slot changes only when another screen comes forward)
//! Screen::on_destroy     ─► cancel ordinary; slot.deactivate(exclusive) if still the owner
//! ```
//!
//! ## Features
//! | Area              | Description                                                | Key types / traits                         |
//! |-------------------|------------------------------------------------------------|--------------------------------------------|
//! | **Routing**       | Publish from any thread, deliver on one dispatcher task.   | [`Router`], [`Bus`], [`Dispatcher`]        |
//! | **Arbitration**   | At most one exclusive listener, identity-checked release.  | [`ExclusiveSlot`]                          |
//! | **Listeners**     | Async listener trait, closure adapter, panic isolation.   | [`Listener`], [`ListenerFn`]               |
//! | **Screens**       | Lifecycle hooks wiring a host screen to the router.        | [`Screen`], [`ScreenUi`], [`Collaborators`]|
//! | **Preferences**   | Durable typed key/value store.                             | [`PreferenceStore`], [`FilePreferences`]   |
//! | **Watchlist**     | Language filter and entry badges.                          | [`LanguageFilter`], [`DiffBadge`]          |
//! | **Errors**        | Typed errors for the bus and preference storage.           | [`BusError`], [`PrefsError`]               |
//! | **Configuration** | Router settings.                                           | [`RouterConfig`]                           |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in `LogListener` _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use screenbus::{Event, EventKind, Listener, ListenerFn, Router, RouterConfig};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let router = Router::new(RouterConfig::default());
//!     let seen = Arc::new(AtomicUsize::new(0));
//!
//!     let counter = Arc::clone(&seen);
//!     let first: Arc<dyn Listener> = ListenerFn::arc("first", move |_ev: &Event| {
//!         counter.fetch_add(1, Ordering::SeqCst);
//!     });
//!     let second: Arc<dyn Listener> = ListenerFn::arc("second", |_ev: &Event| {});
//!
//!     router.on_foreground(Arc::clone(&first));
//!     router.on_foreground(Arc::clone(&second)); // displaces `first`
//!
//!     router.publish(EventKind::NetworkConnected);
//!     router.flush().await?;
//!     assert_eq!(seen.load(Ordering::SeqCst), 0);
//!
//!     // Stale teardown of `first` leaves `second` in place.
//!     assert!(!router.on_teardown(&first));
//!     assert_eq!(router.slot().occupant_name(), Some("second"));
//!
//!     router.shutdown().await;
//!     Ok(())
//! }
//! ```
mod core;
mod error;
mod events;
mod listeners;
mod prefs;
mod screen;
mod watchlist;

// ---- Public re-exports ----

pub use crate::core::{ExclusiveSlot, Router, RouterConfig};
pub use error::{BusError, PrefsError};
pub use events::{Bus, BusStats, Dispatcher, Event, EventKind, Subscription, Subscriptions, SyncNotice};
pub use listeners::{Listener, ListenerFn, same_listener};
pub use prefs::{FilePreferences, MemoryPreferences, PrefKey, PrefValue, PreferenceStore, PrefsExt};
pub use screen::{
    Account, BackgroundSync, Collaborators, Color, NetworkMonitor, NetworkTransition, Notice,
    NoticeAction, Permission, PermissionOutcome, PermissionRequester, STORAGE_PERMISSION_REQUEST,
    Screen, ScreenState, ScreenUi, ThemeAttr, ThemeResolver, is_permitted,
};
pub use watchlist::{
    BadgeIcon, DiffBadge, LanguageFilter, LanguageToggle, LogType, WatchlistItem,
    show_language_badge,
};

// Optional: expose a simple built-in logging listener (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use listeners::LogListener;
