//! # Events routed between producers and screens.
//!
//! [`EventKind`] is a closed set of variants: listeners dispatch on it with an
//! exhaustive `match`, so adding a kind forces every listener to decide how to
//! handle it.
//!
//! The [`Event`] struct wraps a kind with ordering metadata (`seq`, `at`).
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! Events published from a single thread are delivered in `seq` order.
//!
//! ## Example
//! ```rust
//! use screenbus::{Event, EventKind, SyncNotice};
//!
//! let ev = Event::new(EventKind::SyncNotice(SyncNotice::SplitLargeLists { max_pages: 5000 }));
//! assert_eq!(ev.kind.as_label(), "sync_notice");
//!
//! let later = Event::new(EventKind::NetworkConnected);
//! assert!(later.seq > ev.seq);
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Reading-list sync behavior notices raised by the sync engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncNotice {
    /// Lists larger than the server allows were split locally.
    SplitLargeLists {
        /// Maximum number of pages a single remote list may hold.
        max_pages: u32,
    },
    /// Remote lists were torn down from another device; sync is off.
    NoLongerSynced,
    /// The user should be asked whether to enable sync.
    EnableSyncPrompt,
}

/// Classification of routed events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// The device regained network connectivity.
    NetworkConnected,

    /// A reading-list sync behavior notice.
    SyncNotice(SyncNotice),

    /// The session was invalidated while the app was in the background.
    LoggedOutInBackground,

    /// The theme or font size changed; screens must re-render.
    ThemeOrFontChanged,

    /// A reading-list sync pass finished.
    SyncCompleted {
        /// Whether the user asked to see a confirmation.
        show_message: bool,
    },
}

impl EventKind {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            EventKind::NetworkConnected => "network_connected",
            EventKind::SyncNotice(_) => "sync_notice",
            EventKind::LoggedOutInBackground => "logged_out_in_background",
            EventKind::ThemeOrFontChanged => "theme_or_font_changed",
            EventKind::SyncCompleted { .. } => "sync_completed",
        }
    }
}

/// Routed event with ordering metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
#[derive(Debug, Clone)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification and payload.
    pub kind: EventKind,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
        }
    }

    #[inline]
    pub fn network_connected() -> Self {
        Self::new(EventKind::NetworkConnected)
    }

    #[inline]
    pub fn sync_notice(notice: SyncNotice) -> Self {
        Self::new(EventKind::SyncNotice(notice))
    }

    #[inline]
    pub fn logged_out_in_background() -> Self {
        Self::new(EventKind::LoggedOutInBackground)
    }

    #[inline]
    pub fn theme_or_font_changed() -> Self {
        Self::new(EventKind::ThemeOrFontChanged)
    }

    #[inline]
    pub fn sync_completed(show_message: bool) -> Self {
        Self::new(EventKind::SyncCompleted { show_message })
    }
}

impl From<EventKind> for Event {
    fn from(kind: EventKind) -> Self {
        Event::new(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seq_is_monotonic() {
        let a = Event::network_connected();
        let b = Event::theme_or_font_changed();
        let c = Event::sync_completed(true);
        assert!(a.seq < b.seq);
        assert!(b.seq < c.seq);
    }

    #[test]
    fn labels_cover_payload_variants() {
        assert_eq!(
            EventKind::SyncNotice(SyncNotice::NoLongerSynced).as_label(),
            "sync_notice"
        );
        assert_eq!(
            EventKind::SyncCompleted { show_message: false }.as_label(),
            "sync_completed"
        );
        assert_eq!(
            Event::from(EventKind::LoggedOutInBackground).kind,
            EventKind::LoggedOutInBackground
        );
    }
}
