//! # LogListener: simple event logger
//!
//! A minimal listener that logs incoming [`Event`]s through `tracing`.
//! Use it for demos or to debug routing.
//!
//! ## Example output
//! ```text
//! INFO screenbus: [network-connected] seq=4
//! INFO screenbus: [sync-notice] seq=5 notice=SplitLargeLists { max_pages: 5000 }
//! INFO screenbus: [theme-changed] seq=6
//! ```

use async_trait::async_trait;
use tracing::info;

use crate::events::{Event, EventKind};
use crate::listeners::Listener;

/// Event logging listener.
#[derive(Default)]
pub struct LogListener;

impl LogListener {
    /// Construct a new [`LogListener`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Listener for LogListener {
    async fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::NetworkConnected => {
                info!(target: "screenbus", "[network-connected] seq={}", e.seq);
            }
            EventKind::SyncNotice(notice) => {
                info!(target: "screenbus", "[sync-notice] seq={} notice={:?}", e.seq, notice);
            }
            EventKind::LoggedOutInBackground => {
                info!(target: "screenbus", "[logged-out-in-background] seq={}", e.seq);
            }
            EventKind::ThemeOrFontChanged => {
                info!(target: "screenbus", "[theme-changed] seq={}", e.seq);
            }
            EventKind::SyncCompleted { show_message } => {
                info!(
                    target: "screenbus",
                    "[sync-completed] seq={} show_message={}", e.seq, show_message
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogListener"
    }
}

#[cfg(all(test, feature = "logging"))]
mod tests {
    use std::io;
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;
    use crate::events::SyncNotice;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn logs_one_line_per_event_kind() {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let events = [
            Event::network_connected(),
            Event::sync_notice(SyncNotice::SplitLargeLists { max_pages: 5000 }),
            Event::logged_out_in_background(),
            Event::theme_or_font_changed(),
            Event::sync_completed(true),
        ];
        tracing::subscriber::with_default(subscriber, || {
            for ev in &events {
                futures::executor::block_on(LogListener::new().on_event(ev));
            }
        });

        let out = String::from_utf8(capture.0.lock().clone()).unwrap();
        for tag in [
            "[network-connected]",
            "[sync-notice]",
            "max_pages: 5000",
            "[logged-out-in-background]",
            "[theme-changed]",
            "[sync-completed]",
        ] {
            assert!(out.contains(tag), "missing {tag} in {out}");
        }
        assert_eq!(LogListener::new().name(), "LogListener");
    }
}
