//! # Screen: lifecycle wiring between a host screen and the router.
//!
//! Each screen owns two listeners:
//! - an **ordinary** listener, subscribed on create and cancelled on destroy;
//! - an **exclusive** listener, installed in the router's slot every time the
//!   screen comes to the foreground.
//!
//! ## Lifecycle
//! ```text
//! new ──► on_create ──► on_foreground ◄──► on_background ──► on_destroy
//!            │               │                                   │
//!            │ subscribe     │ slot.activate(exclusive)          │ cancel ordinary
//!            │ ordinary      │                                   │ slot.deactivate(exclusive)
//!            │                                                   │ (no-op if another screen owns it)
//!            └ first-run sync, logged-out prompt, bar color
//! ```
//!
//! ## Event handling
//! | Event                    | Ordinary            | Exclusive                                    |
//! |--------------------------|---------------------|----------------------------------------------|
//! | `NetworkConnected`       | -                   | `sync.enqueue()`                             |
//! | `SyncNotice(n)`          | -                   | matching [`Notice`]                          |
//! | `LoggedOutInBackground`  | -                   | logged-out notice if the flag is still set   |
//! | `ThemeOrFontChanged`     | `ui.recreate()`     | -                                            |
//! | `SyncCompleted`          | -                   | notice if requested and not deprioritized    |

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::host::{Collaborators, Notice, NoticeAction, Permission, ScreenUi, ThemeAttr};
use super::network::{NetworkMonitor, NetworkTransition};
use super::permission::{self, PermissionOutcome, STORAGE_PERMISSION_REQUEST};
use crate::core::Router;
use crate::error::PrefsError;
use crate::events::{Event, EventKind, Subscriptions, SyncNotice};
use crate::listeners::Listener;
use crate::prefs::{PrefKey, PrefsExt};

/// Lifecycle position of a [`Screen`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    Initialized,
    Created,
    Foreground,
    Background,
    Destroyed,
}

struct ScreenInner<U> {
    name: &'static str,
    ui: U,
    deps: Collaborators,
}

impl<U: ScreenUi> ScreenInner<U> {
    fn handle_ordinary(&self, event: &Event) {
        match event.kind {
            EventKind::ThemeOrFontChanged => self.ui.recreate(),
            EventKind::NetworkConnected
            | EventKind::SyncNotice(_)
            | EventKind::LoggedOutInBackground
            | EventKind::SyncCompleted { .. } => {}
        }
    }

    fn handle_exclusive(&self, event: &Event) {
        match event.kind {
            EventKind::NetworkConnected => self.deps.sync.enqueue(),
            EventKind::SyncNotice(notice) => self.ui.show_notice(match notice {
                SyncNotice::SplitLargeLists { max_pages } => Notice::SplitLargeLists { max_pages },
                SyncNotice::NoLongerSynced => Notice::RemoteListsTornDown,
                SyncNotice::EnableSyncPrompt => Notice::EnableSyncPrompt,
            }),
            EventKind::LoggedOutInBackground => self.maybe_show_logged_out(),
            EventKind::SyncCompleted { show_message } => {
                let deprioritized = self.deps.prefs.flag(PrefKey::SuggestedEditsHighestPriority);
                if show_message && !deprioritized {
                    self.ui.show_notice(Notice::SyncCompleted);
                }
            }
            EventKind::ThemeOrFontChanged => {}
        }
    }

    fn maybe_show_logged_out(&self) {
        if !self.deps.prefs.flag(PrefKey::LoggedOutInBackground) {
            return;
        }
        self.log_pref_failure(self.deps.prefs.set_flag(PrefKey::LoggedOutInBackground, false));
        self.ui.show_notice(Notice::LoggedOutInBackground);
    }

    fn log_pref_failure(&self, result: Result<(), PrefsError>) {
        if let Err(e) = result {
            warn!(screen = self.name, label = e.as_label(), error = %e, "preference write failed");
        }
    }
}

struct OrdinaryListener<U> {
    inner: Arc<ScreenInner<U>>,
}

#[async_trait]
impl<U: ScreenUi> Listener for OrdinaryListener<U> {
    async fn on_event(&self, event: &Event) {
        self.inner.handle_ordinary(event);
    }

    fn name(&self) -> &'static str {
        self.inner.name
    }
}

struct ExclusiveListener<U> {
    inner: Arc<ScreenInner<U>>,
}

#[async_trait]
impl<U: ScreenUi> Listener for ExclusiveListener<U> {
    async fn on_event(&self, event: &Event) {
        self.inner.handle_exclusive(event);
    }

    fn name(&self) -> &'static str {
        self.inner.name
    }
}

/// One host screen bound to a [`Router`].
///
/// Dropping a screen that was never destroyed runs the destroy path.
pub struct Screen<U: ScreenUi> {
    inner: Arc<ScreenInner<U>>,
    router: Arc<Router>,
    exclusive: Arc<dyn Listener>,
    subscriptions: Subscriptions,
    network: NetworkMonitor,
    state: ScreenState,
}

impl<U: ScreenUi> Screen<U> {
    /// Builds a screen. Nothing is registered until [`Screen::on_create`].
    pub fn new(
        name: &'static str,
        ui: U,
        deps: Collaborators,
        router: Arc<Router>,
        initially_online: bool,
    ) -> Self {
        let inner = Arc::new(ScreenInner { name, ui, deps });
        let exclusive: Arc<dyn Listener> = Arc::new(ExclusiveListener {
            inner: Arc::clone(&inner),
        });
        Self {
            inner,
            router,
            exclusive,
            subscriptions: Subscriptions::new(),
            network: NetworkMonitor::new(initially_online),
            state: ScreenState::Initialized,
        }
    }

    /// Registers the ordinary listener and runs first-show housekeeping.
    ///
    /// Calling it again after the first time does nothing.
    pub fn on_create(&mut self) {
        if self.state != ScreenState::Initialized {
            debug!(screen = self.inner.name, state = ?self.state, "on_create ignored");
            return;
        }

        let ordinary = Arc::new(OrdinaryListener {
            inner: Arc::clone(&self.inner),
        });
        self.subscriptions.push(self.router.subscribe(ordinary));

        let deps = &self.inner.deps;
        if deps.prefs.flag(PrefKey::ReadingListsFirstTimeSync) && deps.account.is_logged_in() {
            self.inner
                .log_pref_failure(deps.prefs.set_flag(PrefKey::ReadingListsFirstTimeSync, false));
            self.inner
                .log_pref_failure(deps.prefs.set_flag(PrefKey::ReadingListSyncEnabled, true));
            deps.sync.force_sync();
            info!(screen = self.inner.name, "first-time reading list sync enabled");
        }

        let paper = deps.theme.resolve(ThemeAttr::Paper);
        self.inner.ui.apply_system_bar_color(paper);

        self.inner.maybe_show_logged_out();
        self.inner
            .log_pref_failure(deps.prefs.set_text(PrefKey::LastCreatedScreen, self.inner.name));

        self.state = ScreenState::Created;
    }

    /// Claims the exclusive slot for this screen.
    pub fn on_foreground(&mut self) {
        if matches!(self.state, ScreenState::Initialized | ScreenState::Destroyed) {
            debug!(screen = self.inner.name, state = ?self.state, "on_foreground ignored");
            return;
        }
        self.router.on_foreground(Arc::clone(&self.exclusive));
        self.inner.log_pref_failure(
            self.inner
                .deps
                .prefs
                .set_flag(PrefKey::CrashedBeforeScreenCreated, false),
        );
        self.state = ScreenState::Foreground;
    }

    /// Marks the screen as backgrounded.
    ///
    /// The slot is only replaced when another screen comes to the foreground.
    pub fn on_background(&mut self) {
        if self.state == ScreenState::Foreground {
            self.state = ScreenState::Background;
        }
    }

    /// Cancels the ordinary listener and releases the slot if still owned.
    pub fn on_destroy(&mut self) {
        if self.state == ScreenState::Destroyed {
            return;
        }
        self.subscriptions.cancel_all();
        if !self.router.on_teardown(&self.exclusive) {
            debug!(screen = self.inner.name, "slot owned by another screen; left untouched");
        }
        self.state = ScreenState::Destroyed;
    }

    /// Feeds a connectivity report from the platform.
    ///
    /// Reports are only handled between create and destroy.
    pub fn on_network_changed(&mut self, online: bool) {
        if matches!(self.state, ScreenState::Initialized | ScreenState::Destroyed) {
            debug!(screen = self.inner.name, state = ?self.state, online, "network report ignored");
            return;
        }
        match self.network.observe(online) {
            NetworkTransition::CameOnline => {
                self.inner.ui.go_online();
                self.inner.deps.sync.enqueue();
            }
            NetworkTransition::StillOnline => self.inner.deps.sync.enqueue(),
            NetworkTransition::Offline => self.inner.ui.go_offline(),
        }
    }

    /// Records that storage permission was asked for and prompts the user.
    pub fn request_storage_permission(&self) {
        let asked = self
            .inner
            .deps
            .prefs
            .insert_into_set(PrefKey::PermissionsAskedOnce, Permission::WriteStorage.as_str())
            .map(|_| ());
        self.inner.log_pref_failure(asked);
        self.inner
            .deps
            .permissions
            .request(Permission::WriteStorage, STORAGE_PERMISSION_REQUEST);
    }

    /// Handles the result of a permission prompt.
    pub fn on_permission_result(&self, request_code: u32, granted: &[bool]) -> PermissionOutcome {
        let outcome =
            permission::classify(request_code, granted, self.inner.deps.permissions.as_ref());
        match outcome {
            PermissionOutcome::ShowRationale => {
                info!(screen = self.inner.name, "write permission was denied by user");
                self.inner.ui.show_notice(Notice::StoragePermissionRationale);
            }
            PermissionOutcome::RedirectToSettings => {
                info!(screen = self.inner.name, "write permission was denied by user");
                self.inner.ui.show_notice(Notice::StoragePermissionSettings);
            }
            PermissionOutcome::Granted | PermissionOutcome::Unhandled => {}
        }
        outcome
    }

    /// Runs the action behind a notice button.
    pub fn on_notice_action(&self, action: NoticeAction) {
        match action {
            NoticeAction::LogIn => self.inner.ui.open_login(),
            NoticeAction::RetryStoragePermission => self.request_storage_permission(),
            NoticeAction::OpenAppSettings => self.inner.ui.open_app_settings(),
        }
    }

    /// Returns `true` if this screen currently owns the exclusive slot.
    pub fn owns_exclusive_slot(&self) -> bool {
        self.router.slot().is_owned_by(&self.exclusive)
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.inner.name
    }

    #[inline]
    pub fn state(&self) -> ScreenState {
        self.state
    }

    #[inline]
    pub fn ui(&self) -> &U {
        &self.inner.ui
    }
}

impl<U: ScreenUi> Drop for Screen<U> {
    fn drop(&mut self) {
        self.on_destroy();
    }
}
