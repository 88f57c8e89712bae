//! # Host collaborators.
//!
//! Everything a screen needs from the outside world, expressed as traits:
//! the host GUI ([`ScreenUi`]), permissions, background sync, account state
//! and theme colors. The router itself depends on none of these.

use std::sync::Arc;

use crate::prefs::PreferenceStore;

/// Packed `0xAARRGGBB` color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const GREEN_50: Color = Color(0xFF00_AF89);
    pub const RED_50: Color = Color(0xFFD7_3333);
    pub const BLACK: Color = Color(0xFF00_0000);
}

/// Theme attributes a screen resolves through [`ThemeResolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeAttr {
    /// Page background; also used for the system bars.
    Paper,
    /// Muted text.
    SecondaryText,
    /// Background of informational badges.
    SuggestionsBackground,
    /// Background of byte-diff badges.
    DiffBackground,
    /// Foreground tint of badges.
    BadgeTint,
}

/// Resolves theme attributes to concrete colors. Pure function of the current theme.
pub trait ThemeResolver: Send + Sync {
    fn resolve(&self, attr: ThemeAttr) -> Color;
}

/// Runtime permissions a screen may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    WriteStorage,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::WriteStorage => "write_external_storage",
        }
    }
}

/// Asynchronous permission prompt. Results come back through
/// [`Screen::on_permission_result`](crate::Screen::on_permission_result).
pub trait PermissionRequester: Send + Sync {
    fn request(&self, permission: Permission, request_code: u32);

    /// Whether the platform wants an explanation shown before asking again.
    fn should_show_rationale(&self, permission: Permission) -> bool;
}

/// Best-effort background synchronization trigger.
///
/// Both calls are idempotent requests; redundant calls are harmless.
pub trait BackgroundSync: Send + Sync {
    /// Schedules a saved-pages sync.
    fn enqueue(&self);

    /// Schedules a forced reading-list sync.
    fn force_sync(&self);
}

/// Login state of the current user.
pub trait Account: Send + Sync {
    fn is_logged_in(&self) -> bool;
}

/// User-visible notices a screen asks the host to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Local lists were split to fit the server limit.
    SplitLargeLists { max_pages: u32 },
    /// Remote lists were deleted from another device.
    RemoteListsTornDown,
    /// Ask whether to turn on reading-list sync.
    EnableSyncPrompt,
    /// The session ended while backgrounded.
    LoggedOutInBackground,
    /// Reading lists finished syncing.
    SyncCompleted,
    /// Storage permission denied; explain and offer a retry.
    StoragePermissionRationale,
    /// Storage permission permanently denied; offer system settings.
    StoragePermissionSettings,
}

impl Notice {
    /// Action button attached to the notice, if any.
    pub fn action(&self) -> Option<NoticeAction> {
        match self {
            Notice::LoggedOutInBackground => Some(NoticeAction::LogIn),
            Notice::StoragePermissionRationale => Some(NoticeAction::RetryStoragePermission),
            Notice::StoragePermissionSettings => Some(NoticeAction::OpenAppSettings),
            Notice::SplitLargeLists { .. }
            | Notice::RemoteListsTornDown
            | Notice::EnableSyncPrompt
            | Notice::SyncCompleted => None,
        }
    }
}

/// Actions the user can take from a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeAction {
    LogIn,
    RetryStoragePermission,
    OpenAppSettings,
}

/// The host GUI surface of one screen.
///
/// Calls arrive on the dispatcher task (for event-driven effects) or on
/// whichever task drives the screen's lifecycle.
pub trait ScreenUi: Send + Sync + 'static {
    /// Rebuild the screen (theme or font changed).
    fn recreate(&self);

    fn show_notice(&self, notice: Notice);

    fn apply_system_bar_color(&self, _color: Color) {}

    fn go_online(&self) {}

    fn go_offline(&self) {}

    fn open_login(&self) {}

    fn open_app_settings(&self) {}
}

/// Shared collaborators injected into every screen.
#[derive(Clone)]
pub struct Collaborators {
    pub prefs: Arc<dyn PreferenceStore>,
    pub permissions: Arc<dyn PermissionRequester>,
    pub sync: Arc<dyn BackgroundSync>,
    pub account: Arc<dyn Account>,
    pub theme: Arc<dyn ThemeResolver>,
}
