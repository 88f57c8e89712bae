//! Screen-side wiring: collaborator traits and the [`Screen`] lifecycle.
//!
//! A host implements [`ScreenUi`] per screen and shares one
//! [`Collaborators`] bundle plus one [`Router`](crate::Router) across all of them.

mod host;
mod lifecycle;
mod network;
mod permission;

pub use host::{
    Account, BackgroundSync, Collaborators, Color, Notice, NoticeAction, Permission,
    PermissionRequester, ScreenUi, ThemeAttr, ThemeResolver,
};
pub use lifecycle::{Screen, ScreenState};
pub use network::{NetworkMonitor, NetworkTransition};
pub use permission::{PermissionOutcome, STORAGE_PERMISSION_REQUEST, is_permitted};
