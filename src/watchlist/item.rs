//! # Watchlist entry badge.
//!
//! Log entries (moves, protections, deletions) get a labelled badge; edits
//! get a signed byte-count badge colored by direction.

use crate::screen::{Color, ThemeAttr, ThemeResolver};

/// Kind of log action recorded on a watched page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogType {
    Moved,
    Protected,
    Deleted,
}

impl LogType {
    /// Parses the API's log type name.
    pub fn from_api(name: &str) -> Option<Self> {
        match name {
            "move" => Some(LogType::Moved),
            "protect" => Some(LogType::Protected),
            "delete" => Some(LogType::Deleted),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LogType::Moved => "Page moved",
            LogType::Protected => "Page protected",
            LogType::Deleted => "Page deleted",
        }
    }

    fn icon(&self) -> BadgeIcon {
        match self {
            LogType::Moved => BadgeIcon::Info,
            LogType::Protected => BadgeIcon::Lock,
            LogType::Deleted => BadgeIcon::Delete,
        }
    }
}

/// A single watchlist entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchlistItem {
    pub title: String,
    pub lang_code: String,
    pub user: String,
    pub is_anon: bool,
    pub old_len: i64,
    pub new_len: i64,
    pub log_type: Option<LogType>,
}

impl WatchlistItem {
    /// Size change of the revision in bytes.
    #[inline]
    pub fn diff_bytes(&self) -> i64 {
        self.new_len - self.old_len
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeIcon {
    Info,
    Lock,
    Delete,
}

/// Presentation of the badge next to a watchlist entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffBadge {
    pub text: String,
    pub text_color: Color,
    pub background: Color,
    pub icon: Option<BadgeIcon>,
}

impl DiffBadge {
    pub fn for_item(item: &WatchlistItem, theme: &dyn ThemeResolver) -> Self {
        let tint = theme.resolve(ThemeAttr::BadgeTint);
        match item.log_type {
            Some(log) => Self {
                text: log.label().to_string(),
                text_color: tint,
                background: theme.resolve(ThemeAttr::SuggestionsBackground),
                icon: Some(log.icon()),
            },
            None => {
                let diff = item.diff_bytes();
                let text_color = match diff {
                    d if d > 0 => Color::GREEN_50,
                    0 => theme.resolve(ThemeAttr::SecondaryText),
                    _ => Color::RED_50,
                };
                Self {
                    text: format!("{diff:+}"),
                    text_color,
                    background: theme.resolve(ThemeAttr::DiffBackground),
                    icon: None,
                }
            }
        }
    }
}
