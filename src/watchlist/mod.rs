//! Watchlist presentation helpers: language filtering and entry badges.

mod item;
mod language;

pub use item::{BadgeIcon, DiffBadge, LogType, WatchlistItem};
pub use language::{LanguageFilter, LanguageToggle, show_language_badge};
