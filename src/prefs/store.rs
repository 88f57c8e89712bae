//! # Preference store contract.
//!
//! A [`PreferenceStore`] is a durable key/value map. Keys are a closed enum
//! ([`PrefKey`]); values are one of three shapes ([`PrefValue`]). The
//! [`PrefsExt`] extension trait adds typed accessors with per-key defaults.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::PrefsError;

/// Persisted preference keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrefKey {
    /// Reading lists have never been synced on this install.
    ReadingListsFirstTimeSync,
    /// Reading-list sync is enabled.
    ReadingListSyncEnabled,
    /// The session was invalidated while backgrounded and the user was not told yet.
    LoggedOutInBackground,
    /// Suggested-edits notices take priority over sync confirmations.
    SuggestedEditsHighestPriority,
    /// The process crashed before any screen finished creating.
    CrashedBeforeScreenCreated,
    /// Name of the most recently created screen.
    LastCreatedScreen,
    /// Permissions the user has been asked for at least once.
    PermissionsAskedOnce,
    /// Language codes hidden from the watchlist.
    WatchlistDisabledLanguages,
}

impl PrefKey {
    /// Stable on-disk name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PrefKey::ReadingListsFirstTimeSync => "reading_lists_first_time_sync",
            PrefKey::ReadingListSyncEnabled => "reading_list_sync_enabled",
            PrefKey::LoggedOutInBackground => "logged_out_in_background",
            PrefKey::SuggestedEditsHighestPriority => "suggested_edits_highest_priority",
            PrefKey::CrashedBeforeScreenCreated => "crashed_before_screen_created",
            PrefKey::LastCreatedScreen => "last_created_screen",
            PrefKey::PermissionsAskedOnce => "permissions_asked_once",
            PrefKey::WatchlistDisabledLanguages => "watchlist_disabled_languages",
        }
    }

    /// Value reported when the key was never written.
    ///
    /// `None` for keys with no meaningful default (the last created screen).
    pub fn default_value(&self) -> Option<PrefValue> {
        match self {
            PrefKey::ReadingListsFirstTimeSync => Some(PrefValue::Bool(true)),
            PrefKey::ReadingListSyncEnabled
            | PrefKey::LoggedOutInBackground
            | PrefKey::SuggestedEditsHighestPriority
            | PrefKey::CrashedBeforeScreenCreated => Some(PrefValue::Bool(false)),
            PrefKey::LastCreatedScreen => None,
            PrefKey::PermissionsAskedOnce | PrefKey::WatchlistDisabledLanguages => {
                Some(PrefValue::Set(BTreeSet::new()))
            }
        }
    }
}

/// A stored preference value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrefValue {
    Bool(bool),
    Text(String),
    Set(BTreeSet<String>),
}

/// Durable key/value preference storage.
///
/// Implementations must survive process restarts (see
/// [`FilePreferences`](crate::FilePreferences)); [`MemoryPreferences`](crate::MemoryPreferences)
/// exists for tests.
pub trait PreferenceStore: Send + Sync {
    /// Returns the stored value, or `None` if the key was never written.
    fn get(&self, key: PrefKey) -> Option<PrefValue>;

    /// Stores `value` under `key` and persists it.
    fn set(&self, key: PrefKey, value: PrefValue) -> Result<(), PrefsError>;
}

/// Typed accessors over [`PreferenceStore`].
///
/// Reads fall back to [`PrefKey::default_value`] when the key is absent or
/// holds a value of the wrong shape.
pub trait PrefsExt: PreferenceStore {
    fn flag(&self, key: PrefKey) -> bool {
        match self.get(key) {
            Some(PrefValue::Bool(b)) => b,
            _ => matches!(key.default_value(), Some(PrefValue::Bool(true))),
        }
    }

    fn set_flag(&self, key: PrefKey, value: bool) -> Result<(), PrefsError> {
        self.set(key, PrefValue::Bool(value))
    }

    fn text(&self, key: PrefKey) -> Option<String> {
        match self.get(key).or_else(|| key.default_value()) {
            Some(PrefValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    fn set_text(&self, key: PrefKey, value: impl Into<String>) -> Result<(), PrefsError> {
        self.set(key, PrefValue::Text(value.into()))
    }

    fn string_set(&self, key: PrefKey) -> BTreeSet<String> {
        match self.get(key).or_else(|| key.default_value()) {
            Some(PrefValue::Set(set)) => set,
            _ => BTreeSet::new(),
        }
    }

    fn set_string_set(&self, key: PrefKey, values: BTreeSet<String>) -> Result<(), PrefsError> {
        self.set(key, PrefValue::Set(values))
    }

    /// Adds `value` to the set under `key`. Returns `true` if it was newly inserted.
    fn insert_into_set(&self, key: PrefKey, value: &str) -> Result<bool, PrefsError> {
        let mut set = self.string_set(key);
        let inserted = set.insert(value.to_string());
        if inserted {
            self.set_string_set(key, set)?;
        }
        Ok(inserted)
    }
}

impl<T: PreferenceStore + ?Sized> PrefsExt for T {}
