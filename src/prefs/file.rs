//! # TOML-file preference store.
//!
//! Every write rewrites the whole file through a temporary sibling and a
//! rename, so a crash mid-write leaves the previous contents intact.
//!
//! ## File format
//! ```toml
//! reading_lists_first_time_sync = false
//! last_created_screen = "article"
//! watchlist_disabled_languages = ["de", "fr"]
//! ```
//! Unknown keys are preserved across rewrites, whatever their value type. A
//! known key holding a value of the wrong shape reads as absent.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::debug;

use super::store::{PrefKey, PrefValue, PreferenceStore};
use crate::error::PrefsError;

/// Durable preference store backed by a TOML file.
#[derive(Debug)]
pub struct FilePreferences {
    path: PathBuf,
    values: Mutex<toml::Table>,
}

impl FilePreferences {
    /// Opens the store at `path`, starting empty if the file does not exist.
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PrefsError> {
        let path = path.into();
        let values = load_or_default(&path)?;
        debug!(path = %path.display(), keys = values.len(), "preferences loaded");
        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &toml::Table) -> Result<(), PrefsError> {
        let encoded = toml::to_string(values)?;
        let io_err = |source| PrefsError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_err)?;
            }
        }
        let tmp = self.path.with_extension("toml.tmp");
        std::fs::write(&tmp, encoded).map_err(io_err)?;
        std::fs::rename(&tmp, &self.path).map_err(io_err)
    }
}

fn load_or_default(path: &Path) -> Result<toml::Table, PrefsError> {
    if !path.exists() {
        return Ok(toml::Table::new());
    }
    let content = std::fs::read_to_string(path).map_err(|source| PrefsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| PrefsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: PrefKey) -> Option<PrefValue> {
        let raw = self.values.lock().get(key.as_str()).cloned()?;
        match raw.try_into::<PrefValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                debug!(key = key.as_str(), error = %e, "stored preference has unexpected shape");
                None
            }
        }
    }

    fn set(&self, key: PrefKey, value: PrefValue) -> Result<(), PrefsError> {
        let value = toml::Value::try_from(value)?;
        let mut values = self.values.lock();
        let previous = values.insert(key.as_str().to_string(), value);
        if let Err(e) = self.persist(&values) {
            // Keep memory consistent with disk.
            match previous {
                Some(v) => values.insert(key.as_str().to_string(), v),
                None => values.remove(key.as_str()),
            };
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::prefs::PrefsExt;

    #[test]
    fn missing_file_reads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = FilePreferences::open(dir.path().join("prefs.toml")).unwrap();

        assert!(prefs.flag(PrefKey::ReadingListsFirstTimeSync));
        assert!(!prefs.flag(PrefKey::LoggedOutInBackground));
        assert!(prefs.string_set(PrefKey::WatchlistDisabledLanguages).is_empty());
        assert_eq!(prefs.text(PrefKey::LastCreatedScreen), None);
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.toml");

        {
            let prefs = FilePreferences::open(&path).unwrap();
            prefs.set_flag(PrefKey::ReadingListsFirstTimeSync, false).unwrap();
            prefs.set_text(PrefKey::LastCreatedScreen, "article").unwrap();
            let langs: BTreeSet<String> = ["de", "fr"].iter().map(|s| s.to_string()).collect();
            prefs
                .set_string_set(PrefKey::WatchlistDisabledLanguages, langs)
                .unwrap();
        }

        let reopened = FilePreferences::open(&path).unwrap();
        assert!(!reopened.flag(PrefKey::ReadingListsFirstTimeSync));
        assert_eq!(
            reopened.text(PrefKey::LastCreatedScreen).as_deref(),
            Some("article")
        );
        let langs = reopened.string_set(PrefKey::WatchlistDisabledLanguages);
        assert!(langs.contains("de") && langs.contains("fr"));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        std::fs::write(&path, "this is = = not toml").unwrap();

        let err = FilePreferences::open(&path).unwrap_err();
        assert_eq!(err.as_label(), "prefs_parse");
    }

    #[test]
    fn unknown_keys_are_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        std::fs::write(&path, "future_key = true\n").unwrap();

        let prefs = FilePreferences::open(&path).unwrap();
        prefs.set_flag(PrefKey::ReadingListSyncEnabled, true).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("future_key = true"));
        assert!(raw.contains("reading_list_sync_enabled = true"));
    }

    #[test]
    fn unknown_value_types_survive_rewrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        std::fs::write(&path, "future_key = 3\n\n[future_table]\nlimit = 1.5\n").unwrap();

        let prefs = FilePreferences::open(&path).unwrap();
        prefs.set_flag(PrefKey::LoggedOutInBackground, true).unwrap();

        let raw: toml::Table = toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw.get("future_key"), Some(&toml::Value::Integer(3)));
        assert!(raw.get("future_table").is_some_and(|v| v.is_table()));
        assert_eq!(
            raw.get("logged_out_in_background"),
            Some(&toml::Value::Boolean(true))
        );

        let reopened = FilePreferences::open(&path).unwrap();
        assert!(reopened.flag(PrefKey::LoggedOutInBackground));
    }

    #[test]
    fn known_key_with_wrong_shape_reads_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        std::fs::write(&path, "reading_lists_first_time_sync = 7\n").unwrap();

        let prefs = FilePreferences::open(&path).unwrap();
        assert_eq!(prefs.get(PrefKey::ReadingListsFirstTimeSync), None);
        assert!(prefs.flag(PrefKey::ReadingListsFirstTimeSync));
    }
}
