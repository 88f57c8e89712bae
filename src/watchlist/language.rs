//! # Watchlist language filter.
//!
//! Keeps the set of language codes hidden from the watchlist, persisted under
//! [`PrefKey::WatchlistDisabledLanguages`]. Toggling a language writes the
//! whole set back and notifies the owner so it can reload the list.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::error::PrefsError;
use crate::prefs::{PrefKey, PreferenceStore, PrefsExt};

/// One row of the language picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageToggle<'a> {
    pub code: &'a str,
    pub enabled: bool,
}

/// Persisted set of watchlist languages the user switched off.
pub struct LanguageFilter {
    prefs: Arc<dyn PreferenceStore>,
    disabled: BTreeSet<String>,
    on_change: Option<Box<dyn Fn() + Send + Sync>>,
}

impl LanguageFilter {
    /// Loads the disabled set from `prefs`.
    pub fn load(prefs: Arc<dyn PreferenceStore>) -> Self {
        let disabled = prefs.string_set(PrefKey::WatchlistDisabledLanguages);
        Self {
            prefs,
            disabled,
            on_change: None,
        }
    }

    /// Sets the callback fired after every successful toggle.
    pub fn on_change(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    pub fn is_enabled(&self, code: &str) -> bool {
        !self.disabled.contains(code)
    }

    /// Enables or disables `code`, persists the set, and notifies the callback.
    ///
    /// On a storage error nothing changes and the callback is not fired.
    pub fn set_enabled(&mut self, code: &str, enabled: bool) -> Result<(), PrefsError> {
        let mut disabled = self.disabled.clone();
        if enabled {
            disabled.remove(code);
        } else {
            disabled.insert(code.to_string());
        }
        self.prefs
            .set_string_set(PrefKey::WatchlistDisabledLanguages, disabled.clone())?;
        self.disabled = disabled;
        if let Some(f) = &self.on_change {
            f();
        }
        Ok(())
    }

    /// Picker rows for the app's languages, in the app's order.
    pub fn toggles<'a>(&self, app_languages: &'a [String]) -> Vec<LanguageToggle<'a>> {
        app_languages
            .iter()
            .map(|code| LanguageToggle {
                code: code.as_str(),
                enabled: self.is_enabled(code),
            })
            .collect()
    }

    pub fn disabled(&self) -> &BTreeSet<String> {
        &self.disabled
    }
}

/// Language badges are only worth showing when the app has more than one language.
#[inline]
pub fn show_language_badge(app_languages: &[String]) -> bool {
    app_languages.len() > 1
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::prefs::{MemoryPreferences, PrefValue};

    struct ReadOnlyStore;

    impl PreferenceStore for ReadOnlyStore {
        fn get(&self, _key: PrefKey) -> Option<PrefValue> {
            None
        }

        fn set(&self, _key: PrefKey, _value: PrefValue) -> Result<(), PrefsError> {
            Err(PrefsError::Io {
                path: "prefs.toml".into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            })
        }
    }

    fn langs(codes: &[&str]) -> Vec<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn toggling_persists_and_notifies() {
        let prefs: Arc<dyn PreferenceStore> = Arc::new(MemoryPreferences::new());
        let changes = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&changes);

        let mut filter = LanguageFilter::load(Arc::clone(&prefs)).on_change(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        filter.set_enabled("de", false).unwrap();
        filter.set_enabled("fr", false).unwrap();
        filter.set_enabled("de", true).unwrap();

        assert_eq!(changes.load(Ordering::SeqCst), 3);
        assert!(filter.is_enabled("de"));
        assert!(!filter.is_enabled("fr"));

        let reloaded = LanguageFilter::load(prefs);
        assert_eq!(reloaded.disabled().len(), 1);
        assert!(!reloaded.is_enabled("fr"));
    }

    #[test]
    fn toggles_follow_app_order() {
        let prefs: Arc<dyn PreferenceStore> = Arc::new(MemoryPreferences::new());
        let mut filter = LanguageFilter::load(prefs);
        filter.set_enabled("es", false).unwrap();

        let app = langs(&["en", "es", "ja"]);
        let rows = filter.toggles(&app);
        assert_eq!(
            rows,
            vec![
                LanguageToggle { code: "en", enabled: true },
                LanguageToggle { code: "es", enabled: false },
                LanguageToggle { code: "ja", enabled: true },
            ]
        );
    }

    #[test]
    fn badge_hidden_for_single_language() {
        assert!(!show_language_badge(&langs(&["en"])));
        assert!(show_language_badge(&langs(&["en", "de"])));
    }

    #[test]
    fn failed_write_leaves_filter_unchanged() {
        let changes = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&changes);
        let mut filter = LanguageFilter::load(Arc::new(ReadOnlyStore)).on_change(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let err = filter.set_enabled("de", false).unwrap_err();
        assert_eq!(err.as_label(), "prefs_io");
        assert!(filter.is_enabled("de"));
        assert!(filter.disabled().is_empty());
        assert_eq!(changes.load(Ordering::SeqCst), 0);
    }
}
