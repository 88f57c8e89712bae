use std::collections::BTreeMap;

use parking_lot::Mutex;

use super::store::{PrefKey, PrefValue, PreferenceStore};
use crate::error::PrefsError;

/// Non-durable preference store (tests, previews).
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: Mutex<BTreeMap<PrefKey, PrefValue>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: PrefKey) -> Option<PrefValue> {
        self.values.lock().get(&key).cloned()
    }

    fn set(&self, key: PrefKey, value: PrefValue) -> Result<(), PrefsError> {
        self.values.lock().insert(key, value);
        Ok(())
    }
}
