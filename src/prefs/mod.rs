//! Preference storage: the store contract plus file and in-memory backends.

mod file;
mod memory;
mod store;

pub use file::FilePreferences;
pub use memory::MemoryPreferences;
pub use store::{PrefKey, PrefValue, PreferenceStore, PrefsExt};
