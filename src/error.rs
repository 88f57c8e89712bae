//! Error types used by the router and the preference store.
//!
//! - [`BusError`]: errors raised by the event bus (dispatcher gone).
//! - [`PrefsError`]: errors raised while loading or persisting preferences.
//!
//! Arbitration (`activate` / `deactivate`) and `publish` never return errors;
//! only operations that wait on the dispatcher or touch the disk do.
//! Both types provide `as_label` for logs.

use std::path::PathBuf;

use thiserror::Error;

/// # Errors produced by the event bus.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusError {
    /// The dispatch loop has stopped (shut down or its runtime was dropped).
    #[error("event bus is closed")]
    Closed,

    /// The dispatcher was already taken and started elsewhere.
    #[error("dispatcher already running")]
    AlreadyRunning,
}

impl BusError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use screenbus::BusError;
    ///
    /// assert_eq!(BusError::Closed.as_label(), "bus_closed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            BusError::Closed => "bus_closed",
            BusError::AlreadyRunning => "bus_dispatcher_running",
        }
    }
}

/// # Errors produced by the durable preference store.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum PrefsError {
    /// Reading or writing the backing file failed.
    #[error("preferences i/o failed for {path}: {source}")]
    Io {
        /// File being read or written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but is not valid TOML.
    #[error("preferences file {path} is malformed: {source}")]
    Parse {
        /// File being parsed.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// The in-memory preferences could not be encoded.
    #[error("failed to encode preferences: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl PrefsError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            PrefsError::Io { .. } => "prefs_io",
            PrefsError::Parse { .. } => "prefs_parse",
            PrefsError::Serialize(_) => "prefs_serialize",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_stable() {
        assert_eq!(BusError::Closed.as_label(), "bus_closed");
        assert_eq!(BusError::AlreadyRunning.as_label(), "bus_dispatcher_running");

        let io = PrefsError::Io {
            path: PathBuf::from("/nope/prefs.toml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(io.as_label(), "prefs_io");
        assert!(io.to_string().contains("/nope/prefs.toml"));
    }
}
