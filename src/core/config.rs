//! # Router configuration.
//!
//! Provides [`RouterConfig`], the settings a host passes to [`Router::new`](crate::Router::new).
//!
//! ## Sentinel values
//! - `slow_listener = 0s` → slow-listener warnings disabled

use std::time::Duration;

/// Configuration for a [`Router`](crate::Router).
///
/// ## Field semantics
/// - `name`: label attached to router log lines (useful with several routers per process)
/// - `slow_listener`: warn when a single listener invocation takes longer (`0s` = never warn)
///
/// ## Notes
/// All fields are public. Prefer the helper accessors to avoid sprinkling
/// sentinel checks across the codebase.
#[derive(Clone, Debug)]
pub struct RouterConfig {
    /// Label used in log lines.
    pub name: &'static str,

    /// Threshold above which a listener invocation is logged as slow.
    ///
    /// Listeners run one after another on the dispatcher, so a slow one
    /// delays everybody behind it.
    pub slow_listener: Duration,
}

impl RouterConfig {
    /// Returns the slow-listener threshold as an `Option`.
    ///
    /// - `None` → warnings disabled
    /// - `Some(d)` → warn above `d`
    #[inline]
    pub fn slow_listener_threshold(&self) -> Option<Duration> {
        if self.slow_listener == Duration::ZERO {
            None
        } else {
            Some(self.slow_listener)
        }
    }
}

impl Default for RouterConfig {
    /// Default configuration:
    ///
    /// - `name = "router"`
    /// - `slow_listener = 16ms` (one frame at 60 Hz)
    fn default() -> Self {
        Self {
            name: "router",
            slow_listener: Duration::from_millis(16),
        }
    }
}
