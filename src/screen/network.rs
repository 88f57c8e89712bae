//! Connectivity edge detection for a screen.

/// What a connectivity report means relative to the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkTransition {
    /// Offline → online.
    CameOnline,
    /// Online report while already online.
    StillOnline,
    /// Offline report (whatever the previous state).
    Offline,
}

/// Remembers the last reported connectivity state.
#[derive(Debug, Clone)]
pub struct NetworkMonitor {
    online: bool,
}

impl NetworkMonitor {
    pub fn new(initially_online: bool) -> Self {
        Self {
            online: initially_online,
        }
    }

    /// Records a report and classifies it.
    pub fn observe(&mut self, online: bool) -> NetworkTransition {
        let transition = match (self.online, online) {
            (false, true) => NetworkTransition::CameOnline,
            (true, true) => NetworkTransition::StillOnline,
            (_, false) => NetworkTransition::Offline,
        };
        self.online = online;
        transition
    }

    #[inline]
    pub fn is_online(&self) -> bool {
        self.online
    }
}
