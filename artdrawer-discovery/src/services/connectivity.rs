//! Online/offline flag
//!
//! Network-dependent operations (search, chat, daily recommendation, image capture)
//! check this flag first and are refused while offline. Collection browsing keeps
//! working from local state.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::DiscoveryError;

#[derive(Debug)]
pub struct Connectivity {
    online: AtomicBool,
}

impl Connectivity {
    pub fn new(online: bool) -> Self {
        Self {
            online: AtomicBool::new(online),
        }
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    pub fn set_online(&self, online: bool) {
        let previous = self.online.swap(online, Ordering::SeqCst);
        if previous != online {
            tracing::info!(online, "Connectivity changed");
        }
    }

    /// `Err(OfflineUnavailable)` while offline
    pub fn ensure_online(&self, operation: &str) -> Result<(), DiscoveryError> {
        if self.is_online() {
            Ok(())
        } else {
            Err(DiscoveryError::OfflineUnavailable(operation.to_string()))
        }
    }
}

impl Default for Connectivity {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offline_refuses() {
        let connectivity = Connectivity::default();
        assert!(connectivity.ensure_online("search").is_ok());

        connectivity.set_online(false);
        let err = connectivity.ensure_online("search").unwrap_err();
        assert!(matches!(err, DiscoveryError::OfflineUnavailable(op) if op == "search"));
    }
}
