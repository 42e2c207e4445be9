// Application state module
// Shared, read-only state handed to every connection

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::types::Config;
use crate::routing::{RouteError, RouteTable};

/// Application state
pub struct AppState {
    pub config: Config,
    /// Route table consulted by the frontend host
    pub routes: RouteTable,

    // Cached config values for fast access without locks
    pub cached_access_log: Arc<AtomicBool>,
}

impl AppState {
    pub fn new(config: &Config, routes: RouteTable) -> Self {
        Self {
            config: config.clone(),
            routes,
            cached_access_log: Arc::new(AtomicBool::new(config.logging.access_log)),
        }
    }

    /// State serving the books route table
    pub fn books(config: &Config) -> Result<Self, RouteError> {
        Ok(Self::new(config, RouteTable::books()?))
    }

    pub fn access_log(&self) -> bool {
        self.cached_access_log.load(Ordering::Relaxed)
    }

    /// Toggle access logging without locking
    pub fn set_access_log(&self, enabled: bool) {
        self.cached_access_log.store(enabled, Ordering::Relaxed);
    }
}
