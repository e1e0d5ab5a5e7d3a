//! Application state for the attendance reconciliation API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{AttendancePolicy, ConfigLoader};

/// Shared application state.
///
/// Holds the loaded attendance policy, shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the attendance policy every request is reconciled under.
    pub fn policy(&self) -> &AttendancePolicy {
        self.config.policy()
    }
}
