//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the attendance
//! policy from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{AttendancePolicy, PolicyFile};

/// Loads and provides access to the attendance policy.
///
/// # Directory Structure
///
/// ```text
/// config/attendance/
/// └── policy.yaml   # Thresholds and payroll constants
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/attendance").unwrap();
/// println!("Full day at {} hours", loader.policy().full_day_hours);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    policy: AttendancePolicy,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - `policy.yaml` is missing
    /// - the file contains invalid YAML or misses a required field
    /// - the policy values are inconsistent (see [`AttendancePolicy::validate`])
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let policy_path = path.as_ref().join("policy.yaml");
        let file = Self::load_yaml::<PolicyFile>(&policy_path)?;
        Self::from_policy(file.policy)
    }

    /// Wraps an already-built policy after validating it.
    pub fn from_policy(policy: AttendancePolicy) -> EngineResult<Self> {
        policy.validate()?;
        Ok(Self { policy })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded attendance policy.
    pub fn policy(&self) -> &AttendancePolicy {
        &self.policy
    }
}
