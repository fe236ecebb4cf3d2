use crate::consts::{DEFAULT_CAPACITY, DEFAULT_ERROR_RATE};
use crate::errors::{CcbfError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Sizing inputs for a new filter. Missing fields in a JSON file fall back to defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub capacity: f64,
    pub error_rate: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self { capacity: DEFAULT_CAPACITY, error_rate: DEFAULT_ERROR_RATE }
    }
}

impl FilterConfig {
    /// Parse only; call `validate` once flag overrides are applied.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|source| CcbfError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_reader(BufReader::new(f))?)
    }

    /// Flags win over whatever was loaded.
    pub fn with_overrides(mut self, capacity: Option<f64>, error_rate: Option<f64>) -> Self {
        if let Some(c) = capacity { self.capacity = c; }
        if let Some(e) = error_rate { self.error_rate = e; }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.capacity.is_finite() || self.capacity <= 0.0 {
            return Err(CcbfError::InvalidConfig(format!("capacity must be > 0, got {}", self.capacity)));
        }
        if !(self.error_rate > 0.0 && self.error_rate < 1.0) {
            return Err(CcbfError::InvalidConfig(format!(
                "error rate must be in (0, 1), got {}",
                self.error_rate
            )));
        }
        Ok(())
    }
}
