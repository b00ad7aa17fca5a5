//! Per-run name stamping
//!
//! The harness never cleans up after itself, so every entity created in
//! a run carries the same millisecond stamp in its name. Repeated runs
//! then coexist with whatever earlier runs left behind.

use serde::{Deserialize, Serialize};

/// Millisecond timestamp shared by all entity names of one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStamp(i64);

impl RunStamp {
    /// Capture the current time as the run's stamp
    pub fn now() -> Self {
        Self(chrono::Utc::now().timestamp_millis())
    }

    /// Build a stamp from a known millisecond value
    pub fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub fn millis(&self) -> i64 {
        self.0
    }

    /// Qualify a base name with this run's stamp
    pub fn qualify(&self, base: &str) -> String {
        format!("{} {}", base, self.0)
    }
}

impl std::fmt::Display for RunStamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
