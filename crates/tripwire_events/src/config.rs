//! Event bus configuration

use serde::{Deserialize, Serialize};

fn default_max_fault_reports() -> Option<u32> {
    Some(20)
}

/// Tunables for [`crate::EventBus`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusConfig {
    /// Debug-log fires of events that have no listeners. Render events fire
    /// every frame, so this is off by default.
    #[serde(default)]
    pub log_unlistened_events: bool,
    /// Faults forwarded to the reporter per listener before further faults
    /// from it are only counted. `None` reports every fault.
    #[serde(default = "default_max_fault_reports")]
    pub max_fault_reports_per_listener: Option<u32>,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            log_unlistened_events: false,
            max_fault_reports_per_listener: default_max_fault_reports(),
        }
    }
}

impl BusConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.max_fault_reports_per_listener == Some(0) {
            return Err(
                "max_fault_reports_per_listener must be at least 1 (omit it to report every fault)"
                    .to_string(),
            );
        }
        Ok(())
    }
}
