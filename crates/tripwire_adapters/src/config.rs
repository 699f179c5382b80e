//! Adapter configuration

use serde::{Deserialize, Serialize};

/// GLFW reports at most eight mouse buttons.
const MAX_TRACKED_BUTTONS: u8 = 8;

fn default_track_mouse_drag() -> bool {
    true
}

fn default_drag_buttons() -> u8 {
    5
}

/// Tunables for the stateful adapters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterConfig {
    /// Derive `mouse_dragged` events from held buttons on each render tick
    #[serde(default = "default_track_mouse_drag")]
    pub track_mouse_drag: bool,
    /// Buttons `0..drag_buttons` are checked for drags
    #[serde(default = "default_drag_buttons")]
    pub drag_buttons: u8,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            track_mouse_drag: default_track_mouse_drag(),
            drag_buttons: default_drag_buttons(),
        }
    }
}

impl AdapterConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.drag_buttons > MAX_TRACKED_BUTTONS {
            return Err(format!(
                "drag_buttons must be at most {MAX_TRACKED_BUTTONS}, got {}",
                self.drag_buttons
            ));
        }
        Ok(())
    }
}
