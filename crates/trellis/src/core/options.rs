use serde::{Deserialize, Serialize};

use crate::{error::Result, layout::DockOrder};

/// Tree-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Offer every event whose path reaches the root to the root before
    /// bubbling. Events in detached subtrees still honour per-node preview flags.
    pub root_preview: bool,
    /// Order in which docked children consume edges.
    pub dock_order: DockOrder,
    /// Scale factor used when neither the node nor the native handler has one.
    pub default_scale_factor: f64,
    /// Level for [`crate::logging::init`].
    pub log_level: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            root_preview: false,
            dock_order: DockOrder::Declaration,
            default_scale_factor: 1.0,
            log_level: "warn".into(),
        }
    }
}

impl Options {
    /// Parse options from JSON. Missing keys take their defaults.
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Render options as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
