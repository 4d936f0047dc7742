//! Configuration type definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::defaults::*;
use crate::geometry::{Geometry, Size};

/// How the registry picks the session slot for a new window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IndexPolicy {
    /// Next index is the number of open windows. A window opened after a
    /// close reuses that slot's saved geometry.
    ActiveCount,
    /// Next index comes from a counter that never goes back during the
    /// process lifetime.
    #[default]
    Monotonic,
}

/// Window manager settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowsConfig {
    /// Width of a window with no saved session (default: 1200)
    #[serde(default = "default_width")]
    pub default_width: u32,
    /// Height of a window with no saved session (default: 800)
    #[serde(default = "default_height")]
    pub default_height: u32,
    /// Background color shown before the page paints (default: "#00A2DF")
    #[serde(default = "default_background_color")]
    pub background_color: String,
    /// Storage partition for window web contents
    #[serde(default = "default_partition")]
    pub partition: String,
    /// Page loaded into every window (default: app.html next to the executable)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_path: Option<PathBuf>,
    /// Route used when open() is called without one
    #[serde(default = "default_route")]
    pub default_route: String,
    #[serde(default)]
    pub index_policy: IndexPolicy,
    /// Pull restored windows back onto a connected display (default: true)
    #[serde(default = "default_clamp_to_displays")]
    pub clamp_to_displays: bool,
    /// Override for the session file location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_file: Option<PathBuf>,
}

fn default_width() -> u32 {
    DEFAULT_WINDOW_WIDTH
}
fn default_height() -> u32 {
    DEFAULT_WINDOW_HEIGHT
}
fn default_background_color() -> String {
    DEFAULT_BACKGROUND_COLOR.to_string()
}
fn default_partition() -> String {
    DEFAULT_PARTITION.to_string()
}
fn default_route() -> String {
    DEFAULT_ROUTE.to_string()
}
fn default_clamp_to_displays() -> bool {
    DEFAULT_CLAMP_TO_DISPLAYS
}

impl Default for WindowsConfig {
    fn default() -> Self {
        WindowsConfig {
            default_width: DEFAULT_WINDOW_WIDTH,
            default_height: DEFAULT_WINDOW_HEIGHT,
            background_color: default_background_color(),
            partition: default_partition(),
            page_path: None,
            default_route: default_route(),
            index_policy: IndexPolicy::default(),
            clamp_to_displays: DEFAULT_CLAMP_TO_DISPLAYS,
            session_file: None,
        }
    }
}

impl WindowsConfig {
    /// Geometry for a window with no usable session record
    pub fn default_geometry(&self) -> Geometry {
        Geometry {
            position: None,
            size: Size::new(self.default_width, self.default_height),
        }
    }

    /// Resolve the page loaded into windows
    pub fn page_path(&self) -> PathBuf {
        if let Some(path) = &self.page_path {
            return path.clone();
        }
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_PAGE_FILE)))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PAGE_FILE))
    }

    /// Resolve the session file: ~/.arc/window-state.json unless overridden
    pub fn session_file(&self) -> PathBuf {
        if let Some(path) = &self.session_file {
            return path.clone();
        }
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".arc").join("window-state.json")
    }
}
