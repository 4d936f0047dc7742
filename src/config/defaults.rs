//! Default configuration values
//!
//! All constants used throughout the config module are defined here.

/// Default window size when no session record exists
pub const DEFAULT_WINDOW_WIDTH: u32 = 1200;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 800;

/// Background painted before the page renders
pub const DEFAULT_BACKGROUND_COLOR: &str = "#00A2DF";

/// Storage partition shared by all app windows
pub const DEFAULT_PARTITION: &str = "persist:arc-window";

/// Route opened when the host doesn't ask for one
pub const DEFAULT_ROUTE: &str = "/request/latest/0";

/// Page loaded into every window, relative to the executable's directory
pub const DEFAULT_PAGE_FILE: &str = "app.html";

pub const DEFAULT_CLAMP_TO_DISPLAYS: bool = true;

/// Channel sent to a window once it has been shown for the first time
pub const WINDOW_RENDERED_CHANNEL: &str = "window-rendered";
