//! Seam between the window registry and the GUI toolkit
//!
//! The toolkit owns window creation, rendering and event delivery. The
//! registry only talks to it through `WindowToolkit` and learns about user
//! actions through `ToolkitEvent`s, delivered one at a time on the control
//! thread.

mod headless;

pub use headless::{HeadlessToolkit, HeadlessWindow};

use serde_json::Value;

use crate::geometry::{DisplayBounds, Geometry, Position, Size};

/// Opaque identity of a toolkit window.
///
/// Only the toolkit creates these; the registry uses them as side-table keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u64);

impl std::fmt::Display for WindowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

/// Parameters for a new window
#[derive(Debug, Clone, PartialEq)]
pub struct WindowOptions {
    pub geometry: Geometry,
    pub background_color: String,
    /// Windows start hidden and are shown on ready-to-show
    pub show: bool,
    /// Storage partition for the window's web contents
    pub partition: String,
}

/// Lifecycle events the registry reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    Closed,
    Moved,
    Resized,
    ReadyToShow,
}

impl WindowEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            WindowEvent::Closed => "closed",
            WindowEvent::Moved => "move",
            WindowEvent::Resized => "resize",
            WindowEvent::ReadyToShow => "ready-to-show",
        }
    }
}

/// An event together with the window it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolkitEvent {
    pub window: WindowId,
    pub event: WindowEvent,
}

/// Operations the registry needs from a windowing toolkit.
///
/// Failures are opaque to the registry; it only decides whether they abort
/// the current operation.
pub trait WindowToolkit {
    fn create_window(&mut self, options: &WindowOptions) -> anyhow::Result<WindowId>;

    fn load_url(&mut self, window: WindowId, url: &str) -> anyhow::Result<()>;

    fn position(&self, window: WindowId) -> anyhow::Result<Position>;

    fn size(&self, window: WindowId) -> anyhow::Result<Size>;

    fn show(&mut self, window: WindowId) -> anyhow::Result<()>;

    /// Deliver a named message to the page in `window`
    fn send(&mut self, window: WindowId, channel: &str, args: &Value) -> anyhow::Result<()>;

    fn close(&mut self, window: WindowId) -> anyhow::Result<()>;

    /// True once `window` has been closed, or if the toolkit never made it.
    /// Events already queued for such a window are stale.
    fn is_destroyed(&self, window: WindowId) -> bool;

    /// Connected displays. Empty when the toolkit can't tell.
    fn displays(&self) -> Vec<DisplayBounds> {
        Vec::new()
    }
}
