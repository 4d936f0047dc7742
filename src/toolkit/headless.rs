//! In-memory toolkit with no real windows
//!
//! Used by the demo host and by tests. It behaves like a well-mannered
//! toolkit: loading a page schedules `ready-to-show`, and the simulated
//! user actions (`user_move`, `user_resize`, `user_close`) update the
//! window and emit the matching event on the channel returned by `new`.

use anyhow::{anyhow, bail};
use async_channel::{Receiver, Sender};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use super::{ToolkitEvent, WindowEvent, WindowId, WindowOptions, WindowToolkit};
use crate::geometry::{DisplayBounds, Position, Size};

/// Everything the headless toolkit knows about one window
#[derive(Debug, Clone)]
pub struct HeadlessWindow {
    pub options: WindowOptions,
    pub position: Position,
    pub size: Size,
    pub url: Option<String>,
    pub visible: bool,
    pub closed: bool,
    /// Messages delivered via `send`, in order
    pub messages: Vec<(String, Value)>,
}

#[derive(Debug, Default)]
struct HeadlessState {
    next_id: u64,
    windows: BTreeMap<WindowId, HeadlessWindow>,
    displays: Vec<DisplayBounds>,
    fail_create: bool,
    fail_load: bool,
    fail_show: bool,
    fail_queries: bool,
    unresponsive: HashSet<WindowId>,
}

/// Cloneable handle; every clone sees the same windows.
#[derive(Debug, Clone)]
pub struct HeadlessToolkit {
    state: Arc<Mutex<HeadlessState>>,
    events: Sender<ToolkitEvent>,
}

impl HeadlessToolkit {
    /// Create a toolkit and the receiving end of its event stream
    pub fn new() -> (Self, Receiver<ToolkitEvent>) {
        let (tx, rx) = async_channel::unbounded();
        let toolkit = Self {
            state: Arc::new(Mutex::new(HeadlessState::default())),
            events: tx,
        };
        (toolkit, rx)
    }

    pub fn with_displays(self, displays: Vec<DisplayBounds>) -> Self {
        self.state.lock().displays = displays;
        self
    }

    /// Make the next `create_window` calls fail
    pub fn fail_create(&self, fail: bool) {
        self.state.lock().fail_create = fail;
    }

    /// Make the next `load_url` calls fail
    pub fn fail_load(&self, fail: bool) {
        self.state.lock().fail_load = fail;
    }

    /// Make `show` fail
    pub fn fail_show(&self, fail: bool) {
        self.state.lock().fail_show = fail;
    }

    /// Make `position` and `size` fail, even for live windows
    pub fn fail_queries(&self, fail: bool) {
        self.state.lock().fail_queries = fail;
    }

    /// Make `send` to this window fail
    pub fn set_unresponsive(&self, window: WindowId) {
        self.state.lock().unresponsive.insert(window);
    }

    pub fn window(&self, window: WindowId) -> Option<HeadlessWindow> {
        self.state.lock().windows.get(&window).cloned()
    }

    /// Ids of windows that haven't been closed
    pub fn live_windows(&self) -> Vec<WindowId> {
        self.state
            .lock()
            .windows
            .iter()
            .filter(|(_, w)| !w.closed)
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn user_move(&self, window: WindowId, position: Position) -> anyhow::Result<()> {
        self.with_live(window, |w| w.position = position)?;
        self.emit(window, WindowEvent::Moved);
        Ok(())
    }

    pub fn user_resize(&self, window: WindowId, size: Size) -> anyhow::Result<()> {
        self.with_live(window, |w| w.size = size)?;
        self.emit(window, WindowEvent::Resized);
        Ok(())
    }

    pub fn user_close(&self, window: WindowId) -> anyhow::Result<()> {
        self.with_live(window, |w| {
            w.closed = true;
            w.visible = false;
        })?;
        self.emit(window, WindowEvent::Closed);
        Ok(())
    }

    /// Close the event stream so a pump loop can finish
    pub fn shutdown(&self) {
        self.events.close();
    }

    fn emit(&self, window: WindowId, event: WindowEvent) {
        // Unbounded: only fails once the stream is closed
        let _ = self.events.try_send(ToolkitEvent { window, event });
    }

    fn with_live<T>(
        &self,
        window: WindowId,
        f: impl FnOnce(&mut HeadlessWindow) -> T,
    ) -> anyhow::Result<T> {
        let mut state = self.state.lock();
        match state.windows.get_mut(&window) {
            Some(w) if !w.closed => Ok(f(w)),
            Some(_) => bail!("{} has been destroyed", window),
            None => bail!("unknown {}", window),
        }
    }
}

impl WindowToolkit for HeadlessToolkit {
    fn create_window(&mut self, options: &WindowOptions) -> anyhow::Result<WindowId> {
        let mut state = self.state.lock();
        if state.fail_create {
            bail!("headless toolkit refused to create a window");
        }
        let size = options.geometry.size;
        let position = options.geometry.position.unwrap_or_else(|| {
            // Center on the primary display like a real toolkit would
            state
                .displays
                .first()
                .map(|d| {
                    Position::new(
                        (d.origin_x + (d.width - f64::from(size.width)) / 2.0) as i32,
                        (d.origin_y + (d.height - f64::from(size.height)) / 2.0) as i32,
                    )
                })
                .unwrap_or(Position::new(0, 0))
        });

        let id = WindowId(state.next_id);
        state.next_id += 1;
        state.windows.insert(
            id,
            HeadlessWindow {
                options: options.clone(),
                position,
                size,
                url: None,
                visible: options.show,
                closed: false,
                messages: Vec::new(),
            },
        );
        Ok(id)
    }

    fn load_url(&mut self, window: WindowId, url: &str) -> anyhow::Result<()> {
        if self.state.lock().fail_load {
            bail!("failed to load {}", url);
        }
        self.with_live(window, |w| w.url = Some(url.to_string()))?;
        self.emit(window, WindowEvent::ReadyToShow);
        Ok(())
    }

    fn position(&self, window: WindowId) -> anyhow::Result<Position> {
        if self.state.lock().fail_queries {
            bail!("position of {} is unavailable", window);
        }
        self.with_live(window, |w| w.position)
    }

    fn size(&self, window: WindowId) -> anyhow::Result<Size> {
        if self.state.lock().fail_queries {
            bail!("size of {} is unavailable", window);
        }
        self.with_live(window, |w| w.size)
    }

    fn show(&mut self, window: WindowId) -> anyhow::Result<()> {
        if self.state.lock().fail_show {
            bail!("{} refused to show", window);
        }
        self.with_live(window, |w| w.visible = true)
    }

    fn send(&mut self, window: WindowId, channel: &str, args: &Value) -> anyhow::Result<()> {
        if self.state.lock().unresponsive.contains(&window) {
            return Err(anyhow!("{} is not responding", window));
        }
        self.with_live(window, |w| w.messages.push((channel.to_string(), args.clone())))
    }

    fn close(&mut self, window: WindowId) -> anyhow::Result<()> {
        self.with_live(window, |w| {
            w.closed = true;
            w.visible = false;
        })?;
        self.emit(window, WindowEvent::Closed);
        Ok(())
    }

    fn is_destroyed(&self, window: WindowId) -> bool {
        self.state
            .lock()
            .windows
            .get(&window)
            .map_or(true, |w| w.closed)
    }

    fn displays(&self) -> Vec<DisplayBounds> {
        self.state.lock().displays.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Geometry;

    fn options(position: Option<Position>) -> WindowOptions {
        WindowOptions {
            geometry: Geometry {
                position,
                size: Size::new(800, 600),
            },
            background_color: "#000000".into(),
            show: false,
            partition: "persist:test".into(),
        }
    }

    #[test]
    fn test_create_centers_unplaced_window() {
        let (toolkit, _rx) = HeadlessToolkit::new();
        let mut toolkit = toolkit.with_displays(vec![DisplayBounds {
            origin_x: 0.0,
            origin_y: 0.0,
            width: 1600.0,
            height: 1000.0,
        }]);
        let id = toolkit.create_window(&options(None)).unwrap();
        assert_eq!(toolkit.position(id).unwrap(), Position::new(400, 200));
        assert!(!toolkit.window(id).unwrap().visible);
    }

    #[test]
    fn test_load_url_emits_ready_to_show() {
        let (mut toolkit, rx) = HeadlessToolkit::new();
        let id = toolkit.create_window(&options(Some(Position::new(1, 1)))).unwrap();
        toolkit.load_url(id, "file:///app.html#/").unwrap();
        let event = rx.try_recv().unwrap();
        assert_eq!(event.window, id);
        assert_eq!(event.event, WindowEvent::ReadyToShow);
    }

    #[test]
    fn test_user_actions_update_window_and_emit() {
        let (mut toolkit, rx) = HeadlessToolkit::new();
        let id = toolkit.create_window(&options(Some(Position::new(0, 0)))).unwrap();
        toolkit.user_move(id, Position::new(30, 40)).unwrap();
        toolkit.user_resize(id, Size::new(300, 200)).unwrap();
        toolkit.user_close(id).unwrap();

        let events: Vec<WindowEvent> = std::iter::from_fn(|| rx.try_recv().ok())
            .map(|e| e.event)
            .collect();
        assert_eq!(
            events,
            vec![WindowEvent::Moved, WindowEvent::Resized, WindowEvent::Closed]
        );
        assert!(toolkit.position(id).is_err());
        assert!(toolkit.is_destroyed(id));
        assert!(toolkit.live_windows().is_empty());
    }

    #[test]
    fn test_is_destroyed_for_unknown_and_live_windows() {
        let (mut toolkit, _rx) = HeadlessToolkit::new();
        let id = toolkit.create_window(&options(None)).unwrap();
        assert!(!toolkit.is_destroyed(id));
        assert!(toolkit.is_destroyed(WindowId(99)));
    }

    #[test]
    fn test_failed_queries_leave_window_live() {
        let (mut toolkit, _rx) = HeadlessToolkit::new();
        let id = toolkit.create_window(&options(None)).unwrap();
        toolkit.fail_queries(true);
        assert!(toolkit.position(id).is_err());
        assert!(toolkit.size(id).is_err());
        assert!(!toolkit.is_destroyed(id));
        toolkit.fail_queries(false);
        assert_eq!(toolkit.size(id).unwrap(), Size::new(800, 600));
    }

    #[test]
    fn test_unresponsive_window_rejects_send() {
        let (mut toolkit, _rx) = HeadlessToolkit::new();
        let id = toolkit.create_window(&options(None)).unwrap();
        toolkit.set_unresponsive(id);
        assert!(toolkit.send(id, "x", &Value::Null).is_err());
    }
}
