//! Window Registry
//!
//! Tracks every open app window in one place and ties it to its session
//! slot.
//!
//! # Usage
//!
//! ```rust,ignore
//! use arc_windows::windows::WindowsManager;
//!
//! let mut manager = WindowsManager::new(toolkit, store, config);
//! futures::executor::block_on(manager.open(Some("/request/latest/0")))?;
//!
//! // On the control thread, feed toolkit events back in
//! manager.handle_event(event.window, event.event)?;
//!
//! // Broadcast to every open window
//! manager.notify_all("theme-changed", &serde_json::json!(["dark"]));
//! ```
//!
//! # Side table
//!
//! The toolkit owns its windows. Per-window bookkeeping (session index,
//! last known geometry, whether it has been shown) lives in a map keyed by
//! `WindowId` instead of on the toolkit's objects.

use std::collections::HashMap;

use async_channel::Receiver;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::{IndexPolicy, WindowsConfig, WINDOW_RENDERED_CHANNEL};
use crate::error::{log_async_err, Result, ResultExt, WindowsError};
use crate::geometry::{self, Geometry};
use crate::logging;
use crate::session::SessionStore;
use crate::toolkit::{ToolkitEvent, WindowEvent, WindowId, WindowOptions, WindowToolkit};

use super::route;

/// Registry bookkeeping for one open window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowEntry {
    /// Session slot this window reads from and writes to
    pub index: usize,
    /// Last known geometry
    pub geometry: Geometry,
    /// Set once ready-to-show has been handled
    pub shown: bool,
}

/// Result of a successful `open()`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenedWindow {
    pub id: WindowId,
    pub index: usize,
    pub url: String,
}

/// Owns the active window set for one application instance.
///
/// Construct one at startup and keep it on the control thread; every
/// mutation goes through `&mut self`.
pub struct WindowsManager<T: WindowToolkit, S: SessionStore> {
    toolkit: T,
    store: S,
    config: WindowsConfig,
    entries: HashMap<WindowId, WindowEntry>,
    /// Active set in open order
    order: Vec<WindowId>,
    next_index: usize,
}

impl<T: WindowToolkit, S: SessionStore> WindowsManager<T, S> {
    pub fn new(toolkit: T, store: S, config: WindowsConfig) -> Self {
        Self {
            toolkit,
            store,
            config,
            entries: HashMap::new(),
            order: Vec::new(),
            next_index: 0,
        }
    }

    /// True if at least one window is open
    pub fn has_window(&self) -> bool {
        !self.order.is_empty()
    }

    pub fn window_count(&self) -> usize {
        self.order.len()
    }

    /// Open windows, oldest first
    pub fn windows(&self) -> &[WindowId] {
        &self.order
    }

    pub fn entry(&self, window: WindowId) -> Option<&WindowEntry> {
        self.entries.get(&window)
    }

    pub fn config(&self) -> &WindowsConfig {
        &self.config
    }

    pub fn toolkit(&self) -> &T {
        &self.toolkit
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Open a new window on `initial_path` (see `route::normalize`).
    ///
    /// Geometry comes from the session slot picked by the index policy,
    /// falling back to the configured defaults. Only a toolkit failure to
    /// create the window or load its page fails the call.
    pub async fn open(&mut self, initial_path: Option<&str>) -> Result<OpenedWindow> {
        let index = self.allocate_index();
        let geometry = self.restore_geometry(index).await;

        let options = WindowOptions {
            geometry,
            background_color: self.config.background_color.clone(),
            show: false,
            partition: self.config.partition.clone(),
        };
        let id = self
            .toolkit
            .create_window(&options)
            .map_err(WindowsError::WindowCreation)?;

        let route = route::normalize(initial_path, &self.config.default_route);
        let url = route::page_url(&self.config.page_path(), &route);
        if let Err(e) = self.toolkit.load_url(id, &url) {
            self.toolkit.close(id).log_err();
            return Err(WindowsError::WindowCreation(e));
        }

        self.entries.insert(
            id,
            WindowEntry {
                index,
                geometry,
                shown: false,
            },
        );
        self.order.push(id);
        logging::log(
            "WINDOW_REG",
            &format!("Registered {} at index {} ({})", id, index, route),
        );

        let active: Vec<usize> = self
            .order
            .iter()
            .filter_map(|id| self.entries.get(id).map(|entry| entry.index))
            .collect();
        log_async_err(self.store.record(&active).await, "record session");

        Ok(OpenedWindow { id, index, url })
    }

    /// Send `channel` with `args` to every open window, once each.
    ///
    /// A window that fails to receive is logged and skipped; delivery to
    /// the rest continues. Returns how many windows got the message.
    pub fn notify_all(&mut self, channel: &str, args: &Value) -> usize {
        let mut delivered = 0;
        for &id in &self.order {
            match self.toolkit.send(id, channel, args) {
                Ok(()) => delivered += 1,
                Err(e) => {
                    warn!(window = %id, channel, error = %e, "Failed to notify window");
                }
            }
        }
        debug!(channel, delivered, total = self.order.len(), "Notified windows");
        delivered
    }

    /// React to a toolkit event for `window`.
    ///
    /// Events for windows this registry doesn't track, or that the toolkit
    /// has already destroyed, are ignored. Session write failures are
    /// logged; toolkit failures are returned.
    pub fn handle_event(&mut self, window: WindowId, event: WindowEvent) -> Result<()> {
        if event == WindowEvent::Closed {
            self.remove(window);
            return Ok(());
        }

        let Some(entry) = self.entries.get_mut(&window) else {
            debug!(window = %window, event = event.as_str(), "Event for untracked window");
            return Ok(());
        };
        // Queued before the close; its own Closed event is still behind it
        if self.toolkit.is_destroyed(window) {
            debug!(window = %window, event = event.as_str(), "Event for destroyed window");
            return Ok(());
        }
        let index = entry.index;

        match event {
            WindowEvent::Moved => {
                let position = self.toolkit.position(window).map_err(WindowsError::Toolkit)?;
                entry.geometry.position = Some(position);
                self.store
                    .update_position(index, position)
                    .map_err(|source| WindowsError::Persist { index, source })
                    .warn_on_err();
            }
            WindowEvent::Resized => {
                let size = self.toolkit.size(window).map_err(WindowsError::Toolkit)?;
                entry.geometry.size = size;
                self.store
                    .update_size(index, size)
                    .map_err(|source| WindowsError::Persist { index, source })
                    .warn_on_err();
            }
            WindowEvent::ReadyToShow => {
                if entry.shown {
                    return Ok(());
                }
                self.toolkit.show(window).map_err(WindowsError::Toolkit)?;
                entry.shown = true;
                self.toolkit
                    .send(window, WINDOW_RENDERED_CHANNEL, &Value::Null)
                    .map_err(WindowsError::Toolkit)?;
            }
            WindowEvent::Closed => {}
        }
        Ok(())
    }

    /// Handle every event already queued on `events` without waiting.
    /// Returns the number of events handled.
    pub fn pump_pending(&mut self, events: &Receiver<ToolkitEvent>) -> Result<usize> {
        let mut handled = 0;
        while let Ok(ev) = events.try_recv() {
            self.handle_event(ev.window, ev.event)?;
            handled += 1;
        }
        Ok(handled)
    }

    /// Handle events until the toolkit closes the stream
    pub async fn pump_events(&mut self, events: &Receiver<ToolkitEvent>) -> Result<()> {
        while let Ok(ev) = events.recv().await {
            self.handle_event(ev.window, ev.event)?;
        }
        info!(event_type = "window_lifecycle", "Toolkit event stream closed");
        Ok(())
    }

    fn allocate_index(&mut self) -> usize {
        match self.config.index_policy {
            IndexPolicy::ActiveCount => self.order.len(),
            IndexPolicy::Monotonic => {
                let index = self.next_index;
                self.next_index += 1;
                index
            }
        }
    }

    async fn restore_geometry(&self, index: usize) -> Geometry {
        let defaults = self.config.default_geometry();
        let record = match self.store.restore(index).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                debug!(window_index = index, "No saved session, using defaults");
                return defaults;
            }
            Err(source) => {
                let e = WindowsError::Restore { index, source };
                warn!(error = %e, "Using default geometry");
                return defaults;
            }
        };

        let restored = record.merge_with(defaults);
        if !self.config.clamp_to_displays {
            return restored;
        }
        let displays = self.toolkit.displays();
        if displays.is_empty() || geometry::is_visible(&restored, &displays) {
            return restored;
        }
        match geometry::clamp_to_displays(&restored, &displays) {
            Some(clamped) => {
                info!(window_index = index, ?clamped, "Clamped saved window onto a display");
                clamped
            }
            None => {
                info!(window_index = index, "Saved position no longer visible");
                defaults
            }
        }
    }

    fn remove(&mut self, window: WindowId) {
        let Some(pos) = self.order.iter().position(|&id| id == window) else {
            return;
        };
        self.order.remove(pos);
        if let Some(entry) = self.entries.remove(&window) {
            logging::log(
                "WINDOW_REG",
                &format!("Cleared {} (index {})", window, entry.index),
            );
        }
    }
}
