use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::SessionError;
use crate::geometry::{Geometry, Position, Size};

/// Persisted geometry for one window index. Missing parts fall back to
/// the configured defaults when the window is opened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
}

impl SessionRecord {
    /// Fill whatever this record lacks from `defaults`
    pub fn merge_with(&self, defaults: Geometry) -> Geometry {
        Geometry {
            position: self.position.or(defaults.position),
            size: self.size.unwrap_or(defaults.size),
        }
    }
}

/// Bookkeeping written each time a window opens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastSession {
    pub open_windows: usize,
    /// Most windows ever open at once, across runs
    #[serde(default)]
    pub peak_windows: usize,
    pub recorded_at: DateTime<Utc>,
}

impl LastSession {
    /// Entry for a session whose open windows hold the slots in `active`
    pub fn following(previous: Option<&LastSession>, active: &[usize]) -> Self {
        let previous_peak = previous.map_or(0, |last| last.peak_windows.max(last.open_windows));
        Self {
            open_windows: active.len(),
            peak_windows: previous_peak.max(active.len()),
            recorded_at: Utc::now(),
        }
    }

    /// Whether slot `index` is still worth keeping.
    ///
    /// Slots below the peak are the ones a restart will open again. Slots
    /// above it only matter while their window is open.
    pub fn keeps_slot(&self, index: usize, active: &[usize]) -> bool {
        index < self.peak_windows || active.contains(&index)
    }
}

/// Per-index geometry persistence.
///
/// Called only from the control thread. `restore` and `record` are async
/// so stores backed by slower media can suspend the opening window.
#[allow(async_fn_in_trait)]
pub trait SessionStore {
    /// Saved record for `index`, or `None` if that slot was never used
    async fn restore(&self, index: usize) -> Result<Option<SessionRecord>, SessionError>;

    fn update_position(&mut self, index: usize, position: Position) -> Result<(), SessionError>;

    fn update_size(&mut self, index: usize, size: Size) -> Result<(), SessionError>;

    /// Note the slots held by the currently open windows, in open order.
    ///
    /// Once an earlier session has been recorded, stores may drop slots
    /// that neither an open window nor a restart will read again (see
    /// `LastSession::keeps_slot`).
    async fn record(&mut self, active: &[usize]) -> Result<(), SessionError>;
}

/// Session store that lives only as long as the process
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    records: HashMap<usize, SessionRecord>,
    last_session: Option<LastSession>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record, as if a previous run had saved it
    pub fn with_record(mut self, index: usize, record: SessionRecord) -> Self {
        self.records.insert(index, record);
        self
    }

    pub fn get(&self, index: usize) -> Option<&SessionRecord> {
        self.records.get(&index)
    }

    pub fn last_session(&self) -> Option<LastSession> {
        self.last_session
    }
}

impl SessionStore for MemorySessionStore {
    async fn restore(&self, index: usize) -> Result<Option<SessionRecord>, SessionError> {
        Ok(self.records.get(&index).copied())
    }

    fn update_position(&mut self, index: usize, position: Position) -> Result<(), SessionError> {
        self.records.entry(index).or_default().position = Some(position);
        Ok(())
    }

    fn update_size(&mut self, index: usize, size: Size) -> Result<(), SessionError> {
        self.records.entry(index).or_default().size = Some(size);
        Ok(())
    }

    async fn record(&mut self, active: &[usize]) -> Result<(), SessionError> {
        let last = LastSession::following(self.last_session.as_ref(), active);
        // Without an earlier entry there is no peak to trust yet
        if self.last_session.is_some() {
            self.records.retain(|&index, _| last.keeps_slot(index, active));
        }
        self.last_session = Some(last);
        Ok(())
    }
}
