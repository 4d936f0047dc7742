//! File-backed session store
//!
//! All windows share one JSON document. Every update is a
//! read-modify-write followed by an atomic replace (temp file + rename),
//! so a crash mid-write leaves the previous file intact.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::store::{LastSession, SessionRecord, SessionStore};
use crate::error::SessionError;
use crate::geometry::{Position, Size};

/// The full persisted session file
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SessionFile {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub windows: BTreeMap<usize, SessionRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_session: Option<LastSession>,
}

fn default_version() -> u32 {
    1
}

#[derive(Debug, Clone)]
pub struct JsonSessionStore {
    path: PathBuf,
}

impl JsonSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the whole file. A missing file is an empty session.
    pub fn load(&self) -> Result<SessionFile, SessionError> {
        if !self.path.exists() {
            return Ok(SessionFile::default());
        }
        let contents = fs::read_to_string(&self.path).map_err(|source| self.io_err(source))?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Save the whole file (atomic write)
    pub fn save(&self, state: &SessionFile) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| self.io_err(source))?;
        }
        let json = serde_json::to_string_pretty(state)?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, &json).map_err(|source| self.io_err(source))?;
        if let Err(source) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(self.io_err(source));
        }
        debug!(path = %self.path.display(), "Session file saved");
        Ok(())
    }

    /// Info about the last recorded session, if any
    pub fn last_session(&self) -> Result<Option<LastSession>, SessionError> {
        Ok(self.load()?.last_session)
    }

    /// Forget every saved window (delete the file)
    pub fn reset(&self) -> Result<(), SessionError> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|source| self.io_err(source))?;
            info!(path = %self.path.display(), "All window sessions reset to defaults");
        }
        Ok(())
    }

    fn modify(&self, f: impl FnOnce(&mut SessionFile)) -> Result<(), SessionError> {
        // A corrupt file is replaced rather than blocking every future write
        let mut state = match self.load() {
            Ok(state) => state,
            Err(SessionError::Parse(e)) => {
                tracing::warn!(error = %e, "Discarding unreadable session file");
                SessionFile::default()
            }
            Err(e) => return Err(e),
        };
        state.version = default_version();
        f(&mut state);
        self.save(&state)
    }

    fn io_err(&self, source: std::io::Error) -> SessionError {
        SessionError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl SessionStore for JsonSessionStore {
    async fn restore(&self, index: usize) -> Result<Option<SessionRecord>, SessionError> {
        Ok(self.load()?.windows.get(&index).copied())
    }

    fn update_position(&mut self, index: usize, position: Position) -> Result<(), SessionError> {
        self.modify(|state| {
            state.windows.entry(index).or_default().position = Some(position);
        })
    }

    fn update_size(&mut self, index: usize, size: Size) -> Result<(), SessionError> {
        self.modify(|state| {
            state.windows.entry(index).or_default().size = Some(size);
        })
    }

    async fn record(&mut self, active: &[usize]) -> Result<(), SessionError> {
        self.modify(|state| {
            let last = LastSession::following(state.last_session.as_ref(), active);
            let before = state.windows.len();
            if state.last_session.is_some() {
                state.windows.retain(|&index, _| last.keeps_slot(index, active));
            }
            if state.windows.len() < before {
                debug!(pruned = before - state.windows.len(), "Dropped unused window slots");
            }
            state.last_session = Some(last);
        })
    }
}
