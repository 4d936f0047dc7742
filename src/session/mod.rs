//! Session persistence for window geometry
//!
//! Each window index owns one `SessionRecord` (position and size). Records
//! survive process restarts so a window reopened in the same slot comes
//! back where the user left it.
//!
//! - `store` - the `SessionStore` trait, record types, and an in-memory store
//! - `json_store` - file-backed store at ~/.arc/window-state.json

mod json_store;
mod store;

pub use json_store::{JsonSessionStore, SessionFile};
pub use store::{LastSession, MemorySessionStore, SessionRecord, SessionStore};

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
