//! Window management module
//!
//! `WindowsManager` owns the set of open app windows. It restores each
//! window's geometry from the session store when opening it, writes
//! geometry changes back as the toolkit reports them, and broadcasts
//! messages to every open window.

mod registry;
pub mod route;

pub use registry::{OpenedWindow, WindowEntry, WindowsManager};

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
