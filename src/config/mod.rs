//! Configuration module - window defaults and session settings
//!
//! This module provides functionality for:
//! - Loading configuration from ~/.arc/windows.json
//! - Default values for all settings
//! - Type definitions for config structures
//!
//! # Module Structure
//!
//! - `defaults` - All default constant values
//! - `types` - Configuration struct definitions (WindowsConfig, IndexPolicy)
//! - `loader` - File system loading and parsing

mod defaults;
mod loader;
mod types;

pub use defaults::{DEFAULT_ROUTE, WINDOW_RENDERED_CHANNEL};

pub use types::{IndexPolicy, WindowsConfig};

pub use loader::{default_config_path, load_config};

#[cfg(test)]
pub use defaults::{
    DEFAULT_BACKGROUND_COLOR, DEFAULT_PARTITION, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH,
};

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
