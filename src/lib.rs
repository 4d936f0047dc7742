//! Arc Windows - window lifecycle and session geometry for desktop apps
//!
//! This library keeps track of an application's open windows, restores
//! each window's position and size from the previous run, and writes
//! geometry changes back as the toolkit reports them.

pub mod config;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod session;
pub mod toolkit;
pub mod windows;
