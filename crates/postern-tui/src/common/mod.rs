//! Shared utilities for the TUI.

pub mod scroll;

pub use scroll::{ScrollGuard, ScrollLock};
