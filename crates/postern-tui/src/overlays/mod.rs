//! Overlay modules for the TUI.
//!
//! Overlays are modal components that temporarily take over keyboard and
//! mouse input. Each overlay is self-contained: it owns its visibility,
//! input handling, and render function, and reports user decisions as
//! signals instead of acting on them itself.

pub mod confirm;
pub mod render_utils;

pub use confirm::{ConfirmSignal, ConfirmState, ConfirmationRequest, Severity};
