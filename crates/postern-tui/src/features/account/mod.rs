//! Account panel: session display and the sign-out flow.
//!
//! The panel observes session state from the provider (projected into a
//! [`postern_core::session::SessionSnapshot`]) and gates the destructive
//! sign-out action behind the confirmation dialog. All session mutation and
//! navigation happen outside: the feature only emits effects.

mod render;
mod state;
mod update;

pub use render::render_panel;
pub use state::{AccountState, SignOutPhase};
pub use update::{AccountEvent, handle_event, handle_key, handle_mouse, request_sign_out};
