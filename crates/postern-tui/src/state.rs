//! Application state composition.
//!
//! ```text
//! TuiState
//! ├── route: Route             (screen currently shown)
//! ├── account: AccountState    (session snapshot + sign-out machine)
//! │   └── confirm: ConfirmState (the confirmation dialog)
//! ├── scroll: ScrollLock       (shared scroll suppression)
//! └── spinner_frame            (animation counter)
//! ```
//!
//! State is mutated only by the reducer in `update.rs` and rendered by pure
//! view functions in `render.rs`.

use postern_core::config::Config;
use postern_core::routes::Route;

use crate::common::ScrollLock;
use crate::features::account::AccountState;

/// Top-level TUI state.
pub struct TuiState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    /// Screen currently shown. Switched only through the navigator.
    pub route: Route,
    /// Account panel feature state.
    pub account: AccountState,
    /// Shared scroll-lock handle; overlays hold guards from it.
    pub scroll: ScrollLock,
    /// Spinner animation frame counter.
    pub spinner_frame: usize,
    /// Application configuration.
    pub config: Config,
}

impl TuiState {
    pub fn new(config: Config) -> Self {
        let scroll = ScrollLock::default();
        Self {
            should_quit: false,
            route: Route::Home,
            account: AccountState::new(scroll.clone()),
            scroll,
            spinner_frame: 0,
            config,
        }
    }
}
