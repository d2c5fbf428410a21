//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only (no direct UI mutations).
//!
//! This keeps the reducer pure: it only mutates state and returns effects,
//! never performs I/O or spawns tasks directly.

use postern_core::routes::Route;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Re-read session state from the provider.
    ResolveSession,

    /// Invoke the provider's sign-out operation.
    ///
    /// Emitted at most once per confirmation: the reducer sets the dialog's
    /// loading flag before returning this, which disables further confirms.
    SpawnSignOut,

    /// Ask the navigator to show a destination. Fire-and-forget.
    Navigate { route: Route },

    /// Open a URL in the system browser.
    OpenBrowser { url: String },
}
