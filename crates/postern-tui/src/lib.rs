//! Full-screen TUI implementation for the Postern account panel.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};

use anyhow::Result;
pub use features::account;
use postern_core::config::Config;
use postern_core::session::SessionStore;
pub use runtime::TuiRuntime;

/// Runs the interactive account panel.
pub async fn run_account_panel(config: Config) -> Result<()> {
    // The panel requires a terminal to render the TUI
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The account panel requires a terminal.\n\
             Use `postern status` or `postern signout` for non-interactive use."
        );
    }

    let provider = SessionStore::from_config(&config);
    let mut runtime = TuiRuntime::new(config, provider)?;
    runtime.run()
}
