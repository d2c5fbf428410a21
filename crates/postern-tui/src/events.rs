//! UI event types.
//!
//! Everything that changes state flows through here: terminal input, timer
//! ticks, async results arriving via the runtime inbox, and navigation
//! requests coming back from the navigator collaborator.

use postern_core::routes::Route;

use crate::features::account::AccountEvent;

#[derive(Debug)]
pub enum UiEvent {
    /// Periodic timer tick (drives spinner animation).
    Tick,
    /// Raw terminal input.
    Terminal(crossterm::event::Event),
    /// Async results for the account feature.
    Account(AccountEvent),
    /// The navigator asks the shell to show a destination.
    Navigated(Route),
}
