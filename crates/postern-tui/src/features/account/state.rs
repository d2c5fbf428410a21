//! Account feature state.

use postern_core::session::SessionSnapshot;

use crate::common::ScrollLock;
use crate::overlays::ConfirmState;

/// Sign-out flow phase, derived from the dialog and its loading flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignOutPhase {
    /// Panel shown, no confirmation pending.
    Idle,
    /// Confirmation dialog open, waiting for a decision.
    ConfirmPending,
    /// Sign-out call outstanding; dialog locked open.
    ActionInFlight,
}

/// State for the account panel feature.
#[derive(Debug)]
pub struct AccountState {
    /// Latest known provider state. Starts resolving: neither affordance is
    /// offered until the provider answers.
    pub snapshot: SessionSnapshot,
    /// The sign-out confirmation dialog.
    pub confirm: ConfirmState,
    /// Transient status text shown in the status line.
    pub status: Option<String>,
    /// Shared scroll-lock handle, consulted before applying scroll input.
    pub scroll: ScrollLock,
    /// Panel body scroll offset.
    pub scroll_offset: u16,
}

impl AccountState {
    pub fn new(scroll: ScrollLock) -> Self {
        Self {
            snapshot: SessionSnapshot::resolving(),
            confirm: ConfirmState::new(scroll.clone()),
            status: None,
            scroll,
            scroll_offset: 0,
        }
    }

    /// Current phase of the sign-out machine.
    ///
    /// There is no stored phase field: the phase is a projection of the
    /// dialog's visibility and loading flag, so it cannot drift from them.
    pub fn phase(&self) -> SignOutPhase {
        if !self.confirm.is_open() {
            SignOutPhase::Idle
        } else if self.confirm.request().is_loading {
            SignOutPhase::ActionInFlight
        } else {
            SignOutPhase::ConfirmPending
        }
    }
}
