//! Account feature reducer.
//!
//! Drives the sign-out state machine:
//!
//! ```text
//! Idle -> ConfirmPending   (sign-out requested, session present)
//! ConfirmPending -> Idle   (dismissed)
//! ConfirmPending -> ActionInFlight (confirmed; SpawnSignOut emitted once)
//! ActionInFlight -> Idle            (success; navigate home + re-resolve)
//! ActionInFlight -> ConfirmPending  (failure; dialog stays open for retry)
//! ```

use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use postern_core::routes::Route;
use postern_core::session::{SessionRecord, SessionSnapshot};

use super::state::{AccountState, SignOutPhase};
use crate::effects::UiEffect;
use crate::overlays::{ConfirmSignal, ConfirmationRequest};

/// Async results delivered to the account feature through the inbox.
#[derive(Debug)]
pub enum AccountEvent {
    /// The provider resolved whether a session exists.
    SessionResolved(Result<Option<SessionRecord>, String>),
    /// The sign-out operation finished.
    SignOutFinished(Result<(), String>),
}

/// Handles a key press for the account panel (dialog first when open).
pub fn handle_key(state: &mut AccountState, key: KeyEvent) -> Vec<UiEffect> {
    if state.confirm.is_open() {
        return match state.confirm.handle_key(key) {
            Some(ConfirmSignal::Confirmed) => begin_sign_out(state),
            Some(ConfirmSignal::Dismissed) => {
                state.confirm.close();
                vec![]
            }
            None => vec![],
        };
    }

    if state.snapshot.is_resolving {
        // Placeholder only; neither affordance is active yet.
        return vec![];
    }

    match key.code {
        KeyCode::Enter => {
            if state.snapshot.session.is_some() {
                request_sign_out(state);
                vec![]
            } else {
                vec![UiEffect::Navigate {
                    route: Route::SignIn,
                }]
            }
        }
        _ => vec![],
    }
}

/// Handles a mouse event: dialog routing when open, panel scrolling otherwise.
pub fn handle_mouse(state: &mut AccountState, mouse: MouseEvent) -> Vec<UiEffect> {
    if state.confirm.is_open() {
        return match state.confirm.handle_mouse(mouse) {
            Some(ConfirmSignal::Confirmed) => begin_sign_out(state),
            Some(ConfirmSignal::Dismissed) => {
                state.confirm.close();
                vec![]
            }
            None => vec![],
        };
    }

    if state.scroll.is_locked() {
        return vec![];
    }
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            state.scroll_offset = state.scroll_offset.saturating_sub(1);
        }
        MouseEventKind::ScrollDown => {
            state.scroll_offset = state.scroll_offset.saturating_add(1);
        }
        _ => {}
    }
    vec![]
}

/// Opens the confirmation dialog for sign-out.
///
/// No-op while a confirmation is already pending or in flight, and when
/// there is no session to end.
pub fn request_sign_out(state: &mut AccountState) {
    if state.phase() != SignOutPhase::Idle {
        return;
    }
    if state.snapshot.is_resolving || state.snapshot.session.is_none() {
        return;
    }
    state.confirm.open(ConfirmationRequest {
        title: "Sign Out".to_string(),
        description: "This ends your current session on this machine. \
                      You will need to sign in again to use your account."
            .to_string(),
        confirm_label: "Sign Out".to_string(),
        ..ConfirmationRequest::default()
    });
}

/// Handles async results from the runtime.
pub fn handle_event(state: &mut AccountState, event: AccountEvent) -> Vec<UiEffect> {
    match event {
        AccountEvent::SessionResolved(result) => {
            let session = match result {
                Ok(session) => session,
                Err(error) => {
                    // An unreadable store is "signed out", not a fatal error.
                    tracing::warn!(%error, "failed to resolve session state");
                    state.status = Some("Could not read session state.".to_string());
                    None
                }
            };
            state.snapshot = SessionSnapshot::resolved(session);
            vec![]
        }
        AccountEvent::SignOutFinished(Ok(())) => {
            state.confirm.close();
            state.status = Some("Signed out.".to_string());
            // The provider owns the record; re-read it rather than assuming.
            state.snapshot = SessionSnapshot::resolving();
            vec![
                UiEffect::Navigate { route: Route::Home },
                UiEffect::ResolveSession,
            ]
        }
        AccountEvent::SignOutFinished(Err(error)) => {
            tracing::warn!(%error, "sign-out failed");
            state.confirm.set_loading(false);
            state
                .confirm
                .set_error(format!("Sign-out failed: {error}"));
            vec![]
        }
    }
}

/// ConfirmPending -> ActionInFlight. The loading flag is set before the
/// effect reaches the runtime, so a second confirm cannot fire while the
/// call is outstanding.
fn begin_sign_out(state: &mut AccountState) -> Vec<UiEffect> {
    state.confirm.set_loading(true);
    vec![UiEffect::SpawnSignOut]
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::common::ScrollLock;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn session() -> SessionRecord {
        SessionRecord {
            account: "pat@example.com".to_string(),
            access_token: "tok-1234567890abcdef".to_string(),
            created_at: 1_754_000_000_000,
        }
    }

    fn signed_in_state() -> AccountState {
        let mut state = AccountState::new(ScrollLock::default());
        state.snapshot = SessionSnapshot::resolved(Some(session()));
        state
    }

    fn signed_out_state() -> AccountState {
        let mut state = AccountState::new(ScrollLock::default());
        state.snapshot = SessionSnapshot::resolved(None);
        state
    }

    #[test]
    fn test_cancel_makes_no_sign_out_call() {
        // Scenario A: request, then cancel.
        let mut state = signed_in_state();

        let effects = handle_key(&mut state, key(KeyCode::Enter));
        assert!(effects.is_empty());
        assert_eq!(state.phase(), SignOutPhase::ConfirmPending);
        assert_eq!(state.confirm.request().title, "Sign Out");

        let effects = handle_key(&mut state, key(KeyCode::Esc));
        assert!(effects.is_empty());
        assert_eq!(state.phase(), SignOutPhase::Idle);
        assert!(state.snapshot.session.is_some());
    }

    #[test]
    fn test_confirm_spawns_sign_out_exactly_once() {
        // Scenario B, first half.
        let mut state = signed_in_state();
        handle_key(&mut state, key(KeyCode::Enter));

        let effects = handle_key(&mut state, key(KeyCode::Enter));
        assert_eq!(effects.len(), 1);
        assert!(matches!(effects[0], UiEffect::SpawnSignOut));
        assert_eq!(state.phase(), SignOutPhase::ActionInFlight);

        // A second confirm while in flight is dead input.
        let effects = handle_key(&mut state, key(KeyCode::Enter));
        assert!(effects.is_empty());
        let effects = handle_key(&mut state, key(KeyCode::Esc));
        assert!(effects.is_empty());
        assert_eq!(state.phase(), SignOutPhase::ActionInFlight);
    }

    #[test]
    fn test_success_closes_dialog_and_navigates_home() {
        // Scenario B, second half.
        let mut state = signed_in_state();
        handle_key(&mut state, key(KeyCode::Enter));
        handle_key(&mut state, key(KeyCode::Enter));

        let effects = handle_event(&mut state, AccountEvent::SignOutFinished(Ok(())));
        assert_eq!(state.phase(), SignOutPhase::Idle);
        assert!(!state.confirm.request().is_loading);
        assert!(state.snapshot.is_resolving);
        assert!(effects.iter().any(|e| matches!(
            e,
            UiEffect::Navigate { route: Route::Home }
        )));
        assert!(
            effects
                .iter()
                .any(|e| matches!(e, UiEffect::ResolveSession))
        );
    }

    #[test]
    fn test_failure_keeps_dialog_open_for_retry() {
        // Scenario C.
        let mut state = signed_in_state();
        handle_key(&mut state, key(KeyCode::Enter));
        handle_key(&mut state, key(KeyCode::Enter));

        let effects = handle_event(
            &mut state,
            AccountEvent::SignOutFinished(Err("connection reset".to_string())),
        );
        assert!(effects.is_empty());
        assert_eq!(state.phase(), SignOutPhase::ConfirmPending);
        assert!(state.confirm.error().unwrap().contains("connection reset"));

        // Retry path: confirm is available again.
        let effects = handle_key(&mut state, key(KeyCode::Enter));
        assert!(matches!(effects[0], UiEffect::SpawnSignOut));
        assert_eq!(state.phase(), SignOutPhase::ActionInFlight);
    }

    #[test]
    fn test_no_session_navigates_to_sign_in() {
        // Scenario D: the confirmation machine never activates.
        let mut state = signed_out_state();

        let effects = handle_key(&mut state, key(KeyCode::Enter));
        assert_eq!(effects.len(), 1);
        assert!(matches!(
            effects[0],
            UiEffect::Navigate {
                route: Route::SignIn
            }
        ));
        assert_eq!(state.phase(), SignOutPhase::Idle);
    }

    #[test]
    fn test_resolving_disables_both_affordances() {
        // Scenario E: no flash of the wrong affordance.
        let mut state = AccountState::new(ScrollLock::default());
        assert!(state.snapshot.is_resolving);

        let effects = handle_key(&mut state, key(KeyCode::Enter));
        assert!(effects.is_empty());
        assert_eq!(state.phase(), SignOutPhase::Idle);

        // Resolution to a present session makes sign-out (not sign-in) active.
        handle_event(
            &mut state,
            AccountEvent::SessionResolved(Ok(Some(session()))),
        );
        let effects = handle_key(&mut state, key(KeyCode::Enter));
        assert!(effects.is_empty());
        assert_eq!(state.phase(), SignOutPhase::ConfirmPending);
    }

    #[test]
    fn test_resolve_failure_reads_as_signed_out() {
        let mut state = AccountState::new(ScrollLock::default());
        handle_event(
            &mut state,
            AccountEvent::SessionResolved(Err("permission denied".to_string())),
        );
        assert!(!state.snapshot.is_resolving);
        assert!(state.snapshot.session.is_none());
        assert!(state.status.is_some());
    }

    #[test]
    fn test_repeated_request_is_a_no_op() {
        let mut state = signed_in_state();
        request_sign_out(&mut state);
        assert_eq!(state.phase(), SignOutPhase::ConfirmPending);

        request_sign_out(&mut state);
        assert_eq!(state.phase(), SignOutPhase::ConfirmPending);
        assert!(state.scroll.is_locked());

        state.confirm.close();
        // A single close releases the single acquisition.
        assert!(!state.scroll.is_locked());
    }

    #[test]
    fn test_panel_scroll_suppressed_while_locked() {
        let mut state = signed_in_state();
        let scroll_down = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };

        handle_mouse(&mut state, scroll_down);
        assert_eq!(state.scroll_offset, 1);

        let _guard = state.scroll.acquire();
        handle_mouse(&mut state, scroll_down);
        assert_eq!(state.scroll_offset, 1);
    }
}
