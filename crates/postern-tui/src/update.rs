//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(state, event)`
//! and executes the returned effects.
//!
//! This is the single source of truth for how events modify state.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use postern_core::routes::Route;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::account;
use crate::state::TuiState;

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(state: &mut TuiState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            state.spinner_frame = state.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(state, term_event),
        UiEvent::Account(account_event) => account::handle_event(&mut state.account, account_event),
        UiEvent::Navigated(route) => {
            state.route = route;
            vec![]
        }
    }
}

fn handle_terminal_event(state: &mut TuiState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) => handle_key(state, key),
        Event::Mouse(mouse) => account::handle_mouse(&mut state.account, mouse),
        _ => vec![],
    }
}

fn handle_key(state: &mut TuiState, key: KeyEvent) -> Vec<UiEffect> {
    // The confirmation dialog takes input precedence whenever it is open.
    if state.account.confirm.is_open() {
        return account::handle_key(&mut state.account, key);
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if key.code == KeyCode::Char('q') || (ctrl && key.code == KeyCode::Char('c')) {
        return vec![UiEffect::Quit];
    }

    match state.route {
        Route::Home => account::handle_key(&mut state.account, key),
        Route::SignIn => handle_sign_in_key(state, key),
    }
}

fn handle_sign_in_key(state: &mut TuiState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Enter | KeyCode::Char('o') => vec![UiEffect::OpenBrowser {
            url: state.config.sign_in_url(),
        }],
        KeyCode::Esc => vec![UiEffect::Navigate { route: Route::Home }],
        _ => vec![],
    }
}

#[cfg(test)]
mod tests {
    use postern_core::config::Config;
    use postern_core::session::{SessionRecord, SessionSnapshot};

    use super::*;
    use crate::features::account::AccountEvent;

    fn key_event(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn state_with_session(present: bool) -> TuiState {
        let mut state = TuiState::new(Config::default());
        let session = present.then(|| SessionRecord {
            account: "pat@example.com".to_string(),
            access_token: "tok-1234567890abcdef".to_string(),
            created_at: 1_754_000_000_000,
        });
        state.account.snapshot = SessionSnapshot::resolved(session);
        state
    }

    #[test]
    fn test_quit_keys() {
        let mut state = state_with_session(false);
        let effects = update(&mut state, key_event(KeyCode::Char('q')));
        assert!(matches!(effects[0], UiEffect::Quit));

        let mut state = state_with_session(false);
        let ctrl_c = UiEvent::Terminal(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        let effects = update(&mut state, ctrl_c);
        assert!(matches!(effects[0], UiEffect::Quit));
    }

    #[test]
    fn test_quit_does_not_pierce_the_dialog() {
        let mut state = state_with_session(true);
        update(&mut state, key_event(KeyCode::Enter));
        assert!(state.account.confirm.is_open());

        let effects = update(&mut state, key_event(KeyCode::Char('q')));
        assert!(effects.is_empty());
        assert!(!state.should_quit);
    }

    #[test]
    fn test_navigated_switches_route() {
        let mut state = state_with_session(false);
        update(&mut state, UiEvent::Navigated(Route::SignIn));
        assert_eq!(state.route, Route::SignIn);

        update(&mut state, UiEvent::Navigated(Route::Home));
        assert_eq!(state.route, Route::Home);
    }

    #[test]
    fn test_sign_in_screen_opens_browser() {
        let mut state = state_with_session(false);
        state.route = Route::SignIn;

        let effects = update(&mut state, key_event(KeyCode::Char('o')));
        assert!(matches!(
            &effects[0],
            UiEffect::OpenBrowser { url } if url == &state.config.sign_in_url()
        ));

        let effects = update(&mut state, key_event(KeyCode::Esc));
        assert!(matches!(
            effects[0],
            UiEffect::Navigate { route: Route::Home }
        ));
    }

    #[test]
    fn test_sign_out_flow_through_the_reducer() {
        let mut state = state_with_session(true);

        // Request, confirm.
        assert!(update(&mut state, key_event(KeyCode::Enter)).is_empty());
        let effects = update(&mut state, key_event(KeyCode::Enter));
        assert!(matches!(effects[0], UiEffect::SpawnSignOut));

        // Completion arrives through the inbox as an event.
        let effects = update(
            &mut state,
            UiEvent::Account(AccountEvent::SignOutFinished(Ok(()))),
        );
        assert!(effects.iter().any(|e| matches!(
            e,
            UiEffect::Navigate { route: Route::Home }
        )));
        assert!(!state.account.confirm.is_open());
        assert!(!state.scroll.is_locked());
    }

    #[test]
    fn test_tick_advances_spinner() {
        let mut state = state_with_session(false);
        update(&mut state, UiEvent::Tick);
        update(&mut state, UiEvent::Tick);
        assert_eq!(state.spinner_frame, 2);
    }
}
