//! Pure view/render functions for the TUI.
//!
//! Functions here take `&TuiState` by immutable reference, draw to a ratatui
//! Frame, and never mutate state or return effects.

use postern_core::routes::Route;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::features::account;
use crate::state::TuiState;

/// Height of the status line below the body.
const STATUS_HEIGHT: u16 = 1;

/// Spinner frames for the resolving placeholder.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Renders the entire TUI to the frame.
pub fn render(state: &TuiState, frame: &mut Frame) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(STATUS_HEIGHT)])
        .split(area);
    let body = chunks[0];

    match state.route {
        Route::Home => {
            account::render_panel(&state.account, spinner(state.spinner_frame), frame, body);
        }
        Route::SignIn => render_sign_in(state, frame, body),
    }

    render_status_line(state, frame, chunks[1]);

    // Overlay last, over the full body.
    state.account.confirm.render(frame, body);
}

fn spinner(frame: usize) -> &'static str {
    SPINNER_FRAMES[frame % SPINNER_FRAMES.len()]
}

fn render_sign_in(state: &TuiState, frame: &mut Frame, area: Rect) {
    use ratatui::widgets::{Block, Borders};

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Sign in ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Sign in happens in your browser.",
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            state.config.sign_in_url(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("o", Style::default().fg(Color::Cyan)),
            Span::styled(" open browser  ", Style::default().fg(Color::DarkGray)),
            Span::styled("Esc", Style::default().fg(Color::Cyan)),
            Span::styled(" back", Style::default().fg(Color::DarkGray)),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_status_line(state: &TuiState, frame: &mut Frame, area: Rect) {
    let mut spans = Vec::new();

    if let Some(status) = &state.account.status {
        spans.push(Span::styled(
            status.clone(),
            Style::default().fg(Color::White),
        ));
        spans.push(Span::raw("  "));
    }

    spans.push(Span::styled(
        "q quit",
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
