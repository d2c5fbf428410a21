//! Account feature view.

use postern_core::session::SessionRecord;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::state::AccountState;

/// Renders the account panel body.
///
/// Pure projection of the latest snapshot plus local state: while the
/// session is resolving, a disabled placeholder stands in for either
/// affordance.
pub fn render_panel(state: &AccountState, spinner: &str, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Account ")
        .title_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = if state.snapshot.is_resolving {
        resolving_lines(spinner)
    } else if let Some(session) = &state.snapshot.session {
        signed_in_lines(session)
    } else {
        signed_out_lines()
    };

    let body = Paragraph::new(lines).scroll((state.scroll_offset, 0));
    frame.render_widget(body, inner);
}

fn resolving_lines(spinner: &str) -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{spinner} Resolving session…"),
            Style::default().fg(Color::DarkGray),
        )),
    ]
}

fn signed_in_lines(session: &SessionRecord) -> Vec<Line<'static>> {
    let since = session
        .signed_in_since()
        .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "unknown".to_string());

    vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Signed in as ", Style::default().fg(Color::White)),
            Span::styled(
                session.account.clone(),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            format!("Since {since}"),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            format!("Token {}", session.masked_token()),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Red)),
            Span::styled(" sign out", Style::default().fg(Color::DarkGray)),
        ]),
    ]
}

fn signed_out_lines() -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from(Span::styled(
            "Not signed in.",
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Cyan)),
            Span::styled(" sign in", Style::default().fg(Color::DarkGray)),
        ]),
    ]
}
