//! Destructive-action confirmation dialog.
//!
//! The dialog is deliberately dumb: it collects a confirm/dismiss decision
//! and reports it as a `ConfirmSignal`. The owning feature decides what that
//! decision means; the dialog performs no I/O and mutates nothing outside
//! its own visibility.
//!
//! Visibility is tied one-to-one to a held [`ScrollGuard`]: opening acquires
//! it, closing releases it, and dropping the state while open releases it
//! too, so the panel underneath is never left scroll-locked.

use std::cell::Cell;

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use super::render_utils::{InputHint, calculate_overlay_area, render_hints, render_overlay_container};
use crate::common::{ScrollGuard, ScrollLock};

/// Label shown on the confirm button while the action is in flight.
const PROCESSING_LABEL: &str = "Working…";

/// Dialog width in terminal cells.
const DIALOG_WIDTH: u16 = 52;

/// Visual weight of the pending action. Affects the accent color only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Danger,
    Warning,
    Info,
}

impl Severity {
    fn accent(self) -> Color {
        match self {
            Severity::Danger => Color::Red,
            Severity::Warning => Color::Yellow,
            Severity::Info => Color::Cyan,
        }
    }
}

/// What the dialog asks. Owned by the invoking feature and handed to the
/// dialog on open.
#[derive(Debug, Clone)]
pub struct ConfirmationRequest {
    pub title: String,
    pub description: String,
    pub confirm_label: String,
    pub cancel_label: String,
    pub severity: Severity,
    /// True while the confirmed action is in flight; disables both controls.
    pub is_loading: bool,
}

impl Default for ConfirmationRequest {
    fn default() -> Self {
        Self {
            title: "Confirm".to_string(),
            description: "Are you sure?".to_string(),
            confirm_label: "Confirm".to_string(),
            cancel_label: "Cancel".to_string(),
            severity: Severity::default(),
            is_loading: false,
        }
    }
}

/// User decision reported by the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmSignal {
    Confirmed,
    Dismissed,
}

/// Confirmation dialog state.
#[derive(Debug)]
pub struct ConfirmState {
    request: ConfirmationRequest,
    /// Failure text shown inside the dialog (set by the consumer).
    error: Option<String>,
    scroll: ScrollLock,
    /// Held exactly while the dialog is visible.
    guard: Option<ScrollGuard>,
    /// Dialog rect from the last render, for backdrop-click routing.
    dialog_area: Cell<Rect>,
}

impl ConfirmState {
    /// Creates a closed dialog wired to the shared scroll lock.
    pub fn new(scroll: ScrollLock) -> Self {
        Self {
            request: ConfirmationRequest::default(),
            error: None,
            scroll,
            guard: None,
            dialog_area: Cell::new(Rect::default()),
        }
    }

    pub fn is_open(&self) -> bool {
        self.guard.is_some()
    }

    pub fn request(&self) -> &ConfirmationRequest {
        &self.request
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Opens the dialog with a fresh request.
    ///
    /// Reopening an already-open dialog replaces the request without
    /// acquiring a second scroll suppression.
    pub fn open(&mut self, request: ConfirmationRequest) {
        self.request = request;
        self.error = None;
        if self.guard.is_none() {
            self.guard = Some(self.scroll.acquire());
        }
    }

    /// Closes the dialog and releases the scroll suppression.
    ///
    /// Idempotent, and permitted regardless of the loading flag: the loading
    /// guard blocks user interaction, not programmatic closure.
    pub fn close(&mut self) {
        self.guard = None;
        self.error = None;
        self.request.is_loading = false;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.request.is_loading = loading;
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
    }

    /// Routes a key press. Returns `None` while closed or loading, and for
    /// keys the dialog does not understand.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<ConfirmSignal> {
        if !self.is_open() || self.request.is_loading {
            return None;
        }
        match key.code {
            KeyCode::Enter | KeyCode::Char('y') => Some(ConfirmSignal::Confirmed),
            KeyCode::Esc | KeyCode::Char('n') => Some(ConfirmSignal::Dismissed),
            _ => None,
        }
    }

    /// Routes a mouse press: a left click outside the dialog rect counts as
    /// backdrop dismissal; clicks inside are swallowed. Same loading guard
    /// as keys — there is no escape during an in-flight action.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<ConfirmSignal> {
        if !self.is_open() || self.request.is_loading {
            return None;
        }
        if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return None;
        }
        let inside = self
            .dialog_area
            .get()
            .contains(Position::new(mouse.column, mouse.row));
        if inside {
            None
        } else {
            Some(ConfirmSignal::Dismissed)
        }
    }

    /// Renders the dialog centered in `area`. Renders nothing while closed.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.is_open() {
            return;
        }

        let accent = self.request.severity.accent();
        // Wrapped description + blanks + optional error row + buttons + footer.
        let description_height = wrapped_height(&self.request.description, DIALOG_WIDTH - 4);
        let error_height = if self.error.is_some() { 2 } else { 0 };
        let height = description_height + error_height + 6;

        let popup = calculate_overlay_area(area, DIALOG_WIDTH, height);
        self.dialog_area.set(popup);

        let inner = render_overlay_container(frame, popup, &self.request.title, accent);
        let description_height = description_height.min(inner.height);

        let description = Paragraph::new(self.request.description.clone())
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: true });
        let description_area = Rect::new(inner.x, inner.y, inner.width, description_height);
        frame.render_widget(description, description_area);

        let bottom = inner.y + inner.height;
        let mut y = inner.y + description_height + 1;
        if let Some(error) = &self.error
            && y < bottom
        {
            let error_line = Paragraph::new(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )))
            .wrap(Wrap { trim: true });
            frame.render_widget(error_line, Rect::new(inner.x, y, inner.width, 1));
            y += 2;
        }

        if y < bottom {
            frame.render_widget(
                Paragraph::new(self.button_row(accent))
                    .alignment(ratatui::layout::Alignment::Center),
                Rect::new(inner.x, y, inner.width, 1),
            );
        }

        let hints = if self.request.is_loading {
            [InputHint::new("…", "waiting for the action to finish")]
        } else {
            [InputHint::new("Enter", "confirm • Esc cancel")]
        };
        render_hints(frame, inner, &hints, accent);
    }

    /// Builds the `[ Confirm ]  [ Cancel ]` row. While loading, the confirm
    /// label is replaced with a processing indicator and both buttons dim;
    /// the layout itself does not change.
    fn button_row(&self, accent: Color) -> Line<'static> {
        let loading = self.request.is_loading;
        let confirm_label = if loading {
            PROCESSING_LABEL
        } else {
            self.request.confirm_label.as_str()
        };
        let confirm_style = if loading {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(accent).add_modifier(Modifier::BOLD)
        };
        let cancel_style = if loading {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        };

        Line::from(vec![
            Span::styled(format!("[ {confirm_label} ]"), confirm_style),
            Span::raw("   "),
            Span::styled(
                format!("[ {} ]", self.request.cancel_label),
                cancel_style,
            ),
        ])
    }
}

/// Number of lines `text` occupies when wrapped to `width` columns.
fn wrapped_height(text: &str, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let mut lines = 0u16;
    for raw in text.lines() {
        let chars = raw.chars().count();
        lines += 1 + (chars.saturating_sub(1) / width) as u16;
    }
    lines.max(1)
}
