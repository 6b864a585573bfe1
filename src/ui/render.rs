use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders},
    Frame,
};

use crate::widget::{ClassifierState, Focus};

use super::widgets::{
    ClassifyButtonWidget, FieldWidget, FolderPanelWidget, HeaderWidget, StatusWidget,
    KEYBOARD_HINT,
};

const HELP_TEXT: &str = "Tab: next field | Ctrl+Enter: classify | Esc: quit";

/// Renders the whole classifier: header, form, folder grid and help bar.
pub fn render(frame: &mut Frame, state: &ClassifierState, model: &str) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(10),   // Form + folders
            Constraint::Length(1), // Help bar
        ])
        .split(frame.area());

    frame.render_widget(HeaderWidget::new(model), rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[1]);

    render_form(frame, state, columns[0]);
    render_folders(frame, state, columns[1]);

    frame.render_widget(
        Line::from(Span::styled(HELP_TEXT, Style::default().fg(Color::DarkGray))),
        rows[2],
    );
}

fn render_form(frame: &mut Frame, state: &ClassifierState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" ✉ New Email ")
        .title_bottom(" Enter email details to classify ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Subject
            Constraint::Min(4),    // Body
            Constraint::Length(1), // Button
            Constraint::Length(1), // Hint
            Constraint::Length(5), // Error / result
        ])
        .split(inner);

    let busy = state.is_busy();
    let focus = state.focus();

    let subject = FieldWidget::new("Subject Line", state.subject(), focus == Focus::Subject, busy);
    let body = FieldWidget::new(
        "Email Body (Optional)",
        state.body(),
        focus == Focus::Body,
        busy,
    );
    let caret = match focus {
        Focus::Subject if !busy => Some(subject.cursor(parts[0])),
        Focus::Body if !busy => Some(body.cursor(parts[1])),
        _ => None,
    };
    frame.render_widget(subject, parts[0]);
    frame.render_widget(body, parts[1]);
    if let Some(position) = caret {
        frame.set_cursor_position(position);
    }

    frame.render_widget(
        ClassifyButtonWidget::new(state.can_trigger(), busy, focus == Focus::Button),
        parts[2],
    );
    frame.render_widget(
        Line::from(Span::styled(KEYBOARD_HINT, Style::default().fg(Color::DarkGray))),
        parts[3],
    );
    frame.render_widget(StatusWidget::new(state.error(), state.result()), parts[4]);
}

fn render_folders(frame: &mut Frame, state: &ClassifierState, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let cells: Vec<Rect> = halves
        .iter()
        .flat_map(|half| {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(*half)
                .to_vec()
        })
        .collect();

    for ((folder, emails), cell) in state.store().iter().zip(cells) {
        frame.render_widget(FolderPanelWidget::new(folder.definition(), emails), cell);
    }
}
