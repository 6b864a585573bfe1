use chrono::{DateTime, Local, Utc};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::{
    domain::{ClassificationResult, EmailRecord, FolderDefinition},
    widget::TextField,
};

/// Characters of the body shown under each filed email.
const PREVIEW_CHARS: usize = 80;

/// Keyboard hint shown below the classify button
pub const KEYBOARD_HINT: &str = "Press Ctrl + Enter to classify";

/// First [`PREVIEW_CHARS`] characters of a body on one line, followed by an ellipsis.
pub fn body_preview(body: &str) -> String {
    let flat: String = body
        .chars()
        .take(PREVIEW_CHARS)
        .map(|ch| if ch == '\n' || ch == '\r' { ' ' } else { ch })
        .collect();
    format!("{flat}...")
}

/// Wall-clock time of a record in the local timezone
fn format_time(timestamp: &DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%H:%M:%S").to_string()
}

/// Title bar naming the app and the backing model
pub struct HeaderWidget<'a> {
    model: &'a str,
}

impl<'a> HeaderWidget<'a> {
    pub fn new(model: &'a str) -> Self {
        Self { model }
    }
}

impl Widget for HeaderWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        block.render(area, buf);

        let title = Line::from(vec![
            Span::styled(
                "✉ AI Email Classifier",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format!("Powered by {}", self.model),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        buf.set_line(inner.x, inner.y, &title, inner.width);
    }
}

/// Bordered text input
pub struct FieldWidget<'a> {
    label: &'a str,
    field: &'a TextField,
    focused: bool,
    disabled: bool,
}

impl<'a> FieldWidget<'a> {
    pub fn new(label: &'a str, field: &'a TextField, focused: bool, disabled: bool) -> Self {
        Self {
            label,
            field,
            focused,
            disabled,
        }
    }

    /// Scroll offset (rows, cols) keeping the cursor inside `inner`.
    fn scroll(&self, inner: Rect) -> (u16, u16) {
        let (row, col) = self.field.cursor_position();
        let rows = (row as u16).saturating_sub(inner.height.saturating_sub(1));
        let cols = (col as u16).saturating_sub(inner.width.saturating_sub(1));
        (rows, cols)
    }

    /// Terminal position of the caret when this field is drawn into `area`.
    pub fn cursor(&self, area: Rect) -> Position {
        let inner = Block::default().borders(Borders::ALL).inner(area);
        let (row, col) = self.field.cursor_position();
        let (scroll_rows, scroll_cols) = self.scroll(inner);
        Position::new(
            inner.x + (col as u16).saturating_sub(scroll_cols),
            inner.y + (row as u16).saturating_sub(scroll_rows),
        )
    }
}

impl Widget for FieldWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_color = if self.disabled {
            Color::DarkGray
        } else if self.focused {
            Color::Cyan
        } else {
            Color::Gray
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", self.label))
            .border_style(Style::default().fg(border_color));
        let inner = block.inner(area);

        let text_style = if self.disabled {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };
        Paragraph::new(self.field.text())
            .style(text_style)
            .scroll(self.scroll(inner))
            .block(block)
            .render(area, buf);
    }
}

/// The classify button, greyed out when it cannot fire
pub struct ClassifyButtonWidget {
    enabled: bool,
    busy: bool,
    focused: bool,
}

impl ClassifyButtonWidget {
    pub fn new(enabled: bool, busy: bool, focused: bool) -> Self {
        Self {
            enabled,
            busy,
            focused,
        }
    }

    pub fn label(&self) -> &'static str {
        if self.busy {
            "[ ⏳ Classifying... ]"
        } else {
            "[ ✨ Classify Email ]"
        }
    }
}

impl Widget for ClassifyButtonWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut style = if self.enabled {
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        if self.focused {
            style = style.add_modifier(Modifier::REVERSED);
        }
        let line = Line::from(Span::styled(self.label(), style));
        buf.set_line(area.x, area.y, &line, area.width);
    }
}

/// Inline error or the transient classification result
pub struct StatusWidget<'a> {
    error: Option<&'a str>,
    result: Option<&'a ClassificationResult>,
}

impl<'a> StatusWidget<'a> {
    pub fn new(error: Option<&'a str>, result: Option<&'a ClassificationResult>) -> Self {
        Self { error, result }
    }
}

impl Widget for StatusWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines = Vec::new();
        if let Some(error) = self.error {
            lines.push(Line::from(vec![
                Span::styled(
                    "Error: ",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(error, Style::default().fg(Color::Red)),
            ]));
        }
        if let Some(result) = self.result {
            lines.push(Line::from(Span::styled(
                "✨ Classified!",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(vec![
                Span::raw("Moved to: "),
                Span::styled(
                    result.folder.display_name(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]));
            lines.push(Line::from(Span::styled(
                result.reason.as_str(),
                Style::default().fg(Color::Gray),
            )));
        }
        if lines.is_empty() {
            return;
        }
        Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

/// One folder panel with its count and newest-first emails
pub struct FolderPanelWidget<'a> {
    folder: &'a FolderDefinition,
    emails: &'a [EmailRecord],
}

impl<'a> FolderPanelWidget<'a> {
    pub fn new(folder: &'a FolderDefinition, emails: &'a [EmailRecord]) -> Self {
        Self { folder, emails }
    }
}

impl Widget for FolderPanelWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let accent = Style::default().fg(self.folder.color);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(accent)
            .title(Line::from(Span::styled(
                format!(" {} {} ", self.folder.icon, self.folder.display_name),
                accent.add_modifier(Modifier::BOLD),
            )))
            .title(
                Line::from(Span::styled(
                    format!(" {} ", self.emails.len()),
                    Style::default()
                        .fg(Color::Black)
                        .bg(self.folder.color)
                        .add_modifier(Modifier::BOLD),
                ))
                .right_aligned(),
            );
        let inner = block.inner(area);
        block.render(area, buf);

        if self.emails.is_empty() {
            let y = inner.y + inner.height / 2;
            Paragraph::new("No emails yet")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .render(Rect::new(inner.x, y, inner.width, inner.height.min(1)), buf);
            return;
        }

        let mut lines = Vec::new();
        for email in self.emails {
            lines.push(Line::from(Span::styled(
                email.subject.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            if let Some(body) = &email.body {
                lines.push(Line::from(Span::styled(
                    body_preview(body),
                    Style::default().fg(Color::Gray),
                )));
            }
            lines.push(Line::from(vec![
                Span::styled(format_time(&email.timestamp), Style::default().fg(Color::DarkGray)),
                Span::raw("  "),
                Span::styled(email.reason.as_str(), accent),
            ]));
            lines.push(Line::default());
        }
        Paragraph::new(Text::from(lines)).render(inner, buf);
    }
}
