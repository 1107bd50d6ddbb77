use crate::app::App;
use crate::constants::INPUT_PLACEHOLDER;
use crate::message::{render_pending, Message};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Wrapped lines of the conversation. Messages are immutable and only ever
/// appended, so lines are rendered once per message and rebuilt only when the
/// width changes.
#[derive(Debug, Default)]
pub struct MessageLines {
    width: u16,
    rendered: usize,
    lines: Vec<Line<'static>>,
}

impl MessageLines {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rendered(&self) -> usize {
        self.rendered
    }

    /// Brings the cache up to date with `messages` at `width`.
    pub fn sync(&mut self, messages: &[Message], width: u16) -> &[Line<'static>] {
        if width != self.width || self.rendered > messages.len() {
            self.width = width;
            self.rendered = 0;
            self.lines.clear();
        }

        for message in &messages[self.rendered..] {
            if !self.lines.is_empty() {
                self.lines.push(Line::from(""));
            }
            self.lines.extend(message.render(width));
        }
        self.rendered = messages.len();

        &self.lines
    }
}

/// Draws the conversation, pinned to the newest entry unless the user has
/// scrolled back. Only the visible window is handed to the paragraph.
pub fn draw_messages(f: &mut Frame<'_>, area: Rect, app: &mut App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Chat ")
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let history = app.message_lines.sync(app.view.render_messages(), inner.width);

    let mut pending = Vec::new();
    if app.view.is_in_flight() {
        pending.push(Line::from(""));
        pending.extend(render_pending(app.status_indicator.dots(), inner.width));
    }

    let height = usize::from(inner.height);
    let top = app.view.visible_scroll(history.len() + pending.len(), height);
    let visible: Vec<Line<'static>> = history
        .iter()
        .chain(pending.iter())
        .skip(top)
        .take(height)
        .cloned()
        .collect();

    f.render_widget(Paragraph::new(visible), inner);
}

pub fn draw_input(f: &mut Frame<'_>, area: Rect, app: &App) {
    let waiting = app.view.is_in_flight();
    let (title, border_color) = if waiting {
        (" Waiting for reply ", Color::DarkGray)
    } else {
        (" Message ", Color::Cyan)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let input = app.view.input();
    let line = if input.is_empty() && !waiting {
        Line::from(Span::styled(
            INPUT_PLACEHOLDER,
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let style = if waiting {
            Style::default().fg(Color::Gray).add_modifier(Modifier::DIM)
        } else {
            Style::default().fg(Color::White)
        };
        Line::from(Span::styled(input.to_string(), style))
    };

    // Keep the end of long input in view, leaving a cell for the cursor.
    let visible_width = inner.width.saturating_sub(1);
    let text_width = u16::try_from(input.width()).unwrap_or(u16::MAX);
    let scroll_offset = text_width.saturating_sub(visible_width);

    f.render_widget(Paragraph::new(line).scroll((0, scroll_offset)), inner);

    if !waiting && inner.width > 0 && inner.height > 0 {
        let cursor_x = inner.x + text_width - scroll_offset;
        f.set_cursor_position((cursor_x, inner.y));
    }
}
