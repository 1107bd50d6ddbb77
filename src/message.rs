use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use textwrap::wrap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    pub fn label(self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Assistant => "Assistant",
        }
    }

    fn style(self) -> Style {
        match self {
            Sender::User => Style::default().fg(Color::Rgb(255, 223, 128)),
            Sender::Assistant => Style::default().fg(Color::Rgb(144, 238, 144)),
        }
    }

    fn indent(self) -> &'static str {
        match self {
            Sender::User => "    ",
            Sender::Assistant => "",
        }
    }
}

/// One turn in the conversation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    sender: Sender,
    text: String,
}

impl Message {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Sender::Assistant, text)
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Renders the message as a bubble wrapped to `width` columns.
    pub fn render(&self, width: u16) -> Vec<Line<'static>> {
        render_bubble(self.sender, &self.text, width, Modifier::empty())
    }
}

/// The placeholder bubble shown while a reply is pending.
pub fn render_pending(dots: &str, width: u16) -> Vec<Line<'static>> {
    render_bubble(Sender::Assistant, dots, width, Modifier::DIM)
}

fn render_bubble(sender: Sender, text: &str, width: u16, modifier: Modifier) -> Vec<Line<'static>> {
    let style = sender.style().add_modifier(modifier);
    let indent = sender.indent();
    let mut lines = Vec::new();

    lines.push(Line::from(vec![
        Span::styled(indent.to_string(), style),
        Span::styled("┌─ ".to_string(), style),
        Span::styled(
            sender.label().to_string(),
            style.add_modifier(Modifier::BOLD),
        ),
    ]));

    let wrap_width = (width as usize)
        .saturating_sub(indent.len() + 2)
        .max(1);
    for wrapped_line in wrap(text, wrap_width) {
        lines.push(Line::from(vec![
            Span::styled(indent.to_string(), style),
            Span::styled("│ ".to_string(), style),
            Span::styled(wrapped_line.into_owned(), style),
        ]));
    }

    lines.push(Line::from(vec![
        Span::styled(indent.to_string(), style),
        Span::styled("╰─".to_string(), style),
    ]));

    lines
}
