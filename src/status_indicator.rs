use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const DOT_FRAMES: [&str; 3] = [".", "..", "..."];
const SPINNER_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Animation state for the "awaiting response" indicator.
#[derive(Debug, Default)]
pub struct StatusIndicator {
    thinking: bool,
    frame_idx: usize,
}

impl StatusIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_thinking(&mut self, thinking: bool) {
        if thinking && !self.thinking {
            self.frame_idx = 0;
        }
        self.thinking = thinking;
    }

    pub fn is_thinking(&self) -> bool {
        self.thinking
    }

    pub fn tick(&mut self) {
        if self.thinking {
            self.frame_idx = self.frame_idx.wrapping_add(1);
        }
    }

    pub fn dots(&self) -> &'static str {
        DOT_FRAMES[self.frame_idx % DOT_FRAMES.len()]
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let line = if self.thinking {
            Line::from(vec![
                Span::styled(
                    SPINNER_FRAMES[self.frame_idx % SPINNER_FRAMES.len()],
                    Style::default().fg(Color::Gray),
                ),
                Span::raw(" "),
                Span::styled("Waiting for the assistant", Style::default().fg(Color::DarkGray)),
            ])
        } else {
            Line::from("")
        };

        frame.render_widget(Paragraph::new(line).alignment(Alignment::Left), area);
    }
}
