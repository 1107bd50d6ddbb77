use crate::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

/// Draws the footer with key hints for the current state.
pub fn draw_footer(f: &mut Frame<'_>, area: Rect, app: &App) {
    let instructions = if app.view.is_in_flight() {
        "Waiting for a reply. PgUp/PgDn to scroll, Esc to quit."
    } else {
        "Enter to send. PgUp/PgDn to scroll, Esc to quit."
    };

    let footer = Paragraph::new(instructions)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);

    f.render_widget(footer, area);
}
