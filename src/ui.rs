// src/ui.rs

pub mod chat;
pub mod footer;
pub mod header;

use crate::app::App;
use crate::constants::{HEADER_HEIGHT, INPUT_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

/// Renders the whole screen: header, messages, status, input, footer.
pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(1),
        ])
        .split(f.area());

    header::draw_header(f, chunks[0]);
    chat::draw_messages(f, chunks[1], app);
    app.status_indicator.render(f, chunks[2]);
    chat::draw_input(f, chunks[3], app);
    footer::draw_footer(f, chunks[4], app);
}
