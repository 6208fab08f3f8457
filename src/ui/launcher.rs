use crate::constants::{CLOSE_ICON, LAUNCHER_ICON};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

/// The floating toggle button.
pub fn draw_launcher(f: &mut Frame<'_>, area: Rect, open: bool) {
    let icon = if open { CLOSE_ICON } else { LAUNCHER_ICON };
    let style = Style::default().fg(Color::White).bg(Color::Rgb(0, 123, 255));

    let button = Paragraph::new(icon)
        .alignment(Alignment::Center)
        .style(style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(style),
        );
    f.render_widget(button, area);
}
