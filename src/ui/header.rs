use crate::constants::{AVATAR_ICON, BROKEN_IMAGE_ICON, CLOSE_ICON};
use crate::ui::Chrome;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draws the panel title bar and returns the close button area.
pub fn draw_title(f: &mut Frame<'_>, area: Rect, chrome: &Chrome) -> Rect {
    let bar = Style::default()
        .fg(Color::White)
        .bg(Color::Rgb(0, 123, 255))
        .add_modifier(Modifier::BOLD);

    f.render_widget(
        Paragraph::new(Line::from(Span::raw(format!(" {}", chrome.title)))).style(bar),
        area,
    );

    let close = Rect {
        x: area.right().saturating_sub(3).max(area.x),
        y: area.y,
        width: 3.min(area.width),
        height: 1,
    };
    f.render_widget(
        Paragraph::new(CLOSE_ICON)
            .style(bar)
            .alignment(Alignment::Center),
        close,
    );
    close
}

/// Avatar, bot name and status line. A missing avatar image shows a
/// placeholder with its alt text instead.
pub fn draw_bot_header(f: &mut Frame<'_>, area: Rect, chrome: &Chrome) {
    let avatar = if chrome.avatar_present {
        Span::raw(format!("{} ", AVATAR_ICON))
    } else {
        Span::styled(
            format!("{} {} ", BROKEN_IMAGE_ICON, chrome.avatar_alt),
            Style::default().fg(Color::DarkGray),
        )
    };

    let lines = vec![
        Line::from(vec![
            avatar,
            Span::styled(
                chrome.bot_name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            chrome.bot_status.clone(),
            Style::default().fg(Color::Red),
        )),
    ];

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    f.render_widget(Paragraph::new(lines).block(block), area);
}
