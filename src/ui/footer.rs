use crate::config::QuickReply;
use crate::constants::{INPUT_PLACEHOLDER, MORE_ICON, SEND_ICON};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Draws the quick-reply row starting at button `first` and returns each
/// visible button's index and area. A `…` marks buttons scrolled off either
/// end of the row.
pub fn draw_quick_replies(
    f: &mut Frame<'_>,
    area: Rect,
    replies: &[QuickReply],
    first: usize,
) -> Vec<(usize, Rect)> {
    if area.height == 0 || replies.is_empty() {
        return Vec::new();
    }

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::DarkGray));
    let row = block.inner(area);
    f.render_widget(block, area);

    let button_style = Style::default().fg(Color::Black).bg(Color::Rgb(241, 241, 241));
    let key_style = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::DIM);
    let more_style = Style::default().fg(Color::DarkGray);
    let marker_width = MORE_ICON.width() as u16 + 1;

    let first = first.min(replies.len() - 1);
    let mut spans = Vec::new();
    let mut buttons = Vec::new();
    let mut x = row.x;
    if first > 0 {
        spans.push(Span::styled(format!("{} ", MORE_ICON), more_style));
        x += marker_width;
    }

    for (idx, reply) in replies.iter().enumerate().skip(first) {
        let key = format!("F{} ", idx + 1);
        let label = format!(" {} {} ", reply.icon, reply.label);
        let width = (key.width() + label.width()) as u16;
        let reserved = if idx + 1 < replies.len() { marker_width } else { 0 };
        if x + width + reserved > row.right() {
            spans.push(Span::styled(MORE_ICON, more_style));
            break;
        }

        buttons.push((
            idx,
            Rect {
                x,
                y: row.y,
                width,
                height: 1,
            },
        ));
        spans.push(Span::styled(key, key_style));
        spans.push(Span::styled(label, button_style));
        spans.push(Span::raw(" "));
        x += width + 1;
    }

    f.render_widget(Paragraph::new(Line::from(spans)), row);
    buttons
}

/// Draws the input line with its send button, places the cursor, and
/// returns the send button area.
pub fn draw_input(f: &mut Frame<'_>, area: Rect, input: &str) -> Rect {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::DarkGray));
    let row = block.inner(area);
    f.render_widget(block, area);

    let send = Rect {
        x: row.right().saturating_sub(3).max(row.x),
        y: row.y,
        width: 3.min(row.width),
        height: row.height.min(1),
    };
    let field_width = send.x.saturating_sub(row.x + 2) as usize;

    let line = if input.is_empty() {
        Line::from(vec![
            Span::styled("→ ", Style::default().fg(Color::DarkGray)),
            Span::styled(INPUT_PLACEHOLDER, Style::default().fg(Color::DarkGray)),
        ])
    } else {
        Line::from(vec![
            Span::styled("→ ", Style::default().fg(Color::DarkGray)),
            Span::styled(visible_tail(input, field_width), Style::default().fg(Color::White)),
        ])
    };
    f.render_widget(Paragraph::new(line), row);
    f.render_widget(
        Paragraph::new(SEND_ICON).style(Style::default().fg(Color::Rgb(0, 123, 255))),
        send,
    );

    let typed = visible_tail(input, field_width).width() as u16;
    f.set_cursor_position((row.x + 2 + typed, row.y));
    send
}

/// The end of `input` that fits in `width` columns.
pub fn visible_tail(input: &str, width: usize) -> String {
    if input.width() <= width {
        return input.to_string();
    }
    let mut tail: Vec<char> = Vec::new();
    let mut used = 0;
    for ch in input.chars().rev() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        tail.push(ch);
    }
    tail.into_iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_visible_tail_keeps_end_of_long_input() {
        assert_eq!(visible_tail("hello", 10), "hello");
        assert_eq!(visible_tail("hello world", 5), "world");
        assert_eq!(visible_tail("ab你好", 4), "你好");
    }

    fn replies(n: usize) -> Vec<QuickReply> {
        (1..=n)
            .map(|i| QuickReply {
                label: format!("Option{}", i),
                icon: "*".to_string(),
            })
            .collect()
    }

    fn draw_row(width: u16, replies: &[QuickReply], first: usize) -> (Vec<(usize, Rect)>, String) {
        let mut terminal = Terminal::new(TestBackend::new(width, 2)).unwrap();
        let mut buttons = Vec::new();
        terminal
            .draw(|f| {
                let area = f.area();
                buttons = draw_quick_replies(f, area, replies, first);
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        let row: String = buffer.content()[width as usize..]
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        (buttons, row)
    }

    #[test]
    fn test_overflowing_quick_replies_show_marker() {
        let (buttons, row) = draw_row(40, &replies(5), 0);
        assert_eq!(buttons.iter().map(|(idx, _)| *idx).collect::<Vec<_>>(), vec![0, 1]);
        assert!(!row.starts_with(MORE_ICON));
        assert!(row.contains(MORE_ICON));
        assert!(buttons.iter().all(|(_, rect)| rect.right() <= 40));
    }

    #[test]
    fn test_scrolled_quick_replies_start_at_offset() {
        let (buttons, row) = draw_row(40, &replies(5), 3);
        assert_eq!(buttons.iter().map(|(idx, _)| *idx).collect::<Vec<_>>(), vec![3, 4]);
        assert!(row.starts_with(MORE_ICON));
        assert!(row.contains("F4"));
        assert!(!row.contains("F1 "));
    }

    #[test]
    fn test_fitting_quick_replies_have_no_marker() {
        let (buttons, row) = draw_row(40, &replies(1), 0);
        assert_eq!(buttons.len(), 1);
        assert!(!row.contains(MORE_ICON));
    }
}
