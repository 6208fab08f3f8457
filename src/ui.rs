// src/ui.rs

pub mod chat;
pub mod footer;
pub mod header;
pub mod launcher;

use crate::chat_widget::ChatWidget;
use crate::config::Config;
use crate::constants::{LAUNCHER_HEIGHT, LAUNCHER_WIDTH, PANEL_MAX_WIDTH};
use crate::highlight::CodeHighlighter;
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

/// Static panel decoration taken from the configuration.
#[derive(Debug, Clone)]
pub struct Chrome {
    pub title: String,
    pub bot_name: String,
    pub bot_status: String,
    pub avatar_alt: String,
    pub avatar_present: bool,
}

impl Chrome {
    pub fn from_config(config: &Config) -> Self {
        let avatar_present = config.avatar_path.is_file();
        if !avatar_present {
            log::warn!(
                "avatar {} not found, showing placeholder",
                config.avatar_path.display()
            );
        }
        Chrome {
            title: config.title.clone(),
            bot_name: config.bot_name.clone(),
            bot_status: config.bot_status.clone(),
            avatar_alt: config.avatar_alt.clone(),
            avatar_present,
        }
    }
}

/// Screen regions of the clickable controls from the last frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hitboxes {
    pub launcher: Rect,
    pub close: Option<Rect>,
    pub send: Option<Rect>,
    pub body: Option<Rect>,
    pub quick_reply_row: Option<Rect>,
    /// Visible quick-reply buttons with their index in the configured list.
    pub quick_replies: Vec<(usize, Rect)>,
}

impl Hitboxes {
    pub fn quick_reply_at(&self, x: u16, y: u16) -> Option<usize> {
        self.quick_replies
            .iter()
            .find(|(_, rect)| rect.contains(Position::new(x, y)))
            .map(|(idx, _)| *idx)
    }
}

pub fn launcher_rect(area: Rect) -> Rect {
    let width = LAUNCHER_WIDTH.min(area.width);
    let height = LAUNCHER_HEIGHT.min(area.height);
    Rect {
        x: area.right().saturating_sub(width + 2).max(area.x),
        y: area.bottom().saturating_sub(height + 1).max(area.y),
        width,
        height,
    }
}

pub fn panel_rect(area: Rect, launcher: Rect) -> Rect {
    let width = PANEL_MAX_WIDTH.min(area.width.saturating_sub(4));
    let top = area.y + 1;
    Rect {
        x: area.right().saturating_sub(width + 2).max(area.x),
        y: top,
        width,
        height: launcher.y.saturating_sub(top),
    }
}

pub fn draw(
    f: &mut Frame,
    widget: &mut ChatWidget,
    chrome: &Chrome,
    highlighter: &dyn CodeHighlighter,
) -> Hitboxes {
    let area = f.area();
    draw_backdrop(f, area);

    let launcher = launcher_rect(area);
    launcher::draw_launcher(f, launcher, widget.state().is_open());

    let mut hitboxes = Hitboxes {
        launcher,
        ..Hitboxes::default()
    };

    if !widget.state().is_open() {
        return hitboxes;
    }

    let panel = panel_rect(area, launcher);
    if panel.width < 12 || panel.height < 10 {
        return hitboxes;
    }
    f.render_widget(Clear, panel);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(0, 123, 255)));
    let inner = block.inner(panel);
    f.render_widget(block, panel);

    let quick_reply_height = if widget.quick_replies().is_empty() { 0 } else { 2 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(quick_reply_height),
            Constraint::Length(2),
        ])
        .split(inner);

    hitboxes.close = Some(header::draw_title(f, chunks[0], chrome));
    header::draw_bot_header(f, chunks[1], chrome);
    chat::draw_messages(f, chunks[2], widget, &chrome.bot_name, highlighter);
    hitboxes.body = Some(chunks[2]);
    if quick_reply_height > 0 {
        hitboxes.quick_reply_row = Some(chunks[3]);
    }
    hitboxes.quick_replies = footer::draw_quick_replies(
        f,
        chunks[3],
        widget.quick_replies(),
        widget.quick_reply_offset(),
    );
    hitboxes.send = Some(footer::draw_input(f, chunks[4], widget.state().input()));

    hitboxes
}

fn draw_backdrop(f: &mut Frame, area: Rect) {
    let hint = Line::from(vec![
        Span::styled(
            "hookchat",
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "  Ctrl+T or click the button to chat · Ctrl+Q to quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    f.render_widget(Paragraph::new(hint), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::WebhookClient;
    use crate::config::QuickReply;
    use crate::dispatcher::Dispatcher;
    use crate::session::SessionId;
    use ratatui::{backend::TestBackend, Terminal};
    use tokio::sync::mpsc;

    struct NoHighlight;

    impl CodeHighlighter for NoHighlight {
        fn highlight(&self, _language: &str, _code: &str) -> Option<Vec<Line<'static>>> {
            None
        }
    }

    fn widget() -> ChatWidget {
        let (tx, _rx) = mpsc::unbounded_channel();
        let client = WebhookClient::new("http://localhost", None).unwrap();
        ChatWidget::new(
            Dispatcher::new(client, SessionId::generate()),
            vec![QuickReply {
                label: "Help".to_string(),
                icon: "?".to_string(),
            }],
            tx,
        )
    }

    fn chrome() -> Chrome {
        Chrome {
            title: "Support".to_string(),
            bot_name: "Amin".to_string(),
            bot_status: "Online".to_string(),
            avatar_alt: "Amin avatar".to_string(),
            avatar_present: false,
        }
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_launcher_sits_bottom_right() {
        let area = Rect::new(0, 0, 100, 40);
        let launcher = launcher_rect(area);
        assert_eq!(launcher, Rect::new(92, 36, 6, 3));
        let panel = panel_rect(area, launcher);
        assert_eq!(panel, Rect::new(34, 1, 64, 35));
    }

    #[test]
    fn test_closed_widget_draws_only_launcher() {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        let mut widget = widget();
        let mut hitboxes = Hitboxes::default();
        terminal
            .draw(|f| hitboxes = draw(f, &mut widget, &chrome(), &NoHighlight))
            .unwrap();

        assert!(hitboxes.close.is_none());
        assert!(hitboxes.quick_replies.is_empty());
        assert!(!screen_text(&terminal).contains("Type a message"));
    }

    #[test]
    fn test_open_widget_draws_panel() {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        let mut widget = widget();
        widget.open();
        let mut hitboxes = Hitboxes::default();
        terminal
            .draw(|f| hitboxes = draw(f, &mut widget, &chrome(), &NoHighlight))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Support"));
        assert!(text.contains("Amin avatar"));
        assert!(text.contains("Online"));
        assert!(text.contains("How can I help you today?"));
        assert!(text.contains("Help"));
        assert!(text.contains("Type a message..."));
        assert!(hitboxes.close.is_some());
        assert!(hitboxes.send.is_some());
        assert_eq!(hitboxes.quick_replies.len(), 1);
        let (idx, help) = hitboxes.quick_replies[0];
        assert_eq!(idx, 0);
        assert_eq!(hitboxes.quick_reply_at(help.x, help.y), Some(0));
        assert!(hitboxes.quick_reply_row.is_some());
    }
}
