use crate::constants::{AVATAR_ICON, BUBBLE_WIDTH_PERCENT};
use crate::conversation::{Message, Sender};
use crate::highlight::CodeHighlighter;
use crate::markdown::{render_markdown, wrap_line};
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

const USER_BUBBLE: Style = Style::new().fg(Color::White).bg(Color::Rgb(0, 123, 255));
const BOT_GUTTER: &str = "│ ";

/// Width available to one bubble inside a message body of `width` columns.
pub fn bubble_width(width: u16) -> usize {
    ((width as usize) * BUBBLE_WIDTH_PERCENT as usize / 100).max(8)
}

/// Turns one message into display lines for a body `width` columns wide.
pub fn render_message(
    message: &Message,
    width: u16,
    highlighter: &dyn CodeHighlighter,
    bot_name: &str,
) -> Vec<Line<'static>> {
    match message.sender() {
        Sender::User => render_user(message.text(), width),
        Sender::Bot => render_bot(message.text(), width, highlighter, bot_name),
    }
}

fn render_user(text: &str, width: u16) -> Vec<Line<'static>> {
    let inner = bubble_width(width).saturating_sub(2).max(1);
    let mut lines = vec![Line::from(Span::styled(
        "You",
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM),
    ))
    .alignment(Alignment::Right)];

    for wrapped in wrap(text, inner) {
        lines.push(
            Line::from(Span::styled(format!(" {} ", wrapped), USER_BUBBLE))
                .alignment(Alignment::Right),
        );
    }
    lines
}

fn render_bot(
    text: &str,
    width: u16,
    highlighter: &dyn CodeHighlighter,
    bot_name: &str,
) -> Vec<Line<'static>> {
    let gutter_style = Style::default().fg(Color::Rgb(144, 238, 144));
    let inner = bubble_width(width).saturating_sub(BOT_GUTTER.width()).max(1);

    let mut lines = vec![Line::from(Span::styled(
        format!("{} {}", AVATAR_ICON, bot_name),
        gutter_style.add_modifier(Modifier::BOLD),
    ))];

    for line in render_markdown(text, highlighter) {
        for wrapped in wrap_line(&line, inner) {
            let mut spans = vec![Span::styled(BOT_GUTTER, gutter_style)];
            spans.extend(wrapped.spans);
            lines.push(Line::from(spans));
        }
    }
    lines
}

/// Rendered lines per message for one body width.
///
/// The conversation only grows, so messages are rendered once and reused
/// until the width changes.
#[derive(Debug, Default)]
pub struct RenderCache {
    width: u16,
    rendered: Vec<Vec<Line<'static>>>,
}

impl RenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        messages: &[Message],
        width: u16,
        highlighter: &dyn CodeHighlighter,
        bot_name: &str,
    ) -> &[Vec<Line<'static>>] {
        if width != self.width || self.rendered.len() > messages.len() {
            self.width = width;
            self.rendered.clear();
        }
        for message in &messages[self.rendered.len()..] {
            self.rendered
                .push(render_message(message, width, highlighter, bot_name));
        }
        &self.rendered
    }
}
