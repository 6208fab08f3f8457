use crate::chat_widget::ChatWidget;
use crate::highlight::CodeHighlighter;
use ratatui::{
    layout::Rect,
    text::Line,
    widgets::Paragraph,
    Frame,
};

/// Builds every row of the message body: messages separated by a blank
/// line, plus the typing row while a reply is pending.
pub fn message_lines(
    widget: &mut ChatWidget,
    width: u16,
    bot_name: &str,
    highlighter: &dyn CodeHighlighter,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for rendered in widget.rendered_messages(width, highlighter, bot_name) {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.extend(rendered.iter().cloned());
    }

    if widget.is_pending() {
        lines.push(Line::from(""));
        lines.push(widget.status().typing_line());
    }
    lines
}

pub fn draw_messages(
    f: &mut Frame<'_>,
    area: Rect,
    widget: &mut ChatWidget,
    bot_name: &str,
    highlighter: &dyn CodeHighlighter,
) {
    let lines = message_lines(widget, area.width, bot_name, highlighter);

    let total_lines = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    widget
        .scroll_mut()
        .set_max(total_lines.saturating_sub(area.height));

    let offset = widget.scroll().offset();
    f.render_widget(Paragraph::new(lines).scroll((offset, 0)), area);
}
