use crate::constants::{SPINNER_FRAMES, TYPING_LABEL};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Spinner for the transient "typing" row shown while a reply is pending.
#[derive(Debug, Default)]
pub struct StatusIndicator {
    spinner_idx: usize,
}

impl StatusIndicator {
    pub fn new() -> Self {
        Self { spinner_idx: 0 }
    }

    pub fn update_spinner(&mut self) {
        self.spinner_idx = self.spinner_idx.wrapping_add(1);
    }

    pub fn frame(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_idx % SPINNER_FRAMES.len()]
    }

    pub fn typing_line(&self) -> Line<'static> {
        Line::from(vec![
            Span::styled(self.frame(), Style::default().fg(Color::Gray)),
            Span::raw(" "),
            Span::styled(
                TYPING_LABEL,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_cycles() {
        let mut indicator = StatusIndicator::new();
        let first = indicator.frame();
        for _ in 0..SPINNER_FRAMES.len() {
            indicator.update_spinner();
        }
        assert_eq!(indicator.frame(), first);
        indicator.update_spinner();
        assert_ne!(indicator.frame(), first);
    }

    #[test]
    fn test_typing_line_text() {
        let line = StatusIndicator::new().typing_line();
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, format!("{} {}", SPINNER_FRAMES[0], TYPING_LABEL));
    }
}
