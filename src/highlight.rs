use lazy_static::lazy_static;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use syntect::{
    easy::HighlightLines,
    highlighting::{FontStyle, Style as SyntectStyle, Theme, ThemeSet},
    parsing::SyntaxSet,
    util::LinesWithEndings,
};

use crate::constants::DEFAULT_CODE_THEME;

lazy_static! {
    static ref SYNTAX_SET: SyntaxSet = SyntaxSet::load_defaults_newlines();
    static ref THEME_SET: ThemeSet = ThemeSet::load_defaults();
}

/// Renders a fenced code block for a given language tag.
///
/// Returns `None` when the language is not recognized, in which case the
/// caller falls back to plain monospace output.
pub trait CodeHighlighter {
    fn highlight(&self, language: &str, code: &str) -> Option<Vec<Line<'static>>>;
}

#[derive(Debug, Clone)]
pub struct SyntectHighlighter {
    theme_name: String,
}

impl SyntectHighlighter {
    pub fn new(theme_name: impl Into<String>) -> Self {
        Self {
            theme_name: theme_name.into(),
        }
    }

    fn theme(&self) -> Option<&'static Theme> {
        THEME_SET
            .themes
            .get(&self.theme_name)
            .or_else(|| THEME_SET.themes.get(DEFAULT_CODE_THEME))
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_THEME)
    }
}

impl CodeHighlighter for SyntectHighlighter {
    fn highlight(&self, language: &str, code: &str) -> Option<Vec<Line<'static>>> {
        let syntax = SYNTAX_SET.find_syntax_by_token(language)?;
        let theme = self.theme()?;
        let mut highlighter = HighlightLines::new(syntax, theme);

        let mut lines = Vec::new();
        for line in LinesWithEndings::from(code) {
            let ranges = match highlighter.highlight_line(line, &SYNTAX_SET) {
                Ok(ranges) => ranges,
                Err(e) => {
                    log::debug!("highlighting {} failed: {}", language, e);
                    return None;
                }
            };

            let spans: Vec<Span<'static>> = ranges
                .into_iter()
                .map(|(style, text)| {
                    Span::styled(text.trim_end_matches('\n').to_string(), to_ratatui_style(style))
                })
                .filter(|span| !span.content.is_empty())
                .collect();
            lines.push(Line::from(spans));
        }
        Some(lines)
    }
}

fn to_ratatui_style(style: SyntectStyle) -> Style {
    let fg = style.foreground;
    let mut out = Style::default().fg(Color::Rgb(fg.r, fg.g, fg.b));
    if style.font_style.contains(FontStyle::BOLD) {
        out = out.add_modifier(Modifier::BOLD);
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        out = out.add_modifier(Modifier::ITALIC);
    }
    if style.font_style.contains(FontStyle::UNDERLINE) {
        out = out.add_modifier(Modifier::UNDERLINED);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_known_language_is_highlighted() {
        let highlighter = SyntectHighlighter::default();
        let lines = highlighter
            .highlight("python", "def f():\n    return 1")
            .expect("python is a default syntax");
        assert_eq!(lines.len(), 2);
        assert_eq!(plain(&lines[0]), "def f():");
        assert_eq!(plain(&lines[1]), "    return 1");
        assert!(lines[0].spans.len() > 1);
    }

    #[test]
    fn test_unknown_language_is_none() {
        let highlighter = SyntectHighlighter::default();
        assert!(highlighter.highlight("not-a-language", "x").is_none());
    }

    #[test]
    fn test_unknown_theme_falls_back_to_default() {
        let highlighter = SyntectHighlighter::new("no such theme");
        assert!(highlighter.highlight("rust", "fn main() {}").is_some());
    }
}
