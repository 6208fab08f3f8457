use crate::highlight::CodeHighlighter;
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use std::ops::Range;
use textwrap::{core::break_words, wrap_algorithms::wrap_first_fit, WordSeparator};

pub const INLINE_CODE_STYLE: Style = Style::new()
    .fg(Color::Rgb(209, 154, 102))
    .bg(Color::Rgb(40, 44, 52));
pub const CODE_BLOCK_STYLE: Style = Style::new().fg(Color::Rgb(209, 154, 102));
const CODE_GUTTER: &str = "▎ ";
const QUOTE_GUTTER: &str = "┃ ";

struct CodeBlock {
    language: Option<String>,
    text: String,
}

/// Streams pulldown-cmark events into styled lines.
struct MarkdownWriter<'h> {
    highlighter: &'h dyn CodeHighlighter,
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    styles: Vec<Style>,
    lists: Vec<Option<u64>>,
    quote_depth: usize,
    code_block: Option<CodeBlock>,
    links: Vec<(String, usize)>,
}

impl<'h> MarkdownWriter<'h> {
    fn new(highlighter: &'h dyn CodeHighlighter) -> Self {
        Self {
            highlighter,
            lines: Vec::new(),
            spans: Vec::new(),
            styles: vec![Style::default()],
            lists: Vec::new(),
            quote_depth: 0,
            code_block: None,
            links: Vec::new(),
        }
    }

    fn style(&self) -> Style {
        self.styles.last().copied().unwrap_or_default()
    }

    fn push_style(&mut self, modifier: impl FnOnce(Style) -> Style) {
        let style = modifier(self.style());
        self.styles.push(style);
    }

    fn pop_style(&mut self) {
        if self.styles.len() > 1 {
            self.styles.pop();
        }
    }

    fn push_line(&mut self, mut spans: Vec<Span<'static>>) {
        if self.quote_depth > 0 {
            let gutter = Span::styled(
                QUOTE_GUTTER.repeat(self.quote_depth),
                Style::default().fg(Color::DarkGray),
            );
            spans.insert(0, gutter);
        }
        self.lines.push(Line::from(spans));
    }

    fn flush(&mut self) {
        if !self.spans.is_empty() {
            let spans = std::mem::take(&mut self.spans);
            self.push_line(spans);
        }
    }

    fn blank(&mut self) {
        self.flush();
        let last_is_blank = self.lines.last().map(|l| l.width() == 0).unwrap_or(true);
        if !last_is_blank {
            self.lines.push(Line::default());
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(block) = self.code_block.as_mut() {
            block.text.push_str(text);
            return;
        }
        let style = self.style();
        self.spans.push(Span::styled(text.to_string(), style));
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => {
                self.flush();
                let modifier = if level == HeadingLevel::H1 {
                    Modifier::BOLD | Modifier::UNDERLINED
                } else {
                    Modifier::BOLD
                };
                self.push_style(|s| s.add_modifier(modifier));
            }
            Tag::BlockQuote { .. } => {
                self.flush();
                self.quote_depth += 1;
                self.push_style(|s| s.add_modifier(Modifier::ITALIC));
            }
            Tag::List(start) => {
                self.flush();
                self.lists.push(start);
            }
            Tag::Item => {
                self.flush();
                let depth = self.lists.len().saturating_sub(1);
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{}. ", n);
                        *n += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                self.spans.push(Span::styled(
                    format!("{}{}", "  ".repeat(depth), marker),
                    Style::default().fg(Color::Cyan),
                ));
            }
            Tag::CodeBlock(kind) => {
                self.flush();
                let language = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .map(str::to_string),
                    CodeBlockKind::Indented => None,
                };
                self.code_block = Some(CodeBlock {
                    language,
                    text: String::new(),
                });
            }
            Tag::Emphasis => self.push_style(|s| s.add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(|s| s.add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => self.push_style(|s| s.add_modifier(Modifier::CROSSED_OUT)),
            Tag::Link { dest_url, .. } | Tag::Image { dest_url, .. } => {
                self.links.push((dest_url.to_string(), self.spans.len()));
                self.push_style(|s| s.fg(Color::LightBlue).add_modifier(Modifier::UNDERLINED));
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.blank(),
            TagEnd::Heading(_) => {
                self.pop_style();
                self.blank();
            }
            TagEnd::BlockQuote { .. } => {
                self.flush();
                self.pop_style();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.blank();
            }
            TagEnd::List(_) => {
                self.flush();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.blank();
                }
            }
            TagEnd::Item => self.flush(),
            TagEnd::CodeBlock => {
                if let Some(block) = self.code_block.take() {
                    self.emit_code_block(block);
                }
                self.blank();
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => self.pop_style(),
            TagEnd::Link | TagEnd::Image => {
                self.pop_style();
                if let Some((dest, first_span)) = self.links.pop() {
                    let label: String = self.spans[first_span.min(self.spans.len())..]
                        .iter()
                        .map(|s| s.content.as_ref())
                        .collect();
                    if !dest.is_empty() && label != dest {
                        self.spans.push(Span::styled(
                            format!(" <{}>", dest),
                            Style::default().fg(Color::DarkGray),
                        ));
                    }
                }
            }
            _ => {}
        }
    }

    fn emit_code_block(&mut self, block: CodeBlock) {
        let code = block.text.strip_suffix('\n').unwrap_or(&block.text);
        let highlighted = block
            .language
            .as_deref()
            .and_then(|language| self.highlighter.highlight(language, code));

        if let Some(language) = block.language.as_deref() {
            self.push_line(vec![Span::styled(
                language.to_string(),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )]);
        }

        let body = highlighted.unwrap_or_else(|| {
            code.split('\n')
                .map(|l| Line::from(Span::styled(l.to_string(), CODE_BLOCK_STYLE)))
                .collect()
        });

        for line in body {
            let mut spans = vec![Span::styled(CODE_GUTTER, Style::default().fg(Color::DarkGray))];
            spans.extend(line.spans);
            self.push_line(spans);
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush();
        while self.lines.last().map(|l| l.width() == 0).unwrap_or(false) {
            self.lines.pop();
        }
        self.lines
    }
}

/// Renders bot Markdown into unwrapped terminal lines.
///
/// Fenced code blocks with a language tag go through `highlighter`; every
/// other code (untagged fences, indented blocks, inline spans) is drawn in a
/// flat code style.
pub fn render_markdown(text: &str, highlighter: &dyn CodeHighlighter) -> Vec<Line<'static>> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut writer = MarkdownWriter::new(highlighter);
    for event in Parser::new_ext(text, options) {
        match event {
            Event::Start(tag) => writer.start(tag),
            Event::End(tag) => writer.end(tag),
            Event::Text(text) => writer.text(&text),
            Event::Code(code) => writer
                .spans
                .push(Span::styled(code.to_string(), INLINE_CODE_STYLE)),
            Event::Html(html) | Event::InlineHtml(html) => writer.text(&html),
            Event::SoftBreak => writer.text(" "),
            Event::HardBreak => writer.flush(),
            Event::Rule => {
                writer.flush();
                writer.push_line(vec![Span::styled(
                    "─".repeat(24),
                    Style::default().fg(Color::DarkGray),
                )]);
                writer.blank();
            }
            Event::TaskListMarker(checked) => {
                writer.text(if checked { "[x] " } else { "[ ] " });
            }
            _ => {}
        }
    }
    writer.finish()
}

/// First-fit word wrap that keeps span styles and line alignment.
///
/// The plain text is wrapped with `textwrap` and each resulting line is cut
/// back out of the original spans by byte offset.
pub fn wrap_line(line: &Line<'static>, width: usize) -> Vec<Line<'static>> {
    if width == 0 || line.width() <= width {
        return vec![line.clone()];
    }

    let plain: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
    let words = break_words(WordSeparator::AsciiSpace.find_words(&plain), width);

    let mut offsets = Vec::with_capacity(words.len());
    let mut offset = 0;
    for word in &words {
        offsets.push(offset);
        offset += word.word.len() + word.whitespace.len();
    }

    let mut out = Vec::new();
    let mut first = 0;
    for row in wrap_first_fit(&words, &[width as f64]) {
        let last = first + row.len() - 1;
        let range = offsets[first]..offsets[last] + words[last].word.len();
        let mut wrapped = Line::from(slice_spans(&line.spans, range));
        wrapped.alignment = line.alignment;
        out.push(wrapped);
        first = last + 1;
    }
    out
}

fn slice_spans(spans: &[Span<'static>], range: Range<usize>) -> Vec<Span<'static>> {
    let mut out = Vec::new();
    let mut start = 0;
    for span in spans {
        let end = start + span.content.len();
        let from = range.start.max(start);
        let to = range.end.min(end);
        if from < to {
            out.push(Span::styled(
                span.content[from - start..to - start].to_string(),
                span.style,
            ));
        }
        start = end;
    }
    out
}
