//! Markdown → ratatui `Text` renderer for note bodies.
//!
//! Walks `pulldown_cmark` events and builds styled `Line`s. Covers what
//! daily notes tend to contain: headings, emphasis, task lists, nested
//! lists, quotes, links, simple tables and fenced code (highlighted with
//! syntect when the language is known).

use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;
use thiserror::Error;
use unicode_width::UnicodeWidthStr;

use crate::tui::theme::Palette;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

const TAB: &str = "    ";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("syntax highlighting failed: {0}")]
    Highlight(#[from] syntect::Error),
}

/// Render `content` with `palette`. Output owns its strings.
pub fn render(content: &str, palette: &Palette) -> Result<Text<'static>, RenderError> {
    let opts = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS | Options::ENABLE_TABLES;
    let mut renderer = MarkdownRenderer::new(palette);
    for event in Parser::new_ext(content, opts) {
        renderer.event(event)?;
    }
    Ok(renderer.finish())
}

/// Current fenced code block, if any.
enum CodeBlock {
    Highlighted(HighlightLines<'static>),
    Plain,
}

struct ListLevel {
    /// Next ordinal for ordered lists, `None` for bullets.
    next: Option<u64>,
    /// The open item pushed a task-list style.
    task_style: bool,
    /// The open item's marker line already holds a paragraph or sublist.
    item_has_text: bool,
}

struct MarkdownRenderer<'p> {
    palette: &'p Palette,
    lines: Vec<Line<'static>>,
    /// Composed inline styles; the top is applied to text.
    style_stack: Vec<Style>,
    /// Spans prepended to every new line (quote bars, code gutters).
    gutters: Vec<Span<'static>>,
    lists: Vec<ListLevel>,
    code: Option<CodeBlock>,
    /// Destinations of open links/images, shown after their text.
    pending_urls: Vec<String>,
    /// A blank line goes before the next block.
    spacing: bool,
    table_cell: usize,
}

impl<'p> MarkdownRenderer<'p> {
    fn new(palette: &'p Palette) -> Self {
        Self {
            palette,
            lines: Vec::new(),
            style_stack: Vec::new(),
            gutters: Vec::new(),
            lists: Vec::new(),
            code: None,
            pending_urls: Vec::new(),
            spacing: false,
            table_cell: 0,
        }
    }

    fn finish(self) -> Text<'static> {
        Text::from(self.lines)
    }

    fn current_style(&self) -> Style {
        self.style_stack
            .last()
            .copied()
            .unwrap_or_else(|| Style::default().fg(self.palette.body))
    }

    fn with_style(&mut self, overlay: Style) {
        let composed = self.current_style().patch(overlay);
        self.style_stack.push(composed);
    }

    fn muted(&self) -> Style {
        Style::default().fg(self.palette.muted)
    }

    fn new_line(&mut self, spans: Vec<Span<'static>>) {
        let mut all = self.gutters.clone();
        all.extend(spans);
        self.lines.push(Line::from(all));
    }

    fn append(&mut self, span: Span<'static>) {
        match self.lines.last_mut() {
            Some(line) => line.spans.push(span),
            None => self.new_line(vec![span]),
        }
    }

    fn begin_block(&mut self) {
        if self.spacing {
            self.new_line(Vec::new());
            self.spacing = false;
        }
    }

    fn event(&mut self, event: Event<'_>) -> Result<(), RenderError> {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => return self.text(text),
            Event::Code(code) => {
                let style = Style::default()
                    .fg(self.palette.code_fg)
                    .bg(self.palette.code_bg);
                self.append(Span::styled(format!(" {code} "), style));
            }
            Event::SoftBreak => self.append(Span::raw(" ")),
            Event::HardBreak => self.new_line(Vec::new()),
            Event::Rule => {
                self.begin_block();
                self.new_line(vec![Span::styled("─".repeat(40), self.muted())]);
                self.spacing = true;
            }
            Event::TaskListMarker(done) => {
                // Replace the bullet pushed by Tag::Item with a checkbox
                if let Some(line) = self.lines.last_mut()
                    && let Some(bullet) = line.spans.last_mut()
                {
                    let indent = bullet
                        .content
                        .strip_suffix("- ")
                        .unwrap_or(&bullet.content)
                        .to_string();
                    let mark = if done { "☑ " } else { "☐ " };
                    *bullet = Span::styled(format!("{indent}{mark}"), bullet.style);
                }
                let overlay = if done {
                    Style::default().add_modifier(Modifier::DIM | Modifier::CROSSED_OUT)
                } else {
                    Style::default()
                };
                self.with_style(overlay);
                if let Some(level) = self.lists.last_mut() {
                    level.task_style = true;
                }
            }
            Event::Html(html) => {
                let style = self.muted().add_modifier(Modifier::DIM);
                for part in html.lines() {
                    self.new_line(vec![Span::styled(part.to_string(), style)]);
                }
            }
            Event::InlineHtml(html) => {
                let style = self.muted().add_modifier(Modifier::DIM);
                self.append(Span::styled(html.to_string(), style));
            }
            _ => {}
        }
        Ok(())
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => match self.lists.last() {
                None => {
                    self.begin_block();
                    self.new_line(Vec::new());
                }
                // Continuation paragraph: own line, aligned with the item text
                Some(level) if level.item_has_text => {
                    let indent = "  ".repeat(self.lists.len());
                    self.new_line(vec![Span::raw(indent)]);
                }
                Some(_) => {}
            },
            Tag::Heading { level, .. } => {
                self.begin_block();
                self.new_line(Vec::new());
                let style = self.heading_style(level);
                self.with_style(style);
            }
            Tag::BlockQuote(_) => {
                self.begin_block();
                self.gutters.push(Span::styled("▌ ", self.muted()));
                self.with_style(Style::default().add_modifier(Modifier::ITALIC));
            }
            Tag::CodeBlock(kind) => {
                self.begin_block();
                let lang = match &kind {
                    CodeBlockKind::Fenced(info) => info.split_whitespace().next().unwrap_or(""),
                    CodeBlockKind::Indented => "",
                };
                let border = self.muted();
                let mut top = vec![Span::styled("┌─", border)];
                if !lang.is_empty() {
                    top.push(Span::styled(format!(" {lang} "), border.add_modifier(Modifier::BOLD)));
                }
                self.new_line(top);
                self.gutters.push(Span::styled("│ ", border));

                let syntax = (!lang.is_empty())
                    .then(|| SYNTAX_SET.find_syntax_by_token(lang))
                    .flatten();
                self.code = Some(match (syntax, THEME_SET.themes.get(self.palette.syntax_theme)) {
                    (Some(syntax), Some(theme)) => {
                        CodeBlock::Highlighted(HighlightLines::new(syntax, theme))
                    }
                    _ => CodeBlock::Plain,
                });
            }
            Tag::List(start) => {
                match self.lists.last_mut() {
                    Some(parent) => parent.item_has_text = true,
                    None => self.begin_block(),
                }
                self.lists.push(ListLevel {
                    next: start,
                    task_style: false,
                    item_has_text: false,
                });
            }
            Tag::Item => {
                let indent = "  ".repeat(self.lists.len().saturating_sub(1));
                if let Some(level) = self.lists.last_mut() {
                    level.item_has_text = false;
                }
                let marker = match self.lists.last_mut() {
                    Some(ListLevel { next: Some(n), .. }) => {
                        let marker = format!("{indent}{n}. ");
                        *n += 1;
                        marker
                    }
                    _ => format!("{indent}- "),
                };
                let style = self.muted();
                self.new_line(vec![Span::styled(marker, style)]);
            }
            Tag::Emphasis => self.with_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.with_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.with_style(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::Link { dest_url, .. } => {
                self.pending_urls.push(dest_url.to_string());
                self.with_style(
                    Style::default()
                        .fg(self.palette.accent)
                        .add_modifier(Modifier::UNDERLINED),
                );
            }
            Tag::Image { dest_url, .. } => {
                self.pending_urls.push(dest_url.to_string());
                self.append(Span::styled("[image] ", self.muted()));
                self.with_style(Style::default().add_modifier(Modifier::ITALIC));
            }
            Tag::Table(_) => {
                self.begin_block();
            }
            Tag::TableHead | Tag::TableRow => {
                self.table_cell = 0;
                self.new_line(Vec::new());
            }
            Tag::TableCell => {
                if self.table_cell > 0 {
                    self.append(Span::styled(" │ ", self.muted()));
                }
                self.table_cell += 1;
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => match self.lists.last_mut() {
                Some(level) => level.item_has_text = true,
                None => self.spacing = true,
            },
            TagEnd::Heading(level) => {
                self.style_stack.pop();
                if level == HeadingLevel::H1 {
                    let width = self.lines.last().map(Line::width).unwrap_or(0).max(3);
                    let style = Style::default().fg(self.palette.heading);
                    self.new_line(vec![Span::styled("═".repeat(width), style)]);
                }
                self.spacing = true;
            }
            TagEnd::BlockQuote(_) => {
                self.gutters.pop();
                self.style_stack.pop();
                self.spacing = true;
            }
            TagEnd::CodeBlock => {
                self.code = None;
                self.gutters.pop();
                let border = self.muted();
                self.new_line(vec![Span::styled("└─", border)]);
                self.spacing = true;
            }
            TagEnd::List(_) => {
                self.lists.pop();
                if self.lists.is_empty() {
                    self.spacing = true;
                }
            }
            TagEnd::Item => {
                if let Some(level) = self.lists.last_mut()
                    && level.task_style
                {
                    level.task_style = false;
                    self.style_stack.pop();
                }
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => {
                self.style_stack.pop();
            }
            TagEnd::Link | TagEnd::Image => {
                self.style_stack.pop();
                if let Some(url) = self.pending_urls.pop()
                    && !url.is_empty()
                {
                    let style = self.muted();
                    self.append(Span::styled(format!(" <{url}>"), style));
                }
            }
            TagEnd::TableHead => {
                let width = self.lines.last().map(Line::width).unwrap_or(0);
                let style = self.muted();
                self.new_line(vec![Span::styled("─".repeat(width.max(3)), style)]);
            }
            TagEnd::Table => self.spacing = true,
            _ => {}
        }
    }

    fn text(&mut self, text: CowStr<'_>) -> Result<(), RenderError> {
        let text = text.replace('\t', TAB);

        match self.code.take() {
            Some(CodeBlock::Highlighted(mut highlighter)) => {
                let result = self.highlighted_lines(&mut highlighter, &text);
                self.code = Some(CodeBlock::Highlighted(highlighter));
                result
            }
            Some(CodeBlock::Plain) => {
                let style = Style::default().fg(self.palette.code_fg);
                for line in text.lines() {
                    self.new_line(vec![Span::styled(line.to_string(), style)]);
                }
                self.code = Some(CodeBlock::Plain);
                Ok(())
            }
            None => {
                let style = self.current_style();
                self.append(Span::styled(text, style));
                Ok(())
            }
        }
    }

    fn highlighted_lines(
        &mut self,
        highlighter: &mut HighlightLines<'static>,
        text: &str,
    ) -> Result<(), RenderError> {
        for line in LinesWithEndings::from(text) {
            let ranges = highlighter.highlight_line(line, &SYNTAX_SET)?;
            let spans = ranges
                .into_iter()
                .map(|(style, fragment)| {
                    let fg = style.foreground;
                    Span::styled(
                        fragment.trim_end_matches(['\n', '\r']).to_string(),
                        Style::default().fg(Color::Rgb(fg.r, fg.g, fg.b)),
                    )
                })
                .filter(|span| span.content.width() > 0)
                .collect();
            self.new_line(spans);
        }
        Ok(())
    }

    fn heading_style(&self, level: HeadingLevel) -> Style {
        let base = Style::default().fg(self.palette.heading);
        match level {
            HeadingLevel::H1 => base.add_modifier(Modifier::BOLD),
            HeadingLevel::H2 => base.add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            HeadingLevel::H3 => base.add_modifier(Modifier::BOLD),
            _ => base.add_modifier(Modifier::ITALIC),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Theme;

    fn palette() -> Palette {
        Palette::for_theme(Theme::Dark)
    }

    fn plain_lines(text: &Text<'_>) -> Vec<String> {
        text.lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_empty_content_renders_nothing() {
        let text = render("", &palette()).unwrap();
        assert!(text.lines.is_empty());
    }

    #[test]
    fn test_plain_text_uses_body_colour() {
        let text = render("hello", &palette()).unwrap();
        let span = &text.lines[0].spans[0];
        assert_eq!(span.content, "hello");
        assert_eq!(span.style.fg, Some(palette().body));
    }

    #[test]
    fn test_h1_is_underlined_with_rule() {
        let text = render("# Standup", &palette()).unwrap();
        let lines = plain_lines(&text);
        assert_eq!(lines[0], "Standup");
        assert_eq!(lines[1], "═══════");
        let heading = &text.lines[0].spans[0];
        assert!(heading.style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(heading.style.fg, Some(palette().heading));
    }

    #[test]
    fn test_bold_inside_paragraph() {
        let text = render("Some **bold** text", &palette()).unwrap();
        let bold = text.lines[0].spans.iter().find(|s| s.content == "bold").unwrap();
        assert!(bold.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_task_list_uses_checkboxes() {
        let text = render("- [ ] call mum\n- [x] pay rent", &palette()).unwrap();
        let lines = plain_lines(&text);
        assert_eq!(lines, vec!["☐ call mum", "☑ pay rent"]);
        let done = text.lines[1].spans.iter().find(|s| s.content == "pay rent").unwrap();
        assert!(done.style.add_modifier.contains(Modifier::CROSSED_OUT));
        let open = text.lines[0].spans.iter().find(|s| s.content == "call mum").unwrap();
        assert!(!open.style.add_modifier.contains(Modifier::CROSSED_OUT));
    }

    #[test]
    fn test_nested_and_ordered_lists() {
        let text = render("1. one\n2. two\n   - inner\n3. three", &palette()).unwrap();
        let lines = plain_lines(&text);
        assert_eq!(lines, vec!["1. one", "2. two", "  - inner", "3. three"]);
    }

    #[test]
    fn test_loose_item_continuation_gets_own_line() {
        let text = render("- first\n\n  second\n", &palette()).unwrap();
        assert_eq!(plain_lines(&text), vec!["- first", "  second"]);
    }

    #[test]
    fn test_paragraph_after_sublist_stays_in_item() {
        let text = render("- outer\n\n  - inner\n\n  after\n", &palette()).unwrap();
        let lines = plain_lines(&text);
        assert_eq!(lines.first().map(String::as_str), Some("- outer"));
        assert!(lines.contains(&"  - inner".to_string()), "{lines:?}");
        assert_eq!(lines.last().map(String::as_str), Some("  after"));
        assert!(lines.iter().all(|l| !l.contains("innerafter")));
    }

    #[test]
    fn test_paragraphs_separated_by_blank_line() {
        let text = render("first\n\nsecond", &palette()).unwrap();
        assert_eq!(plain_lines(&text), vec!["first", "", "second"]);
    }

    #[test]
    fn test_link_shows_destination() {
        let text = render("[docs](https://example.com)", &palette()).unwrap();
        assert_eq!(plain_lines(&text), vec!["docs <https://example.com>"]);
        let link = &text.lines[0].spans[0];
        assert!(link.style.add_modifier.contains(Modifier::UNDERLINED));
    }

    #[test]
    fn test_blockquote_has_gutter() {
        let text = render("> careful", &palette()).unwrap();
        let lines = plain_lines(&text);
        assert_eq!(lines, vec!["▌ careful"]);
    }

    #[test]
    fn test_plain_code_block_framed() {
        let text = render("```\nline1\n\tline2\n```", &palette()).unwrap();
        let lines = plain_lines(&text);
        assert_eq!(lines[0], "┌─");
        assert_eq!(lines[1], "│ line1");
        assert_eq!(lines[2], "│     line2");
        assert_eq!(lines.last().unwrap(), "└─");
    }

    #[test]
    fn test_highlighted_code_block_keeps_text() {
        let text = render("```rust\nlet x = 1;\n```", &palette()).unwrap();
        let lines = plain_lines(&text);
        assert_eq!(lines[0], "┌─ rust ");
        assert_eq!(lines[1], "│ let x = 1;");
        // Highlighted spans carry RGB colours from the syntect theme
        assert!(text.lines[1].spans[1..].iter().all(|s| matches!(s.style.fg, Some(Color::Rgb(..)))));
    }

    #[test]
    fn test_table_rows() {
        let text = render("| a | b |\n|---|---|\n| 1 | 2 |", &palette()).unwrap();
        let lines = plain_lines(&text);
        assert_eq!(lines[0], "a │ b");
        assert!(lines[1].starts_with('─'));
        assert_eq!(lines[2], "1 │ 2");
    }
}
