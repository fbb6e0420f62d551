//! Generic markdown renderer with pluggable backend.

use std::collections::HashMap;
use std::fmt::Write;
use std::marker::PhantomData;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use crate::backend::RenderBackend;
use crate::code_block::{CodeBlockProcessor, ProcessResult, parse_fence_info};
use crate::state::{CodeBlockState, FootnoteState, ImageState, TableState, escape_html};

/// Result of rendering markdown.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML, not yet sanitized.
    pub html: String,
    /// Warnings reported by code block processors.
    pub warnings: Vec<String>,
}

/// Generic markdown renderer with pluggable backend.
///
/// Uses the [`RenderBackend`] trait for format-specific elements and
/// handles lists, tables, footnotes and inline formatting itself.
///
/// # Code Block Processors
///
/// Fenced blocks with a language tag are offered to the processors added via
/// [`with_processor`](Self::with_processor), in order. The first one
/// returning [`ProcessResult::Inline`] wins.
pub struct MarkdownRenderer<B: RenderBackend> {
    output: String,
    code: CodeBlockState,
    table: TableState,
    image: ImageState,
    footnotes: FootnoteState,
    /// Pending image data (src, title) waiting for alt text.
    pending_image: Option<(String, String)>,
    processors: Vec<Box<dyn CodeBlockProcessor + Send>>,
    pending_attrs: HashMap<String, String>,
    gfm: bool,
    breaks: bool,
    _backend: PhantomData<B>,
}

impl<B: RenderBackend> MarkdownRenderer<B> {
    /// Create a new renderer with extended syntax and line breaks enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(4096),
            code: CodeBlockState::default(),
            table: TableState::default(),
            image: ImageState::default(),
            footnotes: FootnoteState::default(),
            pending_image: None,
            processors: Vec::new(),
            pending_attrs: HashMap::new(),
            gfm: true,
            breaks: true,
            _backend: PhantomData,
        }
    }

    /// Enable or disable extended syntax.
    ///
    /// Enabled by default. When enabled, the parser supports:
    /// - Tables
    /// - Strikethrough (`~~text~~`)
    /// - Task lists (`- [ ] item`)
    /// - Footnotes (`[^note]`)
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Render soft line breaks as `<br>` instead of a plain newline.
    ///
    /// Enabled by default, so a single newline inside a paragraph shows up
    /// as a line break in the preview.
    #[must_use]
    pub fn with_breaks(mut self, enabled: bool) -> Self {
        self.breaks = enabled;
        self
    }

    /// Parser options based on the extended syntax switch.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_FOOTNOTES
        } else {
            Options::empty()
        }
    }

    /// Create a configured parser for the given markdown text.
    #[must_use]
    pub fn create_parser<'a>(&self, markdown: &'a str) -> Parser<'a> {
        Parser::new_ext(markdown, self.parser_options())
    }

    /// Render markdown text directly using configured parser options.
    pub fn render_markdown(&mut self, markdown: &str) -> RenderResult {
        let parser = self.create_parser(markdown);
        self.render(parser)
    }

    /// Add a code block processor.
    #[must_use]
    pub fn with_processor<P: CodeBlockProcessor + Send + 'static>(mut self, processor: P) -> Self {
        self.processors.push(Box::new(processor));
        self
    }

    /// Warnings from all processors.
    pub fn processor_warnings(&self) -> impl Iterator<Item = String> + '_ {
        self.processors.iter().flat_map(|p| p.warnings()).cloned()
    }

    /// Render markdown events and return the result.
    pub fn render<'a, I>(&mut self, events: I) -> RenderResult
    where
        I: Iterator<Item = Event<'a>>,
    {
        for event in events {
            self.process_event(event);
        }

        RenderResult {
            html: std::mem::take(&mut self.output),
            warnings: self.processor_warnings().collect(),
        }
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::Html(html) | Event::InlineHtml(html) => self.output.push_str(&html),
            Event::SoftBreak => self.soft_break(),
            Event::HardBreak => B::hard_break(&mut self.output),
            Event::Rule => B::horizontal_rule(&mut self.output),
            Event::TaskListMarker(checked) => B::task_list_marker(checked, &mut self.output),
            Event::FootnoteReference(name) => self.footnote_reference(&name),
            Event::InlineMath(_) | Event::DisplayMath(_) => {
                // Not enabled
            }
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.output.push_str("<p>"),
            Tag::Heading { level, id, .. } => match id {
                Some(id) => write!(self.output, r#"<{level} id="{}">"#, escape_html(&id)).unwrap(),
                None => write!(self.output, "<{level}>").unwrap(),
            },
            Tag::BlockQuote(_) => B::blockquote_start(&mut self.output),
            Tag::CodeBlock(kind) => {
                let (lang, attrs) = match kind {
                    CodeBlockKind::Fenced(ref info) if !info.is_empty() => {
                        let (lang, attrs) = parse_fence_info(info);
                        (if lang.is_empty() { None } else { Some(lang) }, attrs)
                    }
                    _ => (None, HashMap::new()),
                };
                self.pending_attrs = attrs;
                self.code.start(lang);
            }
            Tag::List(start) => match start {
                Some(1) => self.output.push_str("<ol>"),
                Some(n) => write!(self.output, r#"<ol start="{n}">"#).unwrap(),
                None => self.output.push_str("<ul>"),
            },
            Tag::Item => self.output.push_str("<li>"),
            Tag::FootnoteDefinition(name) => {
                let number = self.footnotes.number(&name);
                write!(
                    self.output,
                    r#"<div class="footnote-definition" id="{}"><sup class="footnote-definition-label">{number}</sup>"#,
                    escape_html(&name)
                )
                .unwrap();
            }
            Tag::HtmlBlock | Tag::MetadataBlock(_) => {}
            Tag::DefinitionList => self.output.push_str("<dl>"),
            Tag::DefinitionListTitle => self.output.push_str("<dt>"),
            Tag::DefinitionListDefinition => self.output.push_str("<dd>"),
            Tag::Table(alignments) => {
                self.table.start(alignments);
                self.output.push_str("<table>");
            }
            Tag::TableHead => {
                self.table.start_head();
                self.output.push_str("<thead><tr>");
            }
            Tag::TableRow => {
                self.table.start_row();
                self.output.push_str("<tr>");
            }
            Tag::TableCell => {
                let align = self.table.current_alignment_style();
                let tag = if self.table.is_in_head() { "th" } else { "td" };
                write!(self.output, "<{tag}{align}>").unwrap();
            }
            Tag::Emphasis => self.output.push_str("<em>"),
            Tag::Strong => self.output.push_str("<strong>"),
            Tag::Strikethrough => self.output.push_str("<del>"),
            Tag::Superscript => self.output.push_str("<sup>"),
            Tag::Subscript => self.output.push_str("<sub>"),
            Tag::Link {
                dest_url, title, ..
            } => {
                if title.is_empty() {
                    write!(self.output, r#"<a href="{}">"#, escape_html(&dest_url)).unwrap();
                } else {
                    write!(
                        self.output,
                        r#"<a href="{}" title="{}">"#,
                        escape_html(&dest_url),
                        escape_html(&title)
                    )
                    .unwrap();
                }
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                // Alt text arrives as nested events; the tag is written in end_tag
                self.image.start();
                self.pending_image = Some((dest_url.to_string(), title.to_string()));
            }
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.output.push_str("</p>"),
            TagEnd::Heading(level) => write!(self.output, "</{level}>").unwrap(),
            TagEnd::BlockQuote(_) => B::blockquote_end(&mut self.output),
            TagEnd::CodeBlock => self.end_code_block(),
            TagEnd::List(ordered) => {
                self.output
                    .push_str(if ordered { "</ol>" } else { "</ul>" });
            }
            TagEnd::Item => self.output.push_str("</li>"),
            TagEnd::FootnoteDefinition => self.output.push_str("</div>"),
            TagEnd::HtmlBlock | TagEnd::MetadataBlock(_) => {}
            TagEnd::DefinitionList => self.output.push_str("</dl>"),
            TagEnd::DefinitionListTitle => self.output.push_str("</dt>"),
            TagEnd::DefinitionListDefinition => self.output.push_str("</dd>"),
            TagEnd::Table => self.output.push_str("</tbody></table>"),
            TagEnd::TableHead => {
                self.output.push_str("</tr></thead><tbody>");
                self.table.end_head();
            }
            TagEnd::TableRow => self.output.push_str("</tr>"),
            TagEnd::TableCell => {
                self.output.push_str(if self.table.is_in_head() {
                    "</th>"
                } else {
                    "</td>"
                });
                self.table.next_cell();
            }
            TagEnd::Emphasis => self.output.push_str("</em>"),
            TagEnd::Strong => self.output.push_str("</strong>"),
            TagEnd::Strikethrough => self.output.push_str("</del>"),
            TagEnd::Superscript => self.output.push_str("</sup>"),
            TagEnd::Subscript => self.output.push_str("</sub>"),
            TagEnd::Link => self.output.push_str("</a>"),
            TagEnd::Image => {
                let alt = self.image.end();
                if let Some((src, title)) = self.pending_image.take() {
                    B::image(&src, &alt, &title, &mut self.output);
                }
            }
        }
    }

    /// Dispatch a finished code block to processors, then to the backend.
    fn end_code_block(&mut self) {
        let (lang, content) = self.code.end();
        let attrs = std::mem::take(&mut self.pending_attrs);

        let handled = lang.as_deref().and_then(|lang| {
            self.processors
                .iter_mut()
                .find_map(|processor| match processor.process(lang, &attrs, &content) {
                    ProcessResult::Inline(html) => Some(html),
                    ProcessResult::PassThrough => None,
                })
        });

        match handled {
            Some(html) => self.output.push_str(&html),
            None => B::code_block(lang.as_deref(), &content, &mut self.output),
        }
    }

    fn text(&mut self, text: &str) {
        if self.code.is_active() {
            self.code.push_str(text);
        } else if self.image.is_active() {
            self.image.push_str(text);
        } else {
            self.output.push_str(&escape_html(text));
        }
    }

    fn inline_code(&mut self, code: &str) {
        if self.image.is_active() {
            self.image.push_str(code);
        } else {
            write!(self.output, "<code>{}</code>", escape_html(code)).unwrap();
        }
    }

    fn soft_break(&mut self) {
        if self.code.is_active() {
            self.code.push_str("\n");
        } else if self.image.is_active() {
            self.image.push_str(" ");
        } else if self.breaks {
            B::hard_break(&mut self.output);
            self.output.push('\n');
        } else {
            self.output.push('\n');
        }
    }

    fn footnote_reference(&mut self, name: &str) {
        let number = self.footnotes.number(name);
        write!(
            self.output,
            r##"<sup class="footnote-reference"><a href="#{}">{number}</a></sup>"##,
            escape_html(name)
        )
        .unwrap();
    }
}

impl<B: RenderBackend> Default for MarkdownRenderer<B> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HtmlBackend;
    use pretty_assertions::assert_eq;

    fn render_html(markdown: &str) -> RenderResult {
        MarkdownRenderer::<HtmlBackend>::new().render_markdown(markdown)
    }

    #[test]
    fn test_html_basic_paragraph() {
        let result = render_html("Hello, world!");
        assert_eq!(result.html, "<p>Hello, world!</p>");
    }

    #[test]
    fn test_heading() {
        let result = render_html("## Section Title");
        assert_eq!(result.html, "<h2>Section Title</h2>");
    }

    #[test]
    fn test_emphasis() {
        let result = render_html("*italic* and **bold**");
        assert_eq!(result.html, "<p><em>italic</em> and <strong>bold</strong></p>");
    }

    #[test]
    fn test_soft_break_rendered_as_line_break() {
        let result = render_html("first\nsecond");
        assert_eq!(result.html, "<p>first<br>\nsecond</p>");
    }

    #[test]
    fn test_soft_break_without_breaks() {
        let result = MarkdownRenderer::<HtmlBackend>::new()
            .with_breaks(false)
            .render_markdown("first\nsecond");
        assert_eq!(result.html, "<p>first\nsecond</p>");
    }

    #[test]
    fn test_strikethrough() {
        let result = render_html("~~deleted~~");
        assert_eq!(result.html, "<p><del>deleted</del></p>");
    }

    #[test]
    fn test_table() {
        let result = render_html("| A | B |\n|---|--:|\n| 1 | 2 |");
        assert!(result.html.contains("<table><thead><tr><th>A</th>"));
        assert!(result.html.contains(r#"<td style="text-align:right">2</td>"#));
        assert!(result.html.ends_with("</tbody></table>"));
    }

    #[test]
    fn test_task_list() {
        let result = render_html("- [ ] Unchecked\n- [x] Checked");
        assert!(result.html.contains(r#"<input type="checkbox" disabled>"#));
        assert!(
            result
                .html
                .contains(r#"<input type="checkbox" checked disabled>"#)
        );
    }

    #[test]
    fn test_footnotes() {
        let result = render_html("Text[^note].\n\n[^note]: The note.");
        assert!(
            result
                .html
                .contains(r##"<sup class="footnote-reference"><a href="#note">1</a></sup>"##)
        );
        assert!(result.html.contains(
            r#"<div class="footnote-definition" id="note"><sup class="footnote-definition-label">1</sup>"#
        ));
    }

    #[test]
    fn test_gfm_disabled() {
        let result = MarkdownRenderer::<HtmlBackend>::new()
            .with_gfm(false)
            .render_markdown("| A | B |\n|---|---|\n| 1 | 2 |");
        assert!(!result.html.contains("<table>"));
    }

    #[test]
    fn test_parser_options() {
        let options = MarkdownRenderer::<HtmlBackend>::new().parser_options();
        assert!(options.contains(Options::ENABLE_TABLES));
        assert!(options.contains(Options::ENABLE_FOOTNOTES));
        assert!(options.contains(Options::ENABLE_TASKLISTS));
    }

    #[test]
    fn test_link_with_title() {
        let result = render_html(r#"[Docs](https://example.com "Read <more>")"#);
        assert_eq!(
            result.html,
            r#"<p><a href="https://example.com" title="Read &lt;more&gt;">Docs</a></p>"#
        );
    }

    #[test]
    fn test_image_alt_text() {
        let result = render_html("![Alt *text*](image.png)");
        assert_eq!(result.html, r#"<p><img src="image.png" alt="Alt text"></p>"#);
    }

    #[test]
    fn test_ordered_list_start() {
        let result = render_html("3. Three\n4. Four");
        assert_eq!(result.html, r#"<ol start="3"><li>Three</li><li>Four</li></ol>"#);
    }

    #[test]
    fn test_raw_html_passes_through() {
        let result = render_html("<div class=\"note\">hi</div>");
        assert!(result.html.contains(r#"<div class="note">hi</div>"#));
    }

    #[test]
    fn test_text_is_escaped() {
        let result = render_html("a < b & c");
        assert_eq!(result.html, "<p>a &lt; b &amp; c</p>");
    }

    // Code block processor tests

    struct ShoutProcessor;

    impl CodeBlockProcessor for ShoutProcessor {
        fn process(
            &mut self,
            language: &str,
            _attrs: &HashMap<String, String>,
            source: &str,
        ) -> ProcessResult {
            if language == "shout" {
                ProcessResult::Inline(format!("<p>{}</p>", source.trim().to_uppercase()))
            } else {
                ProcessResult::PassThrough
            }
        }
    }

    struct AttrEchoProcessor {
        warnings: Vec<String>,
    }

    impl CodeBlockProcessor for AttrEchoProcessor {
        fn process(
            &mut self,
            language: &str,
            attrs: &HashMap<String, String>,
            _source: &str,
        ) -> ProcessResult {
            if language == "echo" {
                let theme = attrs.get("theme").cloned().unwrap_or_default();
                self.warnings.push(format!("echoed theme {theme}"));
                ProcessResult::Inline(format!("<span>{theme}</span>"))
            } else {
                ProcessResult::PassThrough
            }
        }

        fn warnings(&self) -> &[String] {
            &self.warnings
        }
    }

    #[test]
    fn test_processor_inline() {
        let mut renderer = MarkdownRenderer::<HtmlBackend>::new().with_processor(ShoutProcessor);
        let result = renderer.render_markdown("```shout\nhello\n```");
        assert_eq!(result.html, "<p>HELLO</p>");
    }

    #[test]
    fn test_processor_passthrough() {
        let mut renderer = MarkdownRenderer::<HtmlBackend>::new().with_processor(ShoutProcessor);
        let result = renderer.render_markdown("```rust\nfn main() {}\n```");
        assert!(result.html.contains(r#"class="hljs language-rust""#));
    }

    #[test]
    fn test_processor_receives_attrs_and_reports_warnings() {
        let mut renderer = MarkdownRenderer::<HtmlBackend>::new()
            .with_processor(ShoutProcessor)
            .with_processor(AttrEchoProcessor {
                warnings: Vec::new(),
            });
        let result = renderer.render_markdown("```echo theme=dark\nx\n```");
        assert_eq!(result.html, "<span>dark</span>");
        assert_eq!(result.warnings, vec!["echoed theme dark".to_owned()]);
    }

    #[test]
    fn test_code_block_without_language_skips_processors() {
        let mut renderer = MarkdownRenderer::<HtmlBackend>::new().with_processor(ShoutProcessor);
        let result = renderer.render_markdown("```\nshout\n```");
        assert!(result.html.starts_with(r#"<pre><code class="hljs">"#));
    }

    #[test]
    fn test_indented_code_block() {
        let result = render_html("    let x = 1;");
        assert!(result.html.starts_with(r#"<pre><code class="hljs">"#));
        assert!(result.html.contains("let x = 1;"));
    }
}
