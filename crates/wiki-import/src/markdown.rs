//! Reduce converter HTML to basic markdown.
//!
//! The rewrite is a fixed sequence of substitutions, not an HTML parse.
//! Only headings up to level three, bold, italic, paragraphs and line
//! breaks survive as markdown; every other tag is dropped and its text
//! kept.

use std::sync::LazyLock;

use regex::Regex;

use crate::converter::{ConversionMessage, MessageKind};

/// Substitutions applied in order. Later rules see the output of earlier
/// ones.
static RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"(?i)<h1[^>]*>(.*?)</h1>", "# ${1}\n"),
        (r"(?i)<h2[^>]*>(.*?)</h2>", "## ${1}\n"),
        (r"(?i)<h3[^>]*>(.*?)</h3>", "### ${1}\n"),
        (r"(?i)<strong[^>]*>(.*?)</strong>", "**${1}**"),
        (r"(?i)<em[^>]*>(.*?)</em>", "*${1}*"),
        (r"(?i)<p[^>]*>(.*?)</p>", "${1}\n\n"),
        (r"(?i)<br\s*/?>", "\n"),
        (r"<[^>]*>", ""),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), replacement))
    .collect()
});

/// Convert converter HTML to markdown.
///
/// # Example
///
/// ```
/// use wiki_import::html_to_markdown;
///
/// let md = html_to_markdown("<h1>Title</h1><p>Some <strong>bold</strong> text</p>");
/// assert_eq!(md, "# Title\nSome **bold** text\n\n");
/// ```
#[must_use]
pub fn html_to_markdown(html: &str) -> String {
    RULES
        .iter()
        .fold(html.to_owned(), |content, (pattern, replacement)| {
            pattern.replace_all(&content, *replacement).into_owned()
        })
}

/// Render warning messages as HTML comments, one per line.
///
/// Returns `None` when no message is a warning.
#[must_use]
pub fn warning_comments(messages: &[ConversionMessage]) -> Option<String> {
    let comments: Vec<String> = messages
        .iter()
        .filter(|m| m.kind == MessageKind::Warning)
        .map(|m| format!("<!-- Warning: {} -->", m.message))
        .collect();

    (!comments.is_empty()).then(|| comments.join("\n"))
}
