//! Syntax highlighting for regular code blocks.
//!
//! A declared language is used when `syntect` knows it; otherwise the
//! language is guessed from the first non-blank line (shebangs, XML
//! declarations, modelines) and falls back to plain text.

use std::sync::LazyLock;

use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::state::escape_html;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);

/// CSS class style for highlighted spans (prefix avoids clashes with page CSS).
const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed { prefix: "hl-" };

/// Highlighted code block content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Highlighted {
    /// HTML with classed `<span>` elements, safe to place inside `<code>`.
    pub html: String,
    /// Declared language when it was recognized; `None` when auto-detected.
    pub language: Option<String>,
}

/// Highlight a code block.
///
/// # Example
///
/// ```
/// use wiki_renderer::highlight_code;
///
/// let known = highlight_code(Some("rust"), "fn main() {}\n");
/// assert_eq!(known.language.as_deref(), Some("rust"));
///
/// let unknown = highlight_code(Some("no-such-language"), "just text\n");
/// assert_eq!(unknown.language, None);
/// ```
#[must_use]
pub fn highlight_code(lang: Option<&str>, source: &str) -> Highlighted {
    let syntax_set = &*SYNTAX_SET;
    let declared = lang
        .filter(|l| !l.is_empty())
        .and_then(|l| syntax_set.find_syntax_by_token(l).map(|syntax| (l, syntax)));

    let (syntax, language) = match declared {
        Some((lang, syntax)) => (syntax, Some(lang.to_owned())),
        None => (detect_syntax(syntax_set, source), None),
    };

    let html = render_classed(syntax, syntax_set, source).unwrap_or_else(|err| {
        tracing::debug!(syntax = %syntax.name, error = %err, "Highlighting failed, using plain text");
        escape_html(source)
    });

    Highlighted { html, language }
}

fn detect_syntax<'a>(syntax_set: &'a SyntaxSet, source: &str) -> &'a SyntaxReference {
    source
        .lines()
        .find(|line| !line.trim().is_empty())
        .and_then(|line| syntax_set.find_syntax_by_first_line(line))
        .unwrap_or_else(|| syntax_set.find_syntax_plain_text())
}

fn render_classed(
    syntax: &SyntaxReference,
    syntax_set: &SyntaxSet,
    source: &str,
) -> Result<String, syntect::Error> {
    let mut generator = ClassedHTMLGenerator::new_with_class_style(syntax, syntax_set, CLASS_STYLE);
    for line in LinesWithEndings::from(source) {
        generator.parse_html_for_line_which_includes_newline(line)?;
    }
    Ok(generator.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_language_keeps_declared_name() {
        let result = highlight_code(Some("rust"), "let x = 1;\n");
        assert_eq!(result.language.as_deref(), Some("rust"));
        assert!(result.html.contains("hl-"));
    }

    #[test]
    fn test_extension_token_is_recognized() {
        let result = highlight_code(Some("py"), "print('hi')\n");
        assert_eq!(result.language.as_deref(), Some("py"));
    }

    #[test]
    fn test_unknown_language_is_auto_detected() {
        let result = highlight_code(Some("klingon"), "#!/bin/bash\necho hi\n");
        assert_eq!(result.language, None);
        assert!(result.html.contains("echo"));
    }

    #[test]
    fn test_no_language_escapes_markup() {
        let result = highlight_code(None, "<b>not bold</b>\n");
        assert_eq!(result.language, None);
        assert!(!result.html.contains("<b>"));
        assert!(result.html.contains("&lt;b&gt;"));
    }
}
