//! Text edits behind the editor's formatting toolbar.
//!
//! Selections are byte ranges into the text. Offsets past the end or inside
//! a multi-byte character are moved down to the nearest character boundary,
//! and a reversed range is swapped.

use std::ops::Range;

/// Result of an edit: the new text and where the selection ends up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// Full text after the edit.
    pub text: String,
    /// Selection after the edit, as a byte range into `text`.
    pub selection: Range<usize>,
}

/// Surround the selection with `before` and `after`.
///
/// The returned selection still covers the originally selected text.
///
/// # Example
///
/// ```
/// use wiki_history::wrap_selection;
///
/// let edit = wrap_selection("make this bold", 5..9, "**", "**");
/// assert_eq!(edit.text, "make **this** bold");
/// assert_eq!(&edit.text[edit.selection], "this");
/// ```
#[must_use]
pub fn wrap_selection(text: &str, selection: Range<usize>, before: &str, after: &str) -> Edit {
    let Range { start, end } = clamp_selection(text, selection);

    let mut result = String::with_capacity(text.len() + before.len() + after.len());
    result.push_str(&text[..start]);
    result.push_str(before);
    result.push_str(&text[start..end]);
    result.push_str(after);
    result.push_str(&text[end..]);

    Edit {
        text: result,
        selection: start + before.len()..end + before.len(),
    }
}

/// Replace the selection with `insert`, leaving the cursor right after it.
#[must_use]
pub fn insert_at_cursor(text: &str, selection: Range<usize>, insert: &str) -> Edit {
    let Range { start, end } = clamp_selection(text, selection);

    let mut result = String::with_capacity(text.len() + insert.len());
    result.push_str(&text[..start]);
    result.push_str(insert);
    result.push_str(&text[end..]);

    let cursor = start + insert.len();
    Edit {
        text: result,
        selection: cursor..cursor,
    }
}

/// Markdown formatting actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkdownFormat {
    Bold,
    Italic,
    Code,
    CodeBlock,
    H1,
    H2,
    H3,
    Quote,
    Link,
    UnorderedList,
    OrderedList,
}

impl MarkdownFormat {
    /// Markup inserted before the selection.
    #[must_use]
    pub fn before(self) -> &'static str {
        match self {
            Self::Bold => "**",
            Self::Italic => "_",
            Self::Code => "`",
            Self::CodeBlock => "```\n",
            Self::H1 => "# ",
            Self::H2 => "## ",
            Self::H3 => "### ",
            Self::Quote => "> ",
            Self::Link => "[",
            Self::UnorderedList => "- ",
            Self::OrderedList => "1. ",
        }
    }

    /// Markup inserted after the selection.
    #[must_use]
    pub fn after(self) -> &'static str {
        match self {
            Self::Bold => "**",
            Self::Italic => "_",
            Self::Code => "`",
            Self::CodeBlock => "\n```",
            Self::Link => "](url)",
            Self::H1
            | Self::H2
            | Self::H3
            | Self::Quote
            | Self::UnorderedList
            | Self::OrderedList => "",
        }
    }

    /// Apply this format to the selection.
    #[must_use]
    pub fn apply(self, text: &str, selection: Range<usize>) -> Edit {
        wrap_selection(text, selection, self.before(), self.after())
    }
}

fn clamp_selection(text: &str, selection: Range<usize>) -> Range<usize> {
    let start = floor_boundary(text, selection.start.min(selection.end));
    let end = floor_boundary(text, selection.start.max(selection.end));
    start..end
}

fn floor_boundary(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}
