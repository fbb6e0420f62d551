//! Render backend trait for format-specific rendering.
//!
//! The main renderer is generic over the backend so that elements whose
//! markup depends on the embedding surface (code blocks, blockquotes,
//! images, breaks) can be swapped without touching event handling.

/// Backend trait for format-specific rendering operations.
pub trait RenderBackend {
    /// Render a regular (non-diagram) code block.
    ///
    /// # Arguments
    ///
    /// * `lang` - Language declared on the fence (e.g., "rust"), if any
    /// * `content` - The raw code content
    /// * `out` - Output buffer to write to
    fn code_block(lang: Option<&str>, content: &str, out: &mut String);

    /// Render blockquote start tag.
    fn blockquote_start(out: &mut String) {
        out.push_str("<blockquote>");
    }

    /// Render blockquote end tag.
    fn blockquote_end(out: &mut String) {
        out.push_str("</blockquote>");
    }

    /// Render an image.
    ///
    /// # Arguments
    ///
    /// * `src` - Image source URL
    /// * `alt` - Alt text for the image
    /// * `title` - Optional title attribute (empty when absent)
    /// * `out` - Output buffer to write to
    fn image(src: &str, alt: &str, title: &str, out: &mut String);

    /// Render a hard break.
    ///
    /// Also used for soft breaks when line breaks are enabled.
    fn hard_break(out: &mut String) {
        out.push_str("<br>");
    }

    /// Render a horizontal rule.
    fn horizontal_rule(out: &mut String) {
        out.push_str("<hr>");
    }

    /// Render a task list marker.
    fn task_list_marker(checked: bool, out: &mut String) {
        if checked {
            out.push_str(r#"<input type="checkbox" checked disabled> "#);
        } else {
            out.push_str(r#"<input type="checkbox" disabled> "#);
        }
    }
}
