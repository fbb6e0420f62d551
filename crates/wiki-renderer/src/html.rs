//! HTML backend for markdown rendering.
//!
//! Produces HTML5 fragments for the editor preview pane.

use std::fmt::Write;

use crate::backend::RenderBackend;
use crate::highlight::highlight_code;
use crate::state::escape_html;

/// HTML render backend.
///
/// Produces:
/// - `<pre><code class="hljs language-x">` with highlighted spans for code blocks
/// - `<blockquote>` for blockquotes
/// - `<img>` for images
pub struct HtmlBackend;

impl RenderBackend for HtmlBackend {
    fn code_block(lang: Option<&str>, content: &str, out: &mut String) {
        let highlighted = highlight_code(lang, content);
        match highlighted.language {
            Some(lang) => write!(
                out,
                r#"<pre><code class="hljs language-{}">{}</code></pre>"#,
                escape_html(&lang),
                highlighted.html
            )
            .unwrap(),
            None => write!(
                out,
                r#"<pre><code class="hljs">{}</code></pre>"#,
                highlighted.html
            )
            .unwrap(),
        }
    }

    fn image(src: &str, alt: &str, title: &str, out: &mut String) {
        let title_attr = if title.is_empty() {
            String::new()
        } else {
            format!(r#" title="{}""#, escape_html(title))
        };
        write!(
            out,
            r#"<img src="{}"{title_attr} alt="{}">"#,
            escape_html(src),
            escape_html(alt)
        )
        .unwrap();
    }
}
