//! Mermaid container markup.
//!
//! Mermaid diagrams are drawn in the browser, so the source is only escaped
//! and wrapped in a marker element the client-side runtime picks up.

use wiki_renderer::escape_html;

/// Container markup holding escaped Mermaid source.
#[must_use]
pub fn mermaid_html(id: &str, source: &str) -> String {
    format!(
        r#"<div class="mermaid" id="mermaid-{}">{}</div>"#,
        escape_html(id),
        escape_html(source)
    )
}
