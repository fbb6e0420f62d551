//! Rendering followed by sanitization, as the preview pipeline runs it.

use pretty_assertions::assert_eq;
use wiki_renderer::{HtmlBackend, MarkdownRenderer, sanitize::sanitize_html};

fn render(markdown: &str) -> String {
    let result = MarkdownRenderer::<HtmlBackend>::new().render_markdown(markdown);
    sanitize_html(&result.html).unwrap()
}

#[test]
fn test_bold_text() {
    let html = render("**bold**");
    assert_eq!(html, "<p><strong>bold</strong></p>");
}

#[test]
fn test_inline_script_removed() {
    let html = render("<script>alert(1)</script>");
    assert!(!html.contains("<script"));
    assert!(!html.contains("alert(1)"));
}

#[test]
fn test_javascript_link_in_markdown_syntax() {
    let html = render("[click](javascript:alert(1))");
    assert_eq!(html, "<p><a>click</a></p>");
}

#[test]
fn test_javascript_link_in_raw_html() {
    let html = render(r#"<a href="javascript:alert(1)">x</a>"#);
    assert!(html.contains("<a>x</a>"));
    assert!(!html.contains("href"));
}

#[test]
fn test_event_handler_in_raw_html() {
    let html = render(r#"<img src="x.png" onerror="alert(1)">"#);
    assert!(html.contains(r#"<img src="x.png">"#));
    assert!(!html.contains("onerror"));
}

#[test]
fn test_task_list_survives_sanitization() {
    let html = render("- [x] done");
    assert!(html.contains(r#"<input type="checkbox" checked="" disabled="">"#));
}

#[test]
fn test_highlighted_code_survives_sanitization() {
    let html = render("```rust\nlet x = \"<b>\";\n```");
    assert!(html.starts_with(r#"<pre><code class="hljs language-rust">"#));
    assert!(html.contains("&lt;b&gt;"));
    assert!(!html.contains("<b>"));
}

#[test]
fn test_soft_breaks_and_table() {
    let html = render("line one\nline two\n\n| A |\n|---|\n| 1 |");
    assert!(html.contains("line one<br>\nline two"));
    assert!(html.contains("<td>1</td>"));
}
