//! End-to-end preview rendering.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use wiki_diagrams::{DiagramEncoder, EncodeError, PLANTUML_ERROR_HTML, RandomIds, SequentialIds};
use wiki_preview::{PreviewConfig, PreviewRenderer};

struct FailingEncoder;

impl DiagramEncoder for FailingEncoder {
    fn encode(&self, _source: &str) -> Result<String, EncodeError> {
        Err(EncodeError::Compress(std::io::Error::other("compressor unavailable")))
    }
}

fn renderer() -> PreviewRenderer {
    PreviewRenderer::new(PreviewConfig::default())
        .with_id_generator(Arc::new(SequentialIds::starting_at(1)))
}

/// Decode the five escapes produced for element text.
fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

#[test]
fn test_bold() {
    let html = renderer().render("**bold**");
    assert!(html.contains("<strong>bold</strong>"));
    assert!(!html.contains("**"));
}

#[test]
fn test_script_removed() {
    let html = renderer().render("<script>alert(1)</script>");
    assert!(!html.to_lowercase().contains("<script"));
}

#[test]
fn test_javascript_href_stripped_text_kept() {
    let html = renderer().render(r#"<a href="javascript:alert(1)">x</a>"#);
    assert!(html.contains("<a>x</a>"));
    assert!(!html.contains("javascript"));
}

#[test]
fn test_abrupt_comment_in_raw_html() {
    let html = renderer().render("<!--><script>alert(1)</script>-->\n\ntext");
    assert!(!html.contains("<script"));
    assert!(!html.contains("alert("));
    assert!(html.ends_with("<p>text</p>"));
}

#[test]
fn test_slash_separated_attributes_in_raw_html() {
    let html = renderer().render("<div>\n<img/src=x/onerror=alert(1)>\n</div>");
    assert!(!html.contains("</img"));
    assert!(!html.contains(" onerror"));
    assert!(html.starts_with("<div>"));
    assert!(html.contains(r#"<img src="x/onerror=alert(1)">"#));
}

#[test]
fn test_named_character_references_in_href() {
    let html = renderer().render(concat!(
        r#"<a href="javascript&colon;alert(1)">a</a> "#,
        r#"<a href="java&Tab;script:alert(2)">b</a>"#
    ));
    assert!(!html.contains("href"));
    assert!(html.contains("<a>a</a>"));
    assert!(html.contains("<a>b</a>"));
}

#[test]
fn test_bare_less_than_in_html_block() {
    let html = renderer().render("<details>\n<summary>Cmp\nif a < b then\n</details>\n\n**bold**");
    assert!(html.contains("if a &lt; b then"));
    assert!(html.ends_with("<p><strong>bold</strong></p>"));
}

#[test]
fn test_plantuml_image_with_escaped_alt() {
    let html = renderer().render("```plantuml\n@startuml\nAlice -> \"Bob\"\n@enduml\n```");
    assert!(html.starts_with(r#"<div class="plantuml-diagram" id="plantuml-1"><img src="https://www.plantuml.com/plantuml/svg/"#));
    let alt = html
        .split_once(r#"alt=""#)
        .and_then(|(_, rest)| rest.split_once('"'))
        .map(|(value, _)| value)
        .unwrap();
    assert_eq!(unescape(alt), r#"Alice -> "Bob""#);
    assert!(html.contains(r#"loading="lazy""#));
}

#[test]
fn test_plantuml_encoder_failure_never_fails_render() {
    let renderer = renderer().with_encoder(Arc::new(FailingEncoder));
    let preview = renderer
        .try_render("Intro\n\n```plantuml\nA -> B\n```")
        .unwrap();

    assert_eq!(preview.html, format!("<p>Intro</p>{PLANTUML_ERROR_HTML}"));
    assert_eq!(preview.warnings.len(), 1);
}

#[test]
fn test_mermaid_text_unescapes_to_source() {
    let source = "graph TD\n  A[\"<start>\"] --> B{'a & b'}";
    let html = renderer().render(&format!("```mermaid\n{source}\n```"));

    let prefix = r#"<div class="mermaid" id="mermaid-1">"#;
    let body = html
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_suffix("</div>"))
        .unwrap();
    assert_eq!(unescape(body), source);
}

#[test]
fn test_sequential_renders_get_distinct_ids() {
    let renderer = renderer();
    let first = renderer.render("```mermaid\nA\n```");
    let second = renderer.render("```mermaid\nA\n```");
    assert_ne!(first, second);
    assert!(first.contains(r#"id="mermaid-1""#));
    assert!(second.contains(r#"id="mermaid-2""#));
}

#[test]
fn test_random_ids_distinct() {
    let renderer = PreviewRenderer::default().with_id_generator(Arc::new(RandomIds));
    let first = renderer.render("```mermaid\nA\n```");
    let second = renderer.render("```mermaid\nA\n```");
    assert_ne!(first, second);
}

#[test]
fn test_concurrent_renders_get_distinct_ids() {
    let renderer = Arc::new(renderer());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let renderer = Arc::clone(&renderer);
            std::thread::spawn(move || renderer.render("```mermaid\nA\n```"))
        })
        .collect();

    let mut outputs: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    outputs.sort();
    outputs.dedup();
    assert_eq!(outputs.len(), 4);
}

#[test]
fn test_highlighted_code_block() {
    let html = renderer().render("```rust\nfn main() {}\n```");
    assert!(html.starts_with(r#"<pre><code class="hljs language-rust">"#));
}

#[test]
fn test_unknown_language_code_block() {
    let html = renderer().render("```nosuchlang\nhello\n```");
    assert!(html.starts_with(r#"<pre><code class="hljs">"#));
}
