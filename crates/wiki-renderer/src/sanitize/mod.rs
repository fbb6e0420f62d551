//! Denylist HTML sanitization.
//!
//! The rendered HTML is parsed with `html5ever` into a DOM, walked
//! depth-first and serialized back. Walking removes:
//!
//! - `script`, `style`, `iframe`, `object`, `embed` and `link` elements,
//!   together with everything inside them
//! - attributes whose name starts with `on` (inline event handlers)
//! - `href` and `src` attributes pointing at a `javascript:` URL
//!
//! This is a best-effort denylist, not an allowlist. Constructs it does not
//! know about pass through unchanged.

mod dom;

pub use dom::{parse_fragment, serialize_fragment};
pub use markup5ever_rcdom::Handle;

use html5ever::Attribute;
use markup5ever_rcdom::NodeData;

use crate::error::SanitizeError;

/// Elements removed together with their content.
const BLOCKED_TAGS: &[&str] = &["script", "style", "iframe", "object", "embed", "link"];

/// Attributes holding URLs that are checked for the `javascript:` scheme.
const URL_ATTRS: &[&str] = &["href", "src"];

/// Counts of what a sanitization pass removed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SanitizeStats {
    /// Elements removed with their subtree.
    pub removed_elements: usize,
    /// Attributes stripped from surviving elements.
    pub removed_attributes: usize,
}

impl SanitizeStats {
    /// Whether anything was removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.removed_elements == 0 && self.removed_attributes == 0
    }
}

/// Sanitize an HTML fragment string.
///
/// # Errors
///
/// Returns [`SanitizeError`] if the sanitized tree cannot be serialized.
/// Nothing is returned in that case, so callers never see a partially
/// sanitized fragment.
///
/// # Example
///
/// ```
/// use wiki_renderer::sanitize::sanitize_html;
///
/// let html = sanitize_html(r#"<a href="javascript:alert(1)" onclick="x()">link</a>"#).unwrap();
/// assert_eq!(html, "<a>link</a>");
/// ```
pub fn sanitize_html(dirty: &str) -> Result<String, SanitizeError> {
    let root = parse_fragment(dirty);
    let stats = sanitize_fragment(&root);
    if !stats.is_empty() {
        tracing::debug!(
            removed_elements = stats.removed_elements,
            removed_attributes = stats.removed_attributes,
            "Sanitized rendered HTML"
        );
    }
    serialize_fragment(&root)
}

/// Sanitize the children of a parsed fragment root in place.
pub fn sanitize_fragment(root: &Handle) -> SanitizeStats {
    let mut stats = SanitizeStats::default();
    sanitize_children(root, &mut stats);
    stats
}

fn sanitize_children(node: &Handle, stats: &mut SanitizeStats) {
    node.children.borrow_mut().retain(|child| {
        let NodeData::Element {
            name,
            attrs,
            template_contents,
            ..
        } = &child.data
        else {
            return true;
        };

        if is_blocked_tag(&name.local) {
            stats.removed_elements += 1;
            return false;
        }

        {
            let mut attrs = attrs.borrow_mut();
            let before = attrs.len();
            attrs.retain(|attr| !is_dangerous_attr(attr));
            stats.removed_attributes += before - attrs.len();
        }

        if let Some(contents) = template_contents.borrow().as_ref() {
            sanitize_children(contents, stats);
        }
        sanitize_children(child, stats);
        true
    });
}

fn is_blocked_tag(tag: &str) -> bool {
    BLOCKED_TAGS.iter().any(|blocked| tag.eq_ignore_ascii_case(blocked))
}

/// Attribute values arrive with character references already decoded.
fn is_dangerous_attr(attr: &Attribute) -> bool {
    let name = attr.name.local.to_ascii_lowercase();
    if name.starts_with("on") {
        return true;
    }
    URL_ATTRS.contains(&&*name) && is_javascript_url(&attr.value)
}

fn is_javascript_url(value: &str) -> bool {
    // Browsers drop tabs and newlines anywhere in a URL before reading the scheme
    let normalized: String = value
        .trim()
        .chars()
        .filter(|c| !matches!(c, '\t' | '\n' | '\r'))
        .collect();
    normalized.to_ascii_lowercase().starts_with("javascript:")
}
