//! HTML fragment parsing and serialization with `html5ever`.
//!
//! Fragments are parsed in a `body` context with scripting enabled, the
//! way a browser parses markup assigned to `innerHTML`. The sanitizer then
//! sees the same tree the preview pane will build from its output.

use std::rc::Rc;

use html5ever::serialize::{SerializeOpts, TraversalScope};
use html5ever::tendril::TendrilSink;
use html5ever::{ParseOpts, QualName, local_name, ns, parse_fragment as parse_html_fragment};
use markup5ever_rcdom::{Handle, RcDom, SerializableHandle};

use crate::error::SanitizeError;

/// Parse an HTML fragment.
///
/// Returns the root whose children are the fragment's top-level nodes.
/// Parsing never fails: malformed markup is recovered from exactly as the
/// HTML parsing algorithm prescribes.
#[must_use]
pub fn parse_fragment(html: &str) -> Handle {
    let dom = parse_html_fragment(
        RcDom::default(),
        ParseOpts::default(),
        QualName::new(None, ns!(html), local_name!("body")),
        Vec::new(),
        true,
    )
    .one(html);

    // The fragment parser wraps its output in a single `html` element.
    // Detach it so dropping the document does not clear its subtree.
    let root = std::mem::take(&mut *dom.document.children.borrow_mut())
        .into_iter()
        .next();
    root.unwrap_or(dom.document)
}

/// Serialize the children of a fragment root back to markup.
///
/// # Errors
///
/// Returns [`SanitizeError`] if the serializer fails to write or produces
/// invalid UTF-8.
pub fn serialize_fragment(root: &Handle) -> Result<String, SanitizeError> {
    let mut out = Vec::new();
    html5ever::serialize(
        &mut out,
        &SerializableHandle::from(Rc::clone(root)),
        SerializeOpts {
            traversal_scope: TraversalScope::ChildrenOnly(None),
            ..SerializeOpts::default()
        },
    )?;
    Ok(String::from_utf8(out)?)
}
