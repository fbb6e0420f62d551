//! Markdown rendering for the wiki editor preview.
//!
//! This crate provides a generic [`MarkdownRenderer`] that produces HTML
//! through the [`RenderBackend`] trait, plus a denylist [`sanitize`] pass
//! applied to the rendered output before it is embedded.
//!
//! # Architecture
//!
//! - [`MarkdownRenderer`] walks `pulldown-cmark` events and handles shared
//!   elements (lists, tables, footnotes, inline formatting).
//! - [`HtmlBackend`] renders format-specific elements. Code blocks are
//!   syntax highlighted with `syntect`.
//! - [`CodeBlockProcessor`] implementations get first pick of every fenced
//!   block; diagram notations are handled this way by `wiki-diagrams`.
//! - [`sanitize::sanitize_html`] parses the HTML with `html5ever`, removes
//!   dangerous elements and attributes, and serializes it back.
//!
//! # Example
//!
//! ```
//! use wiki_renderer::{HtmlBackend, MarkdownRenderer, sanitize};
//!
//! let mut renderer = MarkdownRenderer::<HtmlBackend>::new();
//! let result = renderer.render_markdown("**Bold** <script>alert(1)</script>");
//! let html = sanitize::sanitize_html(&result.html).unwrap();
//! assert!(html.contains("<strong>Bold</strong>"));
//! assert!(!html.contains("<script"));
//! ```

mod backend;
mod code_block;
mod error;
mod highlight;
mod html;
mod renderer;
pub mod sanitize;
mod state;

pub use backend::RenderBackend;
pub use code_block::{CodeBlockProcessor, ProcessResult};
pub use error::SanitizeError;
pub use highlight::{Highlighted, highlight_code};
pub use html::HtmlBackend;
pub use renderer::{MarkdownRenderer, RenderResult};
pub use state::escape_html;
