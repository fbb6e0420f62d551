//! Wiki markdown preview.
//!
//! Composes the pieces of the preview pipeline:
//!
//! 1. `wiki-diagrams` turns `plantuml` and `mermaid` fences into image and
//!    marker containers
//! 2. `wiki-renderer` renders everything else to HTML, highlighting code
//! 3. `wiki-renderer::sanitize` strips dangerous elements and attributes
//!
//! [`PreviewRenderer::render`] never fails; on error it returns a fixed
//! fallback paragraph and logs the cause.

mod error;
mod renderer;

pub use error::PreviewError;
pub use renderer::{FALLBACK_HTML, Preview, PreviewConfig, PreviewRenderer};
