//! Diagram code blocks for the wiki preview.
//!
//! This crate provides [`DiagramProcessor`], a
//! [`CodeBlockProcessor`](wiki_renderer::CodeBlockProcessor) that turns two
//! fence languages into embeddable markup:
//!
//! - `plantuml`: source is deflated and encoded into a `PlantUML` server URL
//!   and emitted as a lazily loaded `<img>` with a readable alt text
//! - `mermaid`: source is escaped into a `<div class="mermaid">` for the
//!   client-side runtime
//!
//! Each container gets an id from a shared [`DiagramIdGenerator`], so
//! diagrams stay distinct across renders and editors.

mod consts;
mod error;
mod id;
mod language;
mod mermaid;
mod plantuml;
mod processor;

pub use consts::{DEFAULT_PLANTUML_LABEL, DEFAULT_PLANTUML_URL, PLANTUML_ERROR_HTML};
pub use error::EncodeError;
pub use id::{DiagramIdGenerator, RandomIds, SequentialIds};
pub use language::{DiagramFormat, DiagramLanguage};
pub use mermaid::mermaid_html;
pub use plantuml::{
    DeflateEncoder64, DiagramEncoder, diagram_label, encode_plantuml, image_url, plantuml_html,
};
pub use processor::DiagramProcessor;
