//! Document import for the wiki editor.
//!
//! A [`DocumentConverter`] turns an uploaded file into HTML. The
//! [`DocumentImporter`] checks the file type, runs the converter and
//! reduces the HTML to basic markdown, keeping converter warnings as HTML
//! comments at the top of the page.

mod converter;
mod importer;
mod markdown;

pub use converter::{Conversion, ConversionMessage, ConvertError, DocumentConverter, MessageKind};
pub use importer::{DocumentImporter, ImportResult, UNSUPPORTED_FILE_TYPE};
pub use markdown::{html_to_markdown, warning_comments};
