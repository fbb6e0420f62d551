//! File type dispatch and import results.

use std::sync::LazyLock;

use regex::Regex;

use crate::converter::DocumentConverter;
use crate::markdown::{html_to_markdown, warning_comments};

/// Reason reported for files that are not Word documents.
pub const UNSUPPORTED_FILE_TYPE: &str =
    "Unsupported file type. Currently only Word documents (.docx, .doc) are supported.";

static WORD_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.docx?$").unwrap());

/// Outcome of importing a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportResult {
    /// The document became a page draft.
    Imported { title: String, content: String },
    /// The document could not be imported.
    Failed { reason: String },
}

impl ImportResult {
    /// Whether the import produced a draft.
    #[must_use]
    pub fn is_imported(&self) -> bool {
        matches!(self, Self::Imported { .. })
    }
}

/// Imports uploaded documents as markdown page drafts.
pub struct DocumentImporter<C> {
    converter: C,
}

impl<C: DocumentConverter> DocumentImporter<C> {
    /// Create an importer backed by `converter`.
    #[must_use]
    pub fn new(converter: C) -> Self {
        Self { converter }
    }

    /// Import a document by file name and contents.
    ///
    /// Only `.docx` and `.doc` files are accepted. The title is the file
    /// name without its extension.
    pub fn import_document(&self, file_name: &str, bytes: &[u8]) -> ImportResult {
        if !WORD_EXTENSION.is_match(file_name) {
            tracing::debug!(file_name, "Rejected unsupported file type");
            return ImportResult::Failed {
                reason: UNSUPPORTED_FILE_TYPE.to_owned(),
            };
        }
        self.import_word(file_name, bytes)
    }

    fn import_word(&self, file_name: &str, bytes: &[u8]) -> ImportResult {
        let conversion = match self.converter.convert(bytes) {
            Ok(conversion) => conversion,
            Err(err) => {
                tracing::warn!(file_name, error = %err, "Word import failed");
                return ImportResult::Failed {
                    reason: format!("Failed to import Word document: {err}"),
                };
            }
        };

        let title = WORD_EXTENSION.replace(file_name, "").into_owned();
        let mut content = html_to_markdown(&conversion.html);
        if let Some(warnings) = warning_comments(&conversion.messages) {
            content = format!("{warnings}\n\n{content}");
        }

        tracing::info!(file_name, messages = conversion.messages.len(), "Imported document");
        ImportResult::Imported { title, content }
    }
}
