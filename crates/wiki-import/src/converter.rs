//! Converter seam for binary document formats.

/// Severity of a converter message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Warning,
    Error,
    Info,
}

/// Diagnostic reported alongside a successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionMessage {
    pub kind: MessageKind,
    pub message: String,
}

impl ConversionMessage {
    /// Create a warning message.
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Warning,
            message: message.into(),
        }
    }

    /// Create an informational message.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Info,
            message: message.into(),
        }
    }
}

/// HTML produced from a document, with converter diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversion {
    pub html: String,
    pub messages: Vec<ConversionMessage>,
}

/// Error returned when a document cannot be converted at all.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The input is not a readable document.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// Reading the input failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Converts a binary document to HTML.
///
/// Implementations wrap an external converter. They must be usable from
/// several threads.
pub trait DocumentConverter: Send + Sync {
    /// Convert raw document bytes to HTML.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError`] if the document cannot be converted.
    fn convert(&self, bytes: &[u8]) -> Result<Conversion, ConvertError>;
}
