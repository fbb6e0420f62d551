//! Error types for preview rendering.

use wiki_renderer::SanitizeError;

/// Error returned when a preview cannot be produced.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PreviewError {
    /// Rendered HTML could not be sanitized.
    #[error("failed to sanitize rendered markdown")]
    Sanitize(#[from] SanitizeError),
}
