//! Error types for HTML sanitization.

/// Error while sanitizing rendered HTML.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SanitizeError {
    /// Writing the sanitized tree back to markup failed.
    #[error("failed to serialize sanitized HTML")]
    Serialize(#[from] std::io::Error),
    /// The serializer produced bytes that are not UTF-8.
    #[error("sanitized HTML is not valid UTF-8")]
    Encoding(#[from] std::string::FromUtf8Error),
}
