//! Error types for diagram encoding.

/// Error while encoding diagram source for the `PlantUML` server.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum EncodeError {
    /// Compression failed.
    #[error("deflate failed")]
    Compress(#[from] std::io::Error),
}
