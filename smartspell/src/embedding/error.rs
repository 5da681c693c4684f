//! Embedding-table errors.
use std::path::PathBuf;

/// Errors that can occur when locating or loading an embedding table.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum EmbeddingError {
    /// Error opening the table file
    #[error("Failed to open embedding table '{0}'")]
    File(PathBuf, #[source] std::io::Error),

    /// Error memory-mapping the table file
    #[error("Failed to memory-map embedding table")]
    Memmap(#[source] std::io::Error),

    /// No table at the configured path or any fallback location
    #[error("No embedding table found, searched {0:?}")]
    NotFound(Vec<PathBuf>),

    /// The `<count> <dimensions>` header line could not be read
    #[error("Malformed header: {0}")]
    MalformedHeader(String),

    /// The table ended in the middle of an entry
    #[error("Entry {entry} is truncated")]
    Truncated {
        /// zero-based entry number
        entry: usize,
        /// underlying read error
        #[source]
        source: std::io::Error,
    },

    /// An entry could not be parsed
    #[error("Entry {entry} is malformed: {reason}")]
    MalformedEntry {
        /// zero-based entry number
        entry: usize,
        /// what was wrong with it
        reason: String,
    },

    /// The word of an entry is not valid UTF-8
    #[error("Entry {0} is not valid UTF-8")]
    InvalidWord(usize, #[source] std::str::Utf8Error),

    /// An entry's vector length differs from the header
    #[error("Entry {entry} has {found} dimensions, expected {expected}")]
    DimensionMismatch {
        /// zero-based entry number
        entry: usize,
        /// dimensions declared by the header
        expected: usize,
        /// dimensions found in the entry
        found: usize,
    },
}
