//! Error types for spelling dictionary operations.
use std::path::PathBuf;

/// Errors that can occur when opening a dictionary or updating the
/// personal word lists.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SpellerError {
    /// The language tag is not valid BCP 47
    #[error("Invalid language tag '{0}'")]
    InvalidTag(String, #[source] language_tags::ParseError),

    /// No `.aff`/`.dic` pair was found for the tag
    #[error("No dictionary found for '{0}'")]
    DictionaryNotFound(String),

    /// Error reading a dictionary file or reading/writing a word list
    #[error("I/O error on '{0}'")]
    Io(PathBuf, #[source] std::io::Error),

    /// The Hunspell dictionary could not be parsed
    #[error("Failed to parse dictionary: {0}")]
    Parse(String),
}
