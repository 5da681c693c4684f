//! Errors raised while assembling a [`SmartSpeller`](super::SmartSpeller).
use crate::config::ConfigError;
use crate::embedding::error::EmbeddingError;
use crate::speller::error::SpellerError;

/// Errors that can occur when opening a [`SmartSpeller`](super::SmartSpeller).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SmartSpellError {
    /// The configuration could not be read
    #[error("Configuration error")]
    Config(#[from] ConfigError),

    /// The spelling dictionary could not be opened
    #[error("Dictionary error")]
    Speller(#[from] SpellerError),

    /// The embedding table could not be loaded
    #[error("Embedding table error")]
    Embedding(#[from] EmbeddingError),
}
