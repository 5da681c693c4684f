//! Pre-trained word embeddings.
//!
//! A table is loaded once and then only read. Lookups return `None` for
//! out-of-vocabulary words; deciding what to do about them is up to the
//! caller.
use std::sync::Arc;

pub mod error;
pub mod similarity;
pub mod word2vec;

use self::error::EmbeddingError;
pub use self::word2vec::{VectorFormat, Word2Vec};
use crate::config::ModelConfig;

/// A read-only word → vector table.
pub trait Embeddings {
    /// Length of every vector in the table.
    fn dimensions(&self) -> usize;

    /// Number of words in the table.
    fn len(&self) -> usize;

    /// Whether the table holds no words.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The vector for `word`, or `None` if it is out of vocabulary.
    fn vector(&self, word: &str) -> Option<&[f32]>;

    /// Whether `word` has a vector.
    fn contains(&self, word: &str) -> bool {
        self.vector(word).is_some()
    }
}

/// Loads the table described by `config`, resolving its path through the
/// fallback locations in [`crate::paths::find_model_path`].
pub fn load(config: &ModelConfig) -> Result<Arc<Word2Vec>, EmbeddingError> {
    let explicit = config.path.as_deref();
    let path = crate::paths::find_model_path(explicit)
        .ok_or_else(|| EmbeddingError::NotFound(crate::paths::model_search_paths(explicit)))?;

    Word2Vec::open(path, config.format, config.limit).map(Arc::new)
}
