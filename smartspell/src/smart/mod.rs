//! A spelling dictionary whose suggestions can be ordered by meaning.
//!
//! [`SmartSpeller`] forwards the plain dictionary operations to its
//! [`Speller`] and adds [`smart_suggest`](SmartSpeller::smart_suggest) and
//! [`smart_suggest_with_scores`](SmartSpeller::smart_suggest_with_scores),
//! which rank the speller's candidates by cosine distance to a neighboring
//! word.
use std::sync::Arc;

use log::debug;
use serde::Serialize;

pub mod error;

use self::error::SmartSpellError;
use crate::config::{RankerConfig, SmartSpellConfig};
use crate::embedding::{self, Embeddings};
use crate::ranker::{self, ScoredSuggestions, Suggestion};
use crate::speller::error::SpellerError;
use crate::speller::{HunspellSpeller, Speller};
use crate::tokenizer::Tokenize;

/// A misspelled word found in running text.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Correction {
    /// byte offset of the word in the text
    pub offset: usize,
    /// the misspelled word
    pub word: String,
    /// the neighbor used for ranking
    pub context: Option<String>,
    /// ranked corrections, best first
    pub suggestions: Vec<String>,
}

/// A [`Speller`] paired with an embedding table used to re-rank its
/// suggestions.
pub struct SmartSpeller {
    speller: Arc<dyn Speller + Send + Sync>,
    embeddings: Arc<dyn Embeddings + Send + Sync>,
    config: RankerConfig,
}

impl std::fmt::Debug for SmartSpeller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmartSpeller")
            .field("tag", &self.speller.tag().as_str())
            .field("provider", &self.speller.provider())
            .field("vectors", &self.embeddings.len())
            .field("config", &self.config)
            .finish()
    }
}

impl SmartSpeller {
    /// Pairs a speller with an embedding table, using the default
    /// [`RankerConfig`].
    pub fn new(
        speller: Arc<dyn Speller + Send + Sync>,
        embeddings: Arc<dyn Embeddings + Send + Sync>,
    ) -> SmartSpeller {
        SmartSpeller {
            speller,
            embeddings,
            config: RankerConfig::default(),
        }
    }

    /// Replaces the ranking options.
    pub fn with_config(mut self, config: RankerConfig) -> SmartSpeller {
        self.config = config;
        self
    }

    /// Opens the dictionary and loads the embedding table described by
    /// `config`.
    pub fn open(config: &SmartSpellConfig) -> Result<SmartSpeller, SmartSpellError> {
        let speller = HunspellSpeller::open(&config.dictionary)?;
        let embeddings = embedding::load(&config.model)?;

        debug!(
            "Opened {} dictionary with {} vectors",
            config.dictionary.tag,
            embeddings.len()
        );

        Ok(SmartSpeller::new(Arc::new(speller), embeddings).with_config(config.ranker.clone()))
    }

    /// The underlying spelling dictionary.
    pub fn speller(&self) -> &Arc<dyn Speller + Send + Sync> {
        &self.speller
    }

    /// The underlying embedding table.
    pub fn embeddings(&self) -> &Arc<dyn Embeddings + Send + Sync> {
        &self.embeddings
    }

    /// Whether `word` is spelled correctly.
    pub fn check(&self, word: &str) -> bool {
        self.speller.check(word)
    }

    /// The speller's own suggestions for `word`, unranked.
    pub fn suggest(&self, word: &str) -> Vec<String> {
        self.speller.suggest(word)
    }

    /// Adds `word` to the personal word list.
    pub fn add(&self, word: &str) -> Result<(), SpellerError> {
        self.speller.add(word)
    }

    /// Adds `word` to the personal exclude list.
    pub fn remove(&self, word: &str) -> Result<(), SpellerError> {
        self.speller.remove(word)
    }

    /// Accepts `word` for the lifetime of this speller.
    pub fn add_to_session(&self, word: &str) {
        self.speller.add_to_session(word)
    }

    /// Remembers that `wrong` should be spelled `correct`.
    pub fn store_replacement(&self, wrong: &str, correct: &str) {
        self.speller.store_replacement(wrong, correct)
    }

    /// Whether `word` was added to the personal or session list.
    pub fn is_added(&self, word: &str) -> bool {
        self.speller.is_added(word)
    }

    /// Whether `word` is in the personal exclude list.
    pub fn is_removed(&self, word: &str) -> bool {
        self.speller.is_removed(word)
    }

    /// Candidates for a misspelled `word`, or `None` when there is nothing
    /// to rank: the word is correct, the neighbor is empty or the speller
    /// has no suggestions.
    fn candidates(&self, word: &str, neighbor: &str) -> Option<Vec<String>> {
        if self.check(word) || neighbor.is_empty() {
            return None;
        }

        let candidates = self.suggest(word);
        if candidates.is_empty() {
            return None;
        }

        Some(candidates)
    }

    fn ranked(&self, candidates: &[String], neighbor: &str) -> Option<Vec<Suggestion>> {
        let distances = ranker::distances(&*self.embeddings, neighbor, candidates, &self.config)?;
        Some(ranker::rank(candidates, &distances))
    }

    /// Suggestions for `word` ordered by closeness in meaning to `neighbor`,
    /// the word after it (or before it, if `word` ends the text).
    ///
    /// Empty if `word` is spelled correctly, `neighbor` is empty, or the
    /// speller has no suggestions. If `neighbor` has no vector the
    /// speller's own order is returned.
    pub fn smart_suggest(&self, word: &str, neighbor: &str) -> Vec<String> {
        let candidates = match self.candidates(word, neighbor) {
            Some(v) => v,
            None => return vec![],
        };

        match self.ranked(&candidates, neighbor) {
            Some(ranked) => ranked.into_iter().map(|s| s.value.to_string()).collect(),
            None => candidates,
        }
    }

    /// Like [`smart_suggest`](Self::smart_suggest), but with each
    /// suggestion's closeness to `neighbor` as a percentage, best first.
    ///
    /// Empty whenever no distances can be computed, including when
    /// `neighbor` has no vector.
    pub fn smart_suggest_with_scores(&self, word: &str, neighbor: &str) -> ScoredSuggestions {
        self.candidates(word, neighbor)
            .and_then(|candidates| self.ranked(&candidates, neighbor))
            .map(|ranked| ranker::scored(&ranked))
            .unwrap_or_default()
    }

    /// Finds misspelled words in `text` and ranks suggestions for each using
    /// the following word, or the preceding one for the last word.
    pub fn check_text(&self, text: &str) -> Vec<Correction> {
        let words = text.word_indices().collect::<Vec<_>>();

        words
            .iter()
            .enumerate()
            .filter(|(_, (_, word))| !self.check(word))
            .map(|(i, (offset, word))| {
                let context = words
                    .get(i + 1)
                    .or_else(|| i.checked_sub(1).and_then(|prev| words.get(prev)))
                    .map(|(_, neighbor)| *neighbor);

                Correction {
                    offset: *offset,
                    word: word.to_string(),
                    context: context.map(str::to_string),
                    suggestions: self.smart_suggest(word, context.unwrap_or("")),
                }
            })
            .collect()
    }
}
