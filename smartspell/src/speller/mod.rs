//! Spelling dictionaries: correctness checks, naive suggestions and the
//! user's personal word lists.
use language_tags::LanguageTag;

pub mod error;
pub mod hunspell;
pub mod personal;

use self::error::SpellerError;
pub use self::hunspell::HunspellSpeller;

/// A spelling dictionary for one language.
///
/// Implementations keep their own personal word list, exclude list,
/// session list and replacement memory; all methods take `&self`.
pub trait Speller {
    /// Language of the dictionary.
    fn tag(&self) -> &LanguageTag;

    /// Name of the engine behind the dictionary.
    fn provider(&self) -> &str;

    /// Whether `word` is spelled correctly.
    fn check(&self, word: &str) -> bool;

    /// Possible spellings for `word`, best first.
    fn suggest(&self, word: &str) -> Vec<String>;

    /// Add `word` to the personal word list.
    fn add(&self, word: &str) -> Result<(), SpellerError>;

    /// Add `word` to the personal exclude list.
    fn remove(&self, word: &str) -> Result<(), SpellerError>;

    /// Accept `word` until the dictionary is dropped.
    fn add_to_session(&self, word: &str);

    /// Record that `wrong` should be spelled `correct`. Later suggestions
    /// for `wrong` start with `correct`.
    fn store_replacement(&self, wrong: &str, correct: &str);

    /// Whether `word` is in the personal word list or the session list.
    fn is_added(&self, word: &str) -> bool;

    /// Whether `word` is in the personal exclude list.
    fn is_removed(&self, word: &str) -> bool;
}
