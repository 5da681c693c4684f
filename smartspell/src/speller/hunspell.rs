//! [`Speller`] backed by a Hunspell dictionary.
use std::path::{Path, PathBuf};

use hashbrown::{HashMap, HashSet};
use itertools::Itertools;
use language_tags::LanguageTag;
use log::{debug, warn};
use parking_lot::RwLock;
use smol_str::SmolStr;
use unic_ucd_category::GeneralCategory;

use super::error::SpellerError;
use super::personal::PersonalWordList;
use super::Speller;
use crate::config::DictionaryConfig;
use crate::constants::{EXCLUDED_WORDS_EXT, PERSONAL_SUGGEST_DISTANCE, PERSONAL_WORDS_EXT};
use crate::paths;
use crate::tokenizer::case_handling::lower_case;

#[derive(Debug, Default)]
struct WordLists {
    personal: PersonalWordList,
    excluded: PersonalWordList,
    session: HashSet<SmolStr>,
    replacements: HashMap<SmolStr, Vec<SmolStr>>,
}

impl WordLists {
    fn accepts(&self, word: &str) -> bool {
        self.session.contains(word) || self.personal.contains(word)
    }

    fn accepts_any_case(&self, word: &str) -> bool {
        self.accepts(word) || self.accepts(&lower_case(word))
    }
}

/// A Hunspell dictionary with personal, exclude and session word lists.
pub struct HunspellSpeller {
    tag: LanguageTag,
    dictionary: spellbook::Dictionary,
    lists: RwLock<WordLists>,
    n_best: Option<usize>,
}

impl std::fmt::Debug for HunspellSpeller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HunspellSpeller")
            .field("tag", &self.tag)
            .field("lists", &self.lists)
            .field("n_best", &self.n_best)
            .finish()
    }
}

/// Parses a BCP 47 language tag.
pub fn parse_tag(tag: &str) -> Result<LanguageTag, SpellerError> {
    LanguageTag::parse(tag).map_err(|e| SpellerError::InvalidTag(tag.to_string(), e))
}

fn read(path: &Path) -> Result<String, SpellerError> {
    std::fs::read_to_string(path).map_err(|e| SpellerError::Io(path.to_path_buf(), e))
}

impl HunspellSpeller {
    /// Builds a speller from the contents of an `.aff` and a `.dic` file.
    /// Personal word lists are kept in memory only.
    pub fn new(tag: &str, aff: &str, dic: &str) -> Result<HunspellSpeller, SpellerError> {
        let tag = parse_tag(tag)?;
        let dictionary =
            spellbook::Dictionary::new(aff, dic).map_err(|e| SpellerError::Parse(e.to_string()))?;

        Ok(HunspellSpeller {
            tag,
            dictionary,
            lists: RwLock::new(WordLists::default()),
            n_best: None,
        })
    }

    /// Opens the dictionary described by `config`.
    ///
    /// Without an explicit path the dictionary is searched for by language
    /// tag, see [`paths::find_dictionary_path`]. Personal word lists are
    /// read from `config.personal_dir`, falling back to
    /// [`paths::personal_dir`].
    pub fn open(config: &DictionaryConfig) -> Result<HunspellSpeller, SpellerError> {
        let tag = parse_tag(&config.tag)?;

        let aff_path = match config.path.as_ref() {
            Some(path) => path.clone(),
            None => paths::find_dictionary_path(&tag)
                .ok_or_else(|| SpellerError::DictionaryNotFound(config.tag.clone()))?,
        };
        let dic_path = aff_path.with_extension("dic");

        debug!(
            "Loading dictionary {} + {}",
            aff_path.display(),
            dic_path.display()
        );

        let speller = HunspellSpeller::new(tag.as_str(), &read(&aff_path)?, &read(&dic_path)?)?
            .with_n_best(config.n_best);

        match config.personal_dir.clone().or_else(paths::personal_dir) {
            Some(dir) => speller.with_personal_dir(dir),
            None => Ok(speller),
        }
    }

    /// Reads and persists the personal word list and exclude list as
    /// `<tag>.dic` and `<tag>.exc` inside `dir`.
    pub fn with_personal_dir<P: Into<PathBuf>>(self, dir: P) -> Result<HunspellSpeller, SpellerError> {
        let dir = dir.into();
        let stem = paths::dictionary_stem(&self.tag);

        let personal =
            PersonalWordList::open(dir.join(format!("{}.{}", stem, PERSONAL_WORDS_EXT)))?;
        let excluded =
            PersonalWordList::open(dir.join(format!("{}.{}", stem, EXCLUDED_WORDS_EXT)))?;

        {
            let mut lists = self.lists.write();
            lists.personal = personal;
            lists.excluded = excluded;
        }

        Ok(self)
    }

    /// Caps the number of suggestions; `None` keeps all.
    pub fn with_n_best(mut self, n_best: Option<usize>) -> HunspellSpeller {
        self.n_best = n_best;
        self
    }

    fn personal_suggestions(lists: &WordLists, word: &str) -> Vec<SmolStr> {
        lists
            .personal
            .iter()
            .chain(lists.session.iter().map(|w| w.as_str()))
            .map(|candidate| (strsim::damerau_levenshtein(word, candidate), candidate))
            .filter(|(distance, _)| *distance <= PERSONAL_SUGGEST_DISTANCE)
            .sorted()
            .map(|(_, candidate)| SmolStr::new(candidate))
            .collect()
    }
}

impl Speller for HunspellSpeller {
    fn tag(&self) -> &LanguageTag {
        &self.tag
    }

    fn provider(&self) -> &str {
        "hunspell"
    }

    fn check(&self, word: &str) -> bool {
        if word.is_empty() {
            return true;
        }

        // Check if there are zero letters in the word according to
        // Unicode letter category
        if word.chars().all(|c| !GeneralCategory::of(c).is_letter()) {
            return true;
        }

        let lists = self.lists.read();

        if lists.excluded.contains(word) {
            return false;
        }

        lists.accepts_any_case(word) || self.dictionary.check(word)
    }

    fn suggest(&self, word: &str) -> Vec<String> {
        if word.is_empty() {
            return vec![];
        }

        let mut backend = Vec::new();
        self.dictionary.suggest(word, &mut backend);

        let lists = self.lists.read();

        let replacements = lists
            .replacements
            .get(word)
            .map(|r| r.iter().map(|w| w.to_string()).collect::<Vec<_>>())
            .unwrap_or_default();

        let personal = Self::personal_suggestions(&lists, word)
            .into_iter()
            .filter(|w| w != word)
            .map(|w| w.to_string());

        let suggestions = replacements
            .into_iter()
            .chain(personal)
            .chain(backend.into_iter())
            .filter(|w| !lists.excluded.contains(w))
            .unique();

        match self.n_best {
            Some(n) => suggestions.take(n).collect(),
            None => suggestions.collect(),
        }
    }

    fn add(&self, word: &str) -> Result<(), SpellerError> {
        let mut lists = self.lists.write();
        let was_excluded = lists.excluded.remove(word)?;

        if let Err(e) = lists.personal.insert(word) {
            if was_excluded {
                if let Err(restore) = lists.excluded.insert(word) {
                    warn!("Could not restore {:?} to exclude list: {}", word, restore);
                }
            }
            return Err(e);
        }

        lists.session.insert(SmolStr::new(word));
        Ok(())
    }

    fn remove(&self, word: &str) -> Result<(), SpellerError> {
        let mut lists = self.lists.write();
        let was_personal = lists.personal.remove(word)?;

        if let Err(e) = lists.excluded.insert(word) {
            if was_personal {
                if let Err(restore) = lists.personal.insert(word) {
                    warn!("Could not restore {:?} to personal list: {}", word, restore);
                }
            }
            return Err(e);
        }

        lists.session.remove(word);
        Ok(())
    }

    fn add_to_session(&self, word: &str) {
        self.lists.write().session.insert(SmolStr::new(word));
    }

    fn store_replacement(&self, wrong: &str, correct: &str) {
        let mut lists = self.lists.write();
        let entry = lists.replacements.entry(SmolStr::new(wrong)).or_default();
        entry.retain(|w| w != correct);
        entry.insert(0, SmolStr::new(correct));
    }

    fn is_added(&self, word: &str) -> bool {
        self.lists.read().accepts(word)
    }

    fn is_removed(&self, word: &str) -> bool {
        self.lists.read().excluded.contains(word)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const AFF: &str = "SET UTF-8\nTRY esianrtolcdugmphbyfvkwzESIANRTOLCDUGMPHBYFVKWZ'\n";
    pub(crate) const DIC: &str = "7\njoke\njokes\njacket\nclown\ncircus\ntold\nthe\n";

    pub(crate) fn en_us_speller() -> HunspellSpeller {
        HunspellSpeller::new("en-US", AFF, DIC).unwrap()
    }

    #[test]
    fn check_dictionary_words() {
        let speller = en_us_speller();
        assert!(speller.check("joke"));
        assert!(speller.check("clown"));
        assert!(!speller.check("joket"));
        assert!(speller.check(""));
        assert!(speller.check("1234"));
        assert!(speller.check("?!"));
    }

    #[test]
    fn suggest_dictionary_words() {
        let speller = en_us_speller();
        let suggestions = speller.suggest("joket");
        assert!(suggestions.iter().any(|w| w == "joke"));
        assert_eq!(suggestions.iter().unique().count(), suggestions.len());
        assert!(speller.suggest("").is_empty());
    }

    #[test]
    fn invalid_tag() {
        assert!(matches!(
            HunspellSpeller::new("not a tag", AFF, DIC),
            Err(SpellerError::InvalidTag(..))
        ));
    }

    #[test]
    fn add_and_remove() {
        let speller = en_us_speller();

        assert!(!speller.check("smartspell"));
        speller.add("smartspell").unwrap();
        assert!(speller.check("smartspell"));
        assert!(speller.check("Smartspell"));
        assert!(speller.is_added("smartspell"));
        assert!(!speller.is_removed("smartspell"));

        speller.remove("joke").unwrap();
        assert!(!speller.check("joke"));
        assert!(speller.is_removed("joke"));
        assert!(!speller.suggest("joket").iter().any(|w| w == "joke"));

        speller.add("joke").unwrap();
        assert!(speller.check("joke"));
        assert!(!speller.is_removed("joke"));
    }

    #[test]
    fn session_words() {
        let speller = en_us_speller();
        speller.add_to_session("mumblecore");
        assert!(speller.check("mumblecore"));
        assert!(speller.is_added("mumblecore"));
        assert!(speller.suggest("mumblecor").iter().any(|w| w == "mumblecore"));
    }

    #[test]
    fn replacements_come_first() {
        let speller = en_us_speller();
        speller.store_replacement("joket", "jacket");
        assert_eq!(speller.suggest("joket")[0], "jacket");

        speller.store_replacement("joket", "jokes");
        let suggestions = speller.suggest("joket");
        assert_eq!(&suggestions[..2], &["jokes", "jacket"]);
    }

    #[test]
    fn n_best() {
        let speller = en_us_speller().with_n_best(Some(1));
        assert_eq!(speller.suggest("joket").len(), 1);
    }

    #[test]
    fn personal_dir_persists() {
        let dir = tempfile::tempdir().unwrap();

        let speller = en_us_speller().with_personal_dir(dir.path()).unwrap();
        speller.add("smartspell").unwrap();
        speller.remove("circus").unwrap();
        assert!(dir.path().join("en_US.dic").is_file());
        assert!(dir.path().join("en_US.exc").is_file());

        let speller = en_us_speller().with_personal_dir(dir.path()).unwrap();
        assert!(speller.check("smartspell"));
        assert!(speller.is_added("smartspell"));
        assert!(!speller.check("circus"));
    }

    #[test]
    fn failed_write_keeps_lists_consistent() {
        let dir = tempfile::tempdir().unwrap();
        let personal = dir.path().join("en_US.dic");
        let excluded = dir.path().join("en_US.exc");

        let speller = en_us_speller().with_personal_dir(dir.path()).unwrap();
        speller.remove("circus").unwrap();
        speller.add("smartspell").unwrap();

        std::fs::remove_file(&personal).unwrap();
        std::fs::create_dir(&personal).unwrap();

        assert!(matches!(speller.add("circus"), Err(SpellerError::Io(..))));
        assert!(speller.is_removed("circus"));
        assert!(!speller.is_added("circus"));
        assert!(!speller.check("circus"));

        std::fs::remove_dir(&personal).unwrap();
        std::fs::remove_file(&excluded).unwrap();
        std::fs::create_dir(&excluded).unwrap();

        assert!(matches!(speller.remove("smartspell"), Err(SpellerError::Io(..))));
        assert!(speller.is_added("smartspell"));
        assert!(!speller.is_removed("smartspell"));
        assert!(speller.check("smartspell"));
    }

    #[test]
    fn open_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let aff = dir.path().join("en_US.aff");
        std::fs::write(&aff, AFF).unwrap();
        std::fs::write(dir.path().join("en_US.dic"), DIC).unwrap();

        let config = DictionaryConfig {
            tag: "en-US".into(),
            path: Some(aff),
            personal_dir: Some(dir.path().join("personal")),
            n_best: Some(3),
        };

        let speller = HunspellSpeller::open(&config).unwrap();
        assert!(speller.check("clown"));
        assert!(speller.suggest("joket").len() <= 3);

        let missing = DictionaryConfig {
            path: Some(dir.path().join("xx_XX.aff")),
            ..config
        };
        assert!(matches!(
            HunspellSpeller::open(&missing),
            Err(SpellerError::Io(..))
        ));
    }
}
