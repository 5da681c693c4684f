//! Word lists kept on behalf of the user: one word per line, UTF-8.
use std::path::{Path, PathBuf};

use hashbrown::HashSet;
use log::debug;
use smol_str::SmolStr;

use super::error::SpellerError;

/// A set of words, optionally mirrored to a file.
#[derive(Debug, Default)]
pub struct PersonalWordList {
    words: HashSet<SmolStr>,
    path: Option<PathBuf>,
}

impl PersonalWordList {
    /// A list that is never written to disk.
    pub fn in_memory() -> PersonalWordList {
        PersonalWordList::default()
    }

    /// Reads the list at `path` if it exists. Changes are written back to
    /// `path`, creating its parent directory when needed.
    pub fn open<P: Into<PathBuf>>(path: P) -> Result<PersonalWordList, SpellerError> {
        let path = path.into();

        let words = match std::fs::read_to_string(&path) {
            Ok(data) => data
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(SmolStr::new)
                .collect(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashSet::new(),
            Err(e) => return Err(SpellerError::Io(path, e)),
        };

        debug!("Read {} words from {}", words.len(), path.display());

        Ok(PersonalWordList {
            words,
            path: Some(path),
        })
    }

    /// File the list is written to, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether `word` is in the list.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the list has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(|w| w.as_str())
    }

    /// Adds `word`, returning whether it was new.
    ///
    /// If the list cannot be written the word is not added.
    pub fn insert(&mut self, word: &str) -> Result<bool, SpellerError> {
        if !self.words.insert(SmolStr::new(word)) {
            return Ok(false);
        }

        if let Err(e) = self.save() {
            self.words.remove(word);
            return Err(e);
        }

        Ok(true)
    }

    /// Removes `word`, returning whether it was present.
    ///
    /// If the list cannot be written the word stays.
    pub fn remove(&mut self, word: &str) -> Result<bool, SpellerError> {
        if !self.words.remove(word) {
            return Ok(false);
        }

        if let Err(e) = self.save() {
            self.words.insert(SmolStr::new(word));
            return Err(e);
        }

        Ok(true)
    }

    fn save(&self) -> Result<(), SpellerError> {
        let path = match self.path.as_ref() {
            Some(path) => path,
            None => return Ok(()),
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SpellerError::Io(parent.to_path_buf(), e))?;
        }

        let mut words = self.words.iter().map(|w| w.as_str()).collect::<Vec<_>>();
        words.sort_unstable();

        let mut data = words.join("\n");
        data.push('\n');

        std::fs::write(path, data).map_err(|e| SpellerError::Io(path.clone(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("en_US.dic");

        let mut list = PersonalWordList::open(&path).unwrap();
        assert!(list.is_empty());
        assert!(list.insert("smartspell").unwrap());
        assert!(!list.insert("smartspell").unwrap());
        assert!(list.insert("Brexit").unwrap());

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Brexit\nsmartspell\n"
        );

        let mut list = PersonalWordList::open(&path).unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.contains("Brexit"));
        assert!(list.remove("Brexit").unwrap());
        assert!(!list.remove("Brexit").unwrap());

        let list = PersonalWordList::open(&path).unwrap();
        assert_eq!(list.iter().collect::<Vec<_>>(), vec!["smartspell"]);
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("en_US.exc");
        std::fs::write(&path, "# excluded\n\nteh\n  recieve \n").unwrap();

        let list = PersonalWordList::open(&path).unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.contains("teh"));
        assert!(list.contains("recieve"));
    }

    #[test]
    fn failed_write_leaves_list_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("en_US.dic");

        let mut list = PersonalWordList::open(&path).unwrap();
        assert!(list.insert("kept").unwrap());

        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        assert!(matches!(list.insert("word"), Err(SpellerError::Io(..))));
        assert!(!list.contains("word"));

        assert!(matches!(list.remove("kept"), Err(SpellerError::Io(..))));
        assert!(list.contains("kept"));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn in_memory_never_writes() {
        let mut list = PersonalWordList::in_memory();
        assert!(list.insert("word").unwrap());
        assert_eq!(list.path(), None);
        assert!(list.contains("word"));
    }
}
