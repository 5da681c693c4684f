//! Locations searched for embedding tables, Hunspell dictionaries and
//! personal word lists.
use std::path::{Path, PathBuf};

use language_tags::LanguageTag;

use crate::constants::{
    DEFAULT_MODEL_FILE, DICT_PATH_ENV_VAR, MODEL_ENV_VAR, MODEL_HOME_DIR, PERSONAL_DIR,
};

/// Candidate embedding table paths, in search order:
///
/// 1. the explicit path, if given
/// 2. `$SMARTSPELL_MODEL`
/// 3. `~/.smartspell/GoogleNews-vectors-negative300.bin`
/// 4. `GoogleNews-vectors-negative300.bin` in the current directory
pub fn model_search_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(p) = explicit {
        paths.push(p.to_path_buf());
    }

    if let Some(p) = std::env::var_os(MODEL_ENV_VAR) {
        paths.push(PathBuf::from(p));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(MODEL_HOME_DIR).join(DEFAULT_MODEL_FILE));
    }

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(DEFAULT_MODEL_FILE));
    }

    paths
}

/// Find the embedding table, see [`model_search_paths`].
pub fn find_model_path(explicit: Option<&Path>) -> Option<PathBuf> {
    model_search_paths(explicit)
        .into_iter()
        .find(|p| p.is_file())
}

/// Directories searched for Hunspell dictionaries.
pub fn dictionary_search_dirs() -> Vec<PathBuf> {
    let mut search = Vec::new();

    if let Some(p) = std::env::var_os(DICT_PATH_ENV_VAR) {
        search.extend(std::env::split_paths(&p));
    }

    if let Some(data) = dirs::data_dir() {
        search.push(data.join("hunspell"));
    }

    #[cfg(target_os = "macos")]
    if let Some(home) = dirs::home_dir() {
        search.push(home.join("Library").join("Spelling"));
    }

    #[cfg(target_os = "macos")]
    search.push(PathBuf::from("/Library/Spelling"));

    #[cfg(unix)]
    {
        search.push(PathBuf::from("/usr/share/hunspell"));
        search.push(PathBuf::from("/usr/share/myspell"));
        search.push(PathBuf::from("/usr/share/myspell/dicts"));
    }

    search
}

/// Hunspell file stem for a language tag: `en-US` becomes `en_US`.
pub fn dictionary_stem(tag: &LanguageTag) -> String {
    tag.as_str().replace('-', "_")
}

/// Find the `.aff` file for the given language tag.
///
/// The matching `.dic` file is expected next to it. Only the first two
/// directory levels of each search directory are walked.
pub fn find_dictionary_path(tag: &LanguageTag) -> Option<PathBuf> {
    let pattern = format!("{}.aff", dictionary_stem(tag));

    dictionary_search_dirs()
        .into_iter()
        .filter(|dir| dir.is_dir())
        .find_map(|dir| {
            globwalk::GlobWalkerBuilder::new(dir, &pattern)
                .max_depth(2)
                .build()
                .ok()?
                .into_iter()
                .filter_map(Result::ok)
                .map(|entry| entry.path().to_path_buf())
                .find(|aff| aff.with_extension("dic").is_file())
        })
}

/// Default directory for personal word lists (`$CONFIG/smartspell`).
pub fn personal_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(PERSONAL_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_model_first() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vectors.bin");

        let paths = model_search_paths(Some(&path));
        assert_eq!(paths[0], path);
        assert!(paths
            .iter()
            .skip(1)
            .any(|p| p.ends_with(DEFAULT_MODEL_FILE)));

        std::fs::write(&path, b"0 1\n").unwrap();
        assert_eq!(find_model_path(Some(&path)), Some(path));
    }

    #[test]
    fn stem() {
        let tag = LanguageTag::parse("en-US").unwrap();
        assert_eq!(dictionary_stem(&tag), "en_US");

        let tag = LanguageTag::parse("se").unwrap();
        assert_eq!(dictionary_stem(&tag), "se");
    }
}
