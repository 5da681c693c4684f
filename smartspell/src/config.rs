//! Configuration for the speller, the embedding table and the re-ranker.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::embedding::VectorFormat;

/// Errors reading a configuration file.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The file could not be read
    #[error("Failed to read config '{0}'")]
    Io(PathBuf, #[source] std::io::Error),

    /// The file is not valid JSON for [`SmartSpellConfig`]
    #[error("Failed to parse config")]
    Parse(#[from] serde_json::Error),
}

/// Where the Hunspell dictionary and the personal word lists live.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryConfig {
    /// BCP 47 language tag, e.g. `en-US`
    pub tag: String,
    /// Explicit `.aff` file; its `.dic` sibling is loaded with it
    pub path: Option<PathBuf>,
    /// Directory for the personal word and exclude lists
    pub personal_dir: Option<PathBuf>,
    /// Maximum number of naive suggestions; `None` keeps all
    pub n_best: Option<usize>,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        DictionaryConfig {
            tag: "en-US".to_string(),
            path: None,
            personal_dir: None,
            n_best: None,
        }
    }
}

/// Where the word2vec table lives and how to read it.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Explicit table path, tried before the fallback locations
    pub path: Option<PathBuf>,
    /// On-disk layout; `auto` decides by file extension
    pub format: VectorFormat,
    /// Read only the first `limit` entries of the table
    pub limit: Option<usize>,
}

impl ModelConfig {
    /// Searches the fallback locations and auto-detects the format.
    pub const fn default() -> ModelConfig {
        ModelConfig {
            path: None,
            format: VectorFormat::Auto,
            limit: None,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig::default()
    }
}

/// How candidates are compared against the context word.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RankerConfig {
    /// Retry out-of-vocabulary words lowercased, then capitalised.
    pub case_fallback: bool,
}

impl RankerConfig {
    /// Exact-case lookups only.
    pub const fn default() -> RankerConfig {
        RankerConfig {
            case_fallback: false,
        }
    }
}

impl Default for RankerConfig {
    fn default() -> Self {
        RankerConfig::default()
    }
}

/// Everything needed to open a [`SmartSpeller`](crate::SmartSpeller).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SmartSpellConfig {
    /// Spelling dictionary
    pub dictionary: DictionaryConfig,
    /// Embedding table
    pub model: ModelConfig,
    /// Re-ranking options
    pub ranker: RankerConfig,
}

impl std::str::FromStr for SmartSpellConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<SmartSpellConfig, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }
}

impl SmartSpellConfig {
    /// Reads a JSON configuration file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<SmartSpellConfig, ConfigError> {
        let path = path.as_ref();
        let data =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        data.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_uses_defaults() {
        let config: SmartSpellConfig = r#"{
            "dictionary": { "tag": "en-GB", "n_best": 5 },
            "model": { "path": "/opt/vectors.txt", "format": "text" }
        }"#
        .parse()
        .unwrap();

        assert_eq!(config.dictionary.tag, "en-GB");
        assert_eq!(config.dictionary.n_best, Some(5));
        assert_eq!(config.dictionary.path, None);
        assert_eq!(config.model.path, Some(PathBuf::from("/opt/vectors.txt")));
        assert_eq!(config.model.format, VectorFormat::Text);
        assert_eq!(config.model.limit, None);
        assert!(!config.ranker.case_fallback);
    }

    #[test]
    fn empty_object_is_default() {
        let config: SmartSpellConfig = "{}".parse().unwrap();
        assert_eq!(config.dictionary.tag, "en-US");
        assert_eq!(config.model.format, VectorFormat::Auto);
    }

    #[test]
    fn bad_json() {
        assert!(matches!(
            "{ nope".parse::<SmartSpellConfig>(),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("smartspell.json");
        std::fs::write(&path, r#"{ "ranker": { "case_fallback": true } }"#).unwrap();

        let config = SmartSpellConfig::from_path(&path).unwrap();
        assert!(config.ranker.case_fallback);

        assert!(matches!(
            SmartSpellConfig::from_path(dir.path().join("missing.json")),
            Err(ConfigError::Io(..))
        ));
    }
}
