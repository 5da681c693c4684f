/// Vector used for a candidate that has no embedding. Every cosine similarity
/// against the zero vector is 0, so such a candidate sits at distance 1.
pub const ZERO_VECTOR_FALLBACK: f32 = 0.0;

/// File name of the pre-trained table looked up in the fallback locations.
pub const DEFAULT_MODEL_FILE: &str = "GoogleNews-vectors-negative300.bin";

/// Directory under the user's home holding the default model.
pub const MODEL_HOME_DIR: &str = ".smartspell";

/// Directory under the platform config dir holding personal word lists.
pub const PERSONAL_DIR: &str = "smartspell";

/// Environment variable naming the embedding table.
pub const MODEL_ENV_VAR: &str = "SMARTSPELL_MODEL";
/// Environment variable with extra dictionary directories, `PATH`-style.
pub const DICT_PATH_ENV_VAR: &str = "SMARTSPELL_DICT_PATH";

/// Extension of the personal word list.
pub const PERSONAL_WORDS_EXT: &str = "dic";
/// Extension of the personal exclude list.
pub const EXCLUDED_WORDS_EXT: &str = "exc";

/// Largest edit distance at which personal words are offered as suggestions.
pub const PERSONAL_SUGGEST_DISTANCE: usize = 2;

/// Lowest closeness score.
pub const MIN_SCORE: u8 = 0;
/// Highest closeness score.
pub const MAX_SCORE: u8 = 100;

/// Longest word accepted while reading a binary word2vec table.
pub const MAX_WORD_BYTES: usize = 1024;
