/*! Context-aware spelling suggestions.

A Hunspell dictionary proposes candidate corrections for a misspelled word;
a table of pre-trained word embeddings then orders those candidates by how
close in meaning each one is to a neighboring word of the text. For
"joket" next to "clown", "joke" comes out ahead of "jacket".

# Usage examples

```no_run
use smartspell::{SmartSpellConfig, SmartSpeller};

let config = SmartSpellConfig::default();
let smart = SmartSpeller::open(&config)?;

for word in smart.smart_suggest("joket", "clown") {
    println!("{}", word);
}

for (word, score) in smart.smart_suggest_with_scores("joket", "clown") {
    println!("{} {}", word, score);
}
# Ok::<(), smartspell::SmartSpellError>(())
```

Further examples of how to use the library can be found in
`smartspell-bin` in the same repository.
*/

#![warn(missing_docs)]
pub mod config;
pub mod embedding;
pub mod paths;
pub mod ranker;
pub mod smart;
pub mod speller;
pub mod tokenizer;

pub(crate) mod constants;

pub use config::{DictionaryConfig, ModelConfig, RankerConfig, SmartSpellConfig};
pub use embedding::{Embeddings, VectorFormat, Word2Vec};
pub use ranker::{ScoredSuggestions, Suggestion};
pub use smart::error::SmartSpellError;
pub use smart::{Correction, SmartSpeller};
pub use speller::{HunspellSpeller, Speller};

/// Sets up `env_logger` for programs embedding the library, filtered by
/// `RUST_LOG`.
#[cfg(feature = "logging")]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .try_init();
}
