//! Re-ranking of spelling candidates by semantic closeness to a
//! neighboring word.
//!
//! Candidates without a vector are compared as the zero vector
//! ([`ZERO_VECTOR_FALLBACK`]): they get a distance of 1 and sink towards
//! the bottom of the ranking instead of being dropped. A context word
//! without a vector gives no distances at all.
use log::warn;

pub mod suggestion;

pub use self::suggestion::{ScoredSuggestions, Suggestion};
use self::suggestion::cmp_distance;
use crate::config::RankerConfig;
use crate::constants::ZERO_VECTOR_FALLBACK;
use crate::embedding::similarity::cosine_distances;
use crate::embedding::Embeddings;
use crate::tokenizer::case_handling::word_variants;

/// Vector for `word`, trying its case variants when `config.case_fallback`
/// is set.
pub fn lookup<'e, E>(embeddings: &'e E, word: &str, config: &RankerConfig) -> Option<&'e [f32]>
where
    E: Embeddings + ?Sized,
{
    if let Some(vector) = embeddings.vector(word) {
        return Some(vector);
    }

    if !config.case_fallback {
        return None;
    }

    word_variants(word)
        .iter()
        .find_map(|variant| embeddings.vector(variant))
}

/// Cosine distance from `context` to each candidate, in candidate order.
///
/// Returns `None` when `context` is out of vocabulary.
pub fn distances<E, S>(
    embeddings: &E,
    context: &str,
    candidates: &[S],
    config: &RankerConfig,
) -> Option<Vec<f32>>
where
    E: Embeddings + ?Sized,
    S: AsRef<str>,
{
    let target = match lookup(embeddings, context, config) {
        Some(v) => v,
        None => {
            warn!("Context word {:?} not in vocabulary", context);
            return None;
        }
    };

    let zero = vec![ZERO_VECTOR_FALLBACK; embeddings.dimensions()];

    let vectors = candidates
        .iter()
        .map(|candidate| {
            let candidate = candidate.as_ref();
            lookup(embeddings, candidate, config).unwrap_or_else(|| {
                warn!("Word {:?} not in vocabulary, using zero vector", candidate);
                &zero[..]
            })
        })
        .collect::<Vec<&[f32]>>();

    Some(cosine_distances(target, &vectors))
}

/// Pairs candidates with their distances and sorts them ascending.
///
/// The sort is stable, so equally distant candidates keep the speller's
/// order; undefined distances go last.
pub fn rank<S: AsRef<str>>(candidates: &[S], distances: &[f32]) -> Vec<Suggestion> {
    let mut ranked = candidates
        .iter()
        .zip(distances.iter())
        .map(|(candidate, distance)| Suggestion::new(candidate.as_ref().into(), *distance))
        .collect::<Vec<_>>();

    ranked.sort_by(|a, b| cmp_distance(a.distance, b.distance));
    ranked
}

/// Scores ranked suggestions, dropping those with an undefined distance.
pub fn scored(ranked: &[Suggestion]) -> ScoredSuggestions {
    ranked
        .iter()
        .filter_map(|s| s.score().map(|score| (s.value.clone(), score)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::word2vec::tests::FIXTURE;
    use crate::embedding::Word2Vec;

    fn table() -> Word2Vec {
        Word2Vec::from_vectors(3, FIXTURE.iter().map(|(w, v)| (*w, v.to_vec()))).unwrap()
    }

    #[test]
    fn closest_first() {
        let table = table();
        let candidates = ["jacket", "jokes", "joke"];

        let d = distances(&table, "clown", &candidates, &RankerConfig::default()).unwrap();
        let ranked = rank(&candidates, &d);

        assert_eq!(
            ranked.iter().map(|s| s.value()).collect::<Vec<_>>(),
            vec!["joke", "jokes", "jacket"]
        );
        assert!(ranked.windows(2).all(|w| w[0].distance <= w[1].distance));
    }

    #[test]
    fn unknown_candidate_is_kept_and_neutral() {
        let table = table();
        let candidates = ["joak", "joke"];

        let d = distances(&table, "clown", &candidates, &RankerConfig::default()).unwrap();
        assert_eq!(d[0], 1.0);

        let ranked = rank(&candidates, &d);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[1].value(), "joak");
        assert_eq!(ranked[1].score(), Some(0));
    }

    #[test]
    fn unknown_context() {
        let table = table();
        assert_eq!(
            distances(&table, "trapeze", &["joke"], &RankerConfig::default()),
            None
        );
    }

    #[test]
    fn case_fallback() {
        let table = table();
        let strict = RankerConfig::default();
        let relaxed = RankerConfig {
            case_fallback: true,
        };

        assert_eq!(lookup(&table, "Clown", &strict), None);
        assert_eq!(lookup(&table, "Clown", &relaxed), table.vector("clown"));
        assert_eq!(lookup(&table, "CLOWN", &relaxed), table.vector("clown"));
        assert!(distances(&table, "CLOWN", &["Joke"], &relaxed).unwrap()[0] < 0.1);
    }

    #[test]
    fn ties_keep_speller_order() {
        let ranked = rank(&["b", "a", "c"], &[0.5, 0.5, 0.1]);
        assert_eq!(
            ranked.iter().map(|s| s.value()).collect::<Vec<_>>(),
            vec!["c", "b", "a"]
        );
    }

    #[test]
    fn scored_drops_undefined() {
        let ranked = rank(&["a", "b", "c"], &[f32::NAN, 0.25, 1.5]);
        let scored = scored(&ranked);

        assert_eq!(
            scored.iter().collect::<Vec<_>>(),
            vec![("b", 75), ("c", 0)]
        );
    }
}
