//! Ranked and scored spelling corrections.
use std::cmp::Ordering;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use smol_str::SmolStr;

use crate::constants::{MAX_SCORE, MIN_SCORE};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// Candidate correction with its cosine distance to the context word
pub struct Suggestion {
    /// the suggested word-form
    pub value: SmolStr,
    /// cosine distance to the context word, NaN if undefined
    pub distance: f32,
}

impl Suggestion {
    /// creates a ranked suggestion
    pub fn new(value: SmolStr, distance: f32) -> Suggestion {
        Suggestion { value, distance }
    }

    /// gets the suggested word-form
    pub fn value(&self) -> &str {
        &self.value
    }

    /// gets the cosine distance to the context word
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// gets the closeness percentage, or `None` if the distance is undefined
    pub fn score(&self) -> Option<u8> {
        score(self.distance)
    }
}

/// Maps a cosine distance to `round((1 - distance) * 100)`, clamped to
/// `0..=100`. Undefined distances have no score.
pub fn score(distance: f32) -> Option<u8> {
    if distance.is_nan() {
        return None;
    }

    let pct = ((1.0 - distance) * 100.0).round();
    Some(pct.clamp(MIN_SCORE as f32, MAX_SCORE as f32) as u8)
}

/// Orders distances ascending, with NaN after every number.
pub fn cmp_distance(a: f32, b: f32) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Candidate → score mapping that iterates best-first.
///
/// Each candidate appears once; inserting a candidate again keeps the first
/// score.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoredSuggestions {
    entries: Vec<(SmolStr, u8)>,
}

impl ScoredSuggestions {
    /// An empty mapping.
    pub fn new() -> ScoredSuggestions {
        ScoredSuggestions::default()
    }

    /// Appends `word` unless already present, returning whether it was added.
    pub fn insert(&mut self, word: SmolStr, score: u8) -> bool {
        if self.contains(&word) {
            return false;
        }
        self.entries.push((word, score));
        true
    }

    /// Score of `word`, if it was suggested.
    pub fn get(&self, word: &str) -> Option<u8> {
        self.entries
            .iter()
            .find(|(w, _)| w == word)
            .map(|(_, score)| *score)
    }

    /// Whether `word` was suggested.
    pub fn contains(&self, word: &str) -> bool {
        self.get(word).is_some()
    }

    /// Number of suggestions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no suggestions.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(word, score)` pairs, best first.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u8)> {
        self.entries.iter().map(|(w, s)| (w.as_str(), *s))
    }

    /// Suggested words, best first.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(w, _)| w)
    }
}

impl IntoIterator for ScoredSuggestions {
    type Item = (SmolStr, u8);
    type IntoIter = std::vec::IntoIter<(SmolStr, u8)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<S: Into<SmolStr>> FromIterator<(S, u8)> for ScoredSuggestions {
    fn from_iter<I: IntoIterator<Item = (S, u8)>>(iter: I) -> Self {
        let mut out = ScoredSuggestions::new();
        for (word, score) in iter {
            out.insert(word.into(), score);
        }
        out
    }
}

impl Serialize for ScoredSuggestions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (word, score) in &self.entries {
            map.serialize_entry(word.as_str(), score)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores() {
        assert_eq!(score(0.0), Some(100));
        assert_eq!(score(0.123), Some(88));
        assert_eq!(score(0.125), Some(88));
        assert_eq!(score(1.0), Some(0));
        assert_eq!(score(1.6), Some(0));
        assert_eq!(score(2.0), Some(0));
        assert_eq!(score(-0.000_01), Some(100));
        assert_eq!(score(f32::NAN), None);
    }

    #[test]
    fn nan_sorts_last() {
        let mut v = vec![f32::NAN, 0.4, -f32::NAN, 0.1, 1.0];
        v.sort_by(|a, b| cmp_distance(*a, *b));
        assert_eq!(&v[..3], &[0.1, 0.4, 1.0]);
        assert!(v[3].is_nan() && v[4].is_nan());
    }

    #[test]
    fn mapping_keeps_first_and_order() {
        let scored: ScoredSuggestions = vec![("joke", 91), ("jokes", 80), ("joke", 10)]
            .into_iter()
            .collect();

        assert_eq!(scored.len(), 2);
        assert_eq!(scored.get("joke"), Some(91));
        assert_eq!(scored.words().collect::<Vec<_>>(), vec!["joke", "jokes"]);
        assert_eq!(scored.get("jacket"), None);
    }

    #[test]
    fn serializes_as_ordered_map() {
        let scored: ScoredSuggestions = vec![("jokes", 80), ("joke", 91)].into_iter().collect();
        assert_eq!(
            serde_json::to_string(&scored).unwrap(),
            r#"{"jokes":80,"joke":91}"#
        );
    }
}
