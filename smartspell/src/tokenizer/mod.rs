//! Word tokenization for running text.
use unic_segment::WordBoundIndices;

pub mod case_handling;

/// Iterator over `(byte offset, word)` pairs of the words in a string.
pub struct WordIndices<'a> {
    inner: WordBoundIndices<'a>,
}

impl<'a> Iterator for WordIndices<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .by_ref()
            .find(|(_, token)| token.chars().any(|ch| ch.is_alphanumeric()))
    }
}

/// Word segmentation for string slices.
pub trait Tokenize {
    /// Every word-boundary segment, including whitespace and punctuation.
    fn word_bound_indices(&self) -> WordBoundIndices;

    /// Only the segments containing at least one alphanumeric character.
    fn word_indices(&self) -> WordIndices;
}

impl Tokenize for str {
    fn word_bound_indices(&self) -> WordBoundIndices {
        WordBoundIndices::new(self)
    }

    fn word_indices(&self) -> WordIndices {
        WordIndices {
            inner: WordBoundIndices::new(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_only() {
        let msg = "The clown told a joket, and everyone laughed!";

        assert_eq!(
            msg.word_indices().collect::<Vec<_>>(),
            vec![
                (0, "The"),
                (4, "clown"),
                (10, "told"),
                (15, "a"),
                (17, "joket"),
                (24, "and"),
                (28, "everyone"),
                (37, "laughed"),
            ]
        );
    }

    #[test]
    fn bounds_keep_everything() {
        let msg = "a joket.";
        let joined: String = msg.word_bound_indices().map(|(_, s)| s).collect();
        assert_eq!(joined, msg);
    }

    #[test]
    fn no_words() {
        assert_eq!(" ... !? ".word_indices().next(), None);
    }
}
