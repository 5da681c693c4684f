//! Case variants of words, used to retry embedding lookups.
use itertools::Itertools;
use smol_str::SmolStr;

/// Lowercases every character.
#[inline(always)]
pub fn lower_case(s: &str) -> SmolStr {
    s.chars()
        .map(|c| c.to_lowercase().collect::<String>())
        .collect::<SmolStr>()
}

/// Uppercases the first character, leaving the rest untouched.
#[inline(always)]
pub fn upper_first(s: &str) -> SmolStr {
    let mut c = s.chars();
    match c.next() {
        None => SmolStr::new(""),
        Some(f) => SmolStr::from(f.to_uppercase().collect::<String>() + c.as_str()),
    }
}

/// Alternative spellings tried when `word` itself has no vector:
/// all lowercase, then lowercase with an upper-case first letter.
/// The word itself is never included.
pub fn word_variants(word: &str) -> Vec<SmolStr> {
    let lower = lower_case(word);
    let capitalised = upper_first(&lower);

    std::iter::once(lower)
        .chain(std::iter::once(capitalised))
        .filter(|v| v != word)
        .unique()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants() {
        assert_eq!(word_variants("CLOWN"), vec!["clown", "Clown"]);
        assert_eq!(word_variants("Clown"), vec!["clown"]);
        assert_eq!(word_variants("clown"), vec!["Clown"]);
        assert!(word_variants("").is_empty());
        assert!(word_variants("42").is_empty());
    }

    #[test]
    fn non_ascii() {
        assert_eq!(upper_first("ávvir"), "Ávvir");
        assert_eq!(lower_case("DAVVEVÁSSJÁN"), "davvevássján");
    }
}
