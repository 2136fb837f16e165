//! Content filter: blocks messages containing banned terms.
//!
//! The check runs on the lower-cased RAW text, not the normalized form, so
//! punctuation inside multi-word banned phrases still matches literally.

use crate::knowledge::BannedWordSet;

/// Returns true if `text` contains any banned term.
///
/// Terms with an internal space match as literal substrings. Single-word
/// terms match only at word boundaries, where a word character is Unicode
/// alphanumeric or `_` and a boundary is a word/non-word transition anchored
/// to the term's own edge characters: a term starting or ending with a
/// non-word character (like `cat!`) needs a WORD character on that side, the
/// usual regex `\b` rule. Result is independent of term order; empty terms
/// are ignored.
pub fn contains_banned(text: &str, banned: &BannedWordSet) -> bool {
    let lowered = text.to_lowercase();
    banned.terms().iter().any(|term| {
        if term.is_empty() {
            false
        } else if term.contains(' ') {
            lowered.contains(term.as_str())
        } else {
            contains_word(&lowered, term)
        }
    })
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Substring search constrained to word boundaries on both sides.
///
/// A boundary holds when the word-ness of the term's edge character differs
/// from the word-ness of its neighbor (string ends count as non-word).
fn contains_word(haystack: &str, needle: &str) -> bool {
    let Some(first) = needle.chars().next() else {
        return false;
    };
    let last = needle.chars().next_back().unwrap_or(first);
    let mut start = 0;
    while let Some(found) = haystack[start..].find(needle) {
        let begin = start + found;
        let end = begin + needle.len();
        let prev_is_word = haystack[..begin]
            .chars()
            .next_back()
            .map_or(false, is_word_char);
        let next_is_word = haystack[end..].chars().next().map_or(false, is_word_char);
        if is_word_char(first) != prev_is_word && is_word_char(last) != next_is_word {
            return true;
        }
        // advance one char past the failed hit to catch overlapping positions
        start = begin
            + haystack[begin..]
                .chars()
                .next()
                .map_or(1, |c| c.len_utf8());
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(terms: &[&str]) -> BannedWordSet {
        let mut s = BannedWordSet::new();
        for t in terms {
            s.add(t);
        }
        s
    }

    #[test]
    fn single_word_matches_whole_words_only() {
        let banned = set(&["cat"]);
        assert!(contains_banned("I have a cat", &banned));
        assert!(contains_banned("cat", &banned));
        assert!(contains_banned("a cat!", &banned));
        assert!(!contains_banned("scatter", &banned));
        assert!(!contains_banned("I love cats", &banned));
        assert!(!contains_banned("cat_food", &banned));
    }

    #[test]
    fn match_is_case_insensitive() {
        let banned = set(&["cat"]);
        assert!(contains_banned("A CAT appeared", &banned));
    }

    #[test]
    fn multi_word_phrase_matches_as_literal_substring() {
        let banned = set(&["cat fish"]);
        assert!(contains_banned("good cat fish here", &banned));
        assert!(contains_banned("bobcat fishing", &banned));
        assert!(!contains_banned("goodcatfish", &banned));
    }

    #[test]
    fn empty_set_and_empty_terms_never_match() {
        assert!(!contains_banned("anything", &BannedWordSet::new()));
        let banned = set(&["", "   "]);
        assert!(!contains_banned("anything", &banned));
    }

    #[test]
    fn punctuation_edged_term_anchors_boundary_to_its_own_edges() {
        // "!" is a non-word edge, so that side needs a word character
        let banned = set(&["cat!"]);
        assert!(contains_banned("a cat!x", &banned));
        assert!(!contains_banned("a cat! here", &banned));
        assert!(!contains_banned("see cat!", &banned));
    }

    #[test]
    fn later_occurrence_found_after_non_boundary_hit() {
        // first "cat" is embedded in "scatter", second stands alone
        let banned = set(&["cat"]);
        assert!(contains_banned("scatter the cat", &banned));
    }
}
