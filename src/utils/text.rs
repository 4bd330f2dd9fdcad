use std::collections::HashSet;

/// Lowercase one character, keeping it a single character.
///
/// Characters whose lowercase form spans several scalars (`İ`) keep only the
/// first one, so folding never changes a word's length.
#[must_use]
pub fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Normalize a draft guess word (trimmed, lowercase per character)
#[must_use]
pub fn normalize_guess(word: &str) -> String {
    word.trim().chars().map(fold_char).collect()
}

/// Number of characters in a normalized word
#[must_use]
pub fn char_len(word: &str) -> usize {
    word.chars().count()
}

/// Check that a phrase uses every distinct letter of the guess word.
///
/// The guess is normalized first; an empty guess never validates. Letter
/// order and repeat counts in the phrase do not matter.
#[must_use]
pub fn phrase_contains_letters(guess: &str, phrase: &str) -> bool {
    let guess = normalize_guess(guess);
    if guess.is_empty() {
        return false;
    }

    let phrase_letters: HashSet<char> = phrase.chars().map(fold_char).collect();
    guess.chars().all(|c| phrase_letters.contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_guess() {
        assert_eq!(normalize_guess("  SMoke \n"), "smoke");
        assert_eq!(normalize_guess(""), "");
    }

    #[test]
    fn test_phrase_with_all_letters() {
        assert!(phrase_contains_letters(
            "smoke",
            "Something makes our knowledge evolve"
        ));
    }

    #[test]
    fn test_phrase_missing_letters() {
        assert!(!phrase_contains_letters("smoke", "aaa bbb ccc"));
        assert!(!phrase_contains_letters("smoke", "smok"));
    }

    #[test]
    fn test_repeated_guess_letters_need_one_occurrence() {
        assert!(phrase_contains_letters("geese", "green sea"));
    }

    #[test]
    fn test_folding_keeps_length() {
        let word = normalize_guess("İSTANBUL");
        assert_eq!(word, "istanbul");
        assert_eq!(char_len(&word), char_len("İSTANBUL"));
        assert!(phrase_contains_letters("İSTANBUL", "Istanbul is busy at night"));
    }

    #[test]
    fn test_empty_guess_never_validates() {
        assert!(!phrase_contains_letters("   ", "anything at all"));
    }

    #[test]
    fn test_char_len_counts_scalars() {
        assert_eq!(char_len("café"), 4);
    }
}
