//! Wordle-style letter feedback.

use std::collections::HashMap;

use crate::entities::Mark;
use crate::utils::fold_char;

/// Compute per-letter marks for `guess` against `goal`.
///
/// Case-insensitive per character, two passes:
/// 1. exact position matches are `Correct`; every other goal letter at a
///    guessed position goes into a pool of remaining letters;
/// 2. each non-correct guess letter takes one matching letter from the pool
///    (`Present`) or gets `Absent`.
///
/// The result always has one mark per guess character. Positions past the
/// end of either word never match and add nothing to the pool.
#[must_use]
pub fn marks(guess: &str, goal: &str) -> Vec<Mark> {
    let guess: Vec<char> = guess.chars().map(fold_char).collect();
    let goal: Vec<char> = goal.chars().map(fold_char).collect();

    let mut result = vec![Mark::Absent; guess.len()];
    let mut remaining: HashMap<char, usize> = HashMap::new();

    for (index, (mark, letter)) in result.iter_mut().zip(&guess).enumerate() {
        match goal.get(index) {
            Some(target) if target == letter => *mark = Mark::Correct,
            Some(target) => *remaining.entry(*target).or_default() += 1,
            None => {}
        }
    }

    for (mark, letter) in result.iter_mut().zip(&guess) {
        if *mark == Mark::Correct {
            continue;
        }
        if let Some(count) = remaining.get_mut(letter)
            && *count > 0
        {
            *count -= 1;
            *mark = Mark::Present;
        }
    }

    result
}

/// Whether a mark sequence solves the round
#[must_use]
pub fn is_solved(marks: &[Mark]) -> bool {
    !marks.is_empty() && marks.iter().all(|mark| *mark == Mark::Correct)
}

/// Compact rendering, e.g. `GG..G`
#[must_use]
pub fn render(marks: &[Mark]) -> String {
    marks.iter().map(|mark| mark.symbol()).collect()
}
