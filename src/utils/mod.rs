pub mod text;

pub use text::{char_len, fold_char, normalize_guess, phrase_contains_letters};
