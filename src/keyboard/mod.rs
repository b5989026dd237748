//! On-screen keyboard: alphabets, modes and the key grid scanned row by row.

mod layout;
mod tables;

pub use layout::{grid_columns, grid_rows, keys_for_mode, KeyGrid};

use crate::config::Language;
use tables::{ENGLISH_FIRST_LETTERS, ENGLISH_LETTERS, SPANISH_LETTERS};

/// Which key set the Writing screen shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyboardMode {
    #[default]
    Normal,
    Emoji,
    Symbol,
    Numeric,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// Text inserted as typed (a letter, digit, symbol or emoji).
    Char(String),
    Backspace,
    Space,
    Emoji,
    Symbols,
    Numbers,
    Shift,
    Enter,
    Exit,
    /// Leave emoji/symbol/numeric mode.
    Back,
}

impl Key {
    pub fn label(&self) -> &str {
        match self {
            Key::Char(text) => text,
            Key::Backspace => "⇦",
            Key::Space => "␣",
            Key::Emoji => "😊",
            Key::Symbols => "Sym",
            Key::Numbers => "123",
            Key::Shift => "⇧",
            Key::Enter => "⏎",
            Key::Exit => "Exit",
            Key::Back => "←",
        }
    }
}

/// Special keys appended after the letters in normal mode.
pub const NORMAL_SPECIAL_KEYS: [Key; 8] = [
    Key::Backspace,
    Key::Space,
    Key::Emoji,
    Key::Symbols,
    Key::Numbers,
    Key::Shift,
    Key::Enter,
    Key::Exit,
];

/// Letter orders for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    letters: Vec<String>,
    first_letters: Vec<String>,
}

fn owned(letters: &[&str]) -> Vec<String> {
    letters.iter().map(|letter| letter.to_string()).collect()
}

fn split_chars(raw: &str) -> Vec<String> {
    raw.chars().map(String::from).collect()
}

impl Alphabet {
    pub fn english() -> Self {
        Self {
            letters: owned(ENGLISH_LETTERS),
            first_letters: owned(ENGLISH_FIRST_LETTERS),
        }
    }

    pub fn spanish() -> Self {
        Self {
            letters: owned(SPANISH_LETTERS),
            first_letters: owned(SPANISH_LETTERS),
        }
    }

    /// Custom alphabet; without `first_letters` the main order is used everywhere.
    pub fn custom(letters: &str, first_letters: Option<&str>) -> Self {
        Self {
            letters: split_chars(letters),
            first_letters: first_letters.map(split_chars).unwrap_or_default(),
        }
    }

    /// A custom language with no configured letters falls back to English.
    pub fn for_language(
        language: Language,
        custom_letters: Option<&str>,
        custom_first_letters: Option<&str>,
    ) -> Self {
        match (language, custom_letters) {
            (Language::English, _) => Self::english(),
            (Language::Spanish, _) => Self::spanish(),
            (Language::Custom, Some(letters)) if !letters.is_empty() => {
                Self::custom(letters, custom_first_letters)
            }
            (Language::Custom, _) => Self::english(),
        }
    }

    /// Letter order for the next key: word-initial order when a word is starting.
    pub fn letters_for(&self, word_start: bool) -> &[String] {
        if word_start && !self.first_letters.is_empty() {
            &self.first_letters
        } else {
            &self.letters
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_uses_first_letter_order_at_word_start() {
        let alphabet = Alphabet::english();
        assert_eq!(alphabet.letters_for(true)[0], "t");
        assert_eq!(alphabet.letters_for(false)[0], "e");
        assert_eq!(alphabet.letters_for(true).len(), 26);
    }

    #[test]
    fn spanish_includes_accented_letters() {
        let alphabet = Alphabet::for_language(Language::Spanish, None, None);
        assert!(alphabet.letters_for(false).iter().any(|l| l == "ñ"));
        assert_eq!(alphabet.letters_for(true), alphabet.letters_for(false));
    }

    #[test]
    fn custom_without_first_letters_uses_main_order() {
        let alphabet = Alphabet::for_language(Language::Custom, Some("xyz"), None);
        assert_eq!(alphabet.letters_for(true), ["x", "y", "z"]);

        let alphabet = Alphabet::for_language(Language::Custom, Some("xyz"), Some("zy"));
        assert_eq!(alphabet.letters_for(true), ["z", "y"]);
        assert_eq!(alphabet.letters_for(false), ["x", "y", "z"]);
    }

    #[test]
    fn custom_without_letters_falls_back_to_english() {
        let alphabet = Alphabet::for_language(Language::Custom, None, None);
        assert_eq!(alphabet, Alphabet::english());
    }
}
