//! Letter orders and secondary key sets.

/// English letters by overall frequency.
pub(super) const ENGLISH_LETTERS: &[&str] = &[
    "e", "t", "a", "o", "i", "n", "s", "h", "r", "d", "l", "c", "u", "m", "w", "f", "g", "y", "p",
    "b", "v", "k", "j", "x", "q", "z",
];

/// English letters by frequency as the first letter of a word.
pub(super) const ENGLISH_FIRST_LETTERS: &[&str] = &[
    "t", "a", "o", "i", "s", "w", "c", "b", "p", "h", "f", "m", "d", "r", "e", "l", "n", "g", "u",
    "k", "v", "y", "j", "q", "z", "x",
];

pub(super) const SPANISH_LETTERS: &[&str] = &[
    "e", "a", "o", "s", "r", "n", "i", "d", "l", "t", "c", "u", "m", "p", "b", "h", "g", "y", "v",
    "q", "ó", "í", "f", "x", "á", "j", "z", "é", "ñ", "ú", "w", "k",
];

/// Punctuation offered next to the letters in normal mode.
pub(super) const MAIN_PUNCTUATION: &[&str] = &[".", ",", "!", "?", "\""];

pub(super) const EMOJIS: &[&str] = &[
    "😂", "❤️", "😍", "😊", "🙏", "😭", "👍", "😅", "👏", "😁", "🔥", "💔", "😢", "🤔", "😆", "🙄",
    "💪", "😉", "👌", "🤗", "😔", "😎", "😇", "🤦", "🎉", "✨", "🤷", "😱", "😌", "🌸", "🙌", "😏",
    "💯", "🙈", "👀",
];

pub(super) const NUMBERS: &[&str] = &[
    "1", "4", "2", "7", "5", "3", "8", "6", "0", "9", "+", "-", "*", "/",
];

pub(super) const SYMBOLS: &[&str] = &[
    ":", ";", "&", "@", "#", "$", "%", "=", "[", "]", "{", "}", "(", ")", "<", ">", "^", "'",
    "\\", "/", "|", "_", "~", "`",
];

/// Emoji grid width.
pub(super) const EMOJI_COLUMNS: usize = 6;
