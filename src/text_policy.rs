//! Casing, spacing and punctuation rules applied to committed keys and words.

/// Characters that end a sentence.
pub const SENTENCE_ENDINGS: [char; 3] = ['.', '!', '?'];

/// Punctuation that attaches to the previous word and is followed by a space.
pub const SPACED_PUNCTUATION: [char; 11] = ['.', ',', '!', '?', '\'', '"', ':', ';', ')', ']', '}'];

/// Punctuation that attaches to the previous word with no trailing space.
pub const OPENING_PUNCTUATION: [char; 3] = ['(', '{', '['];

/// Inputs to [`apply_capitalization_policy`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapsContext {
    pub sentence_start: bool,
    /// One-shot shift armed by the Shift key or an inverted Spanish mark.
    pub shift: bool,
    pub caps_lock: bool,
}

impl CapsContext {
    pub fn for_text(text: &str, shift: bool, caps_lock: bool) -> Self {
        Self {
            sentence_start: is_at_sentence_start(text),
            shift,
            caps_lock,
        }
    }

    /// Whether `word` comes out capitalized under this context.
    pub fn capitalizes(&self, word: &str) -> bool {
        let wants = self.sentence_start || self.shift || self.caps_lock;
        wants && word.chars().next().is_some_and(char::is_alphabetic)
    }
}

/// Capitalize the first letter when the context asks for it, otherwise lowercase
/// the whole word.
pub fn apply_capitalization_policy(word: &str, ctx: &CapsContext) -> String {
    if !ctx.capitalizes(word) {
        return word.to_lowercase();
    }
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn is_at_sentence_start(text: &str) -> bool {
    match text.trim_end().chars().last() {
        None => true,
        Some(last) => SENTENCE_ENDINGS.contains(&last),
    }
}

pub fn is_at_word_start(text: &str) -> bool {
    text.trim_end().is_empty() || text.ends_with(char::is_whitespace)
}

fn single_char(token: &str) -> Option<char> {
    let mut chars = token.chars();
    let ch = chars.next()?;
    chars.next().is_none().then_some(ch)
}

/// Single punctuation characters that attach to the preceding word.
pub fn is_punctuation(token: &str) -> bool {
    single_char(token)
        .is_some_and(|ch| SPACED_PUNCTUATION.contains(&ch) || OPENING_PUNCTUATION.contains(&ch))
}

pub fn adds_space_after(token: &str) -> bool {
    single_char(token).is_some_and(|ch| SPACED_PUNCTUATION.contains(&ch))
}

/// Last whitespace-separated token of `text`, empty when there is none.
pub fn current_word(text: &str) -> &str {
    text.split_whitespace().last().unwrap_or("")
}

/// Part of `suggested` not already typed in `current`, comparing case-insensitively.
pub fn missing_characters<'a>(current: &str, suggested: &'a str) -> &'a str {
    let mut split_at = suggested.len();
    let mut typed = current.chars();
    for (idx, ch) in suggested.char_indices() {
        match typed.next() {
            Some(prev) if prev.to_lowercase().eq(ch.to_lowercase()) => {}
            _ => {
                split_at = idx;
                break;
            }
        }
    }
    &suggested[split_at..]
}

/// Spanish opens questions and exclamations with an inverted mark.
pub fn spanish_opening_mark(ch: char, text: &str) -> Option<char> {
    if !is_at_sentence_start(text) {
        return None;
    }
    match ch {
        '?' => Some('¿'),
        '!' => Some('¡'),
        _ => None,
    }
}

/// The last two sentences of `text`, for a compact transcript line.
pub fn display_tail(text: &str) -> String {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut prev: Option<char> = None;
    let mut iter = text.char_indices().peekable();
    while let Some((idx, ch)) = iter.next() {
        if ch.is_whitespace() && prev.is_some_and(|p| SENTENCE_ENDINGS.contains(&p)) {
            sentences.push(&text[start..idx]);
            let mut end = idx + ch.len_utf8();
            while let Some(&(next_idx, next)) = iter.peek() {
                if !next.is_whitespace() {
                    break;
                }
                end = next_idx + next.len_utf8();
                iter.next();
            }
            start = end;
            prev = None;
            continue;
        }
        prev = Some(ch);
    }
    sentences.push(&text[start..]);
    let keep = sentences.len().saturating_sub(2);
    sentences[keep..].join(" ")
}
