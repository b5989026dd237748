use super::tables::{EMOJIS, EMOJI_COLUMNS, MAIN_PUNCTUATION, NUMBERS, SYMBOLS};
use super::{Alphabet, Key, KeyboardMode, NORMAL_SPECIAL_KEYS};

/// Rows of keys; `None` pads a short last row and is never selectable.
pub type KeyGrid = Vec<Vec<Option<Key>>>;

fn chars(table: &'static [&'static str]) -> impl Iterator<Item = Key> {
    table.iter().map(|text| Key::Char(text.to_string()))
}

/// Keys shown in `mode`, in scan order.
pub fn keys_for_mode(mode: KeyboardMode, alphabet: &Alphabet, word_start: bool) -> Vec<Key> {
    let mut keys: Vec<Key> = match mode {
        KeyboardMode::Normal => {
            let mut keys: Vec<Key> = alphabet
                .letters_for(word_start)
                .iter()
                .map(|letter| Key::Char(letter.clone()))
                .collect();
            keys.extend(chars(MAIN_PUNCTUATION));
            keys.extend(NORMAL_SPECIAL_KEYS);
            return keys;
        }
        KeyboardMode::Emoji => chars(EMOJIS).collect(),
        KeyboardMode::Symbol => chars(SYMBOLS).collect(),
        KeyboardMode::Numeric => chars(NUMBERS).collect(),
    };
    keys.push(Key::Back);
    keys
}

/// Columns for a near-square grid; the emoji grid has a fixed width.
pub fn grid_columns(mode: KeyboardMode, key_count: usize) -> usize {
    if mode == KeyboardMode::Emoji {
        return EMOJI_COLUMNS;
    }
    let mut columns = 1;
    while columns * columns < key_count {
        columns += 1;
    }
    columns
}

/// Chunk `keys` into rows of `columns`, padding the last row.
pub fn grid_rows(keys: Vec<Key>, columns: usize) -> KeyGrid {
    let columns = columns.max(1);
    let mut rows: KeyGrid = Vec::with_capacity(keys.len().div_ceil(columns));
    for key in keys {
        match rows.last_mut() {
            Some(row) if row.len() < columns => row.push(Some(key)),
            _ => rows.push(vec![Some(key)]),
        }
    }
    if let Some(last) = rows.last_mut() {
        last.resize(columns, None);
    }
    rows
}
