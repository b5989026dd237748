use super::{keyboard_items, Screen, ScreenAction, ScreenContext, ScreenItem, ScreenKind};
use crate::config::Language;
use crate::inject::KeyCommand;
use crate::keyboard::{grid_columns, grid_rows, keys_for_mode, Alphabet, Key, KeyboardMode};
use crate::predict::Suggestion;
use crate::scan::{Commit, OptionItem, OptionTree};
use crate::settings::UserSettings;
use crate::text_policy::{
    adds_space_after, apply_capitalization_policy, current_word, display_tail, is_at_word_start,
    is_punctuation, missing_characters, spanish_opening_mark, CapsContext,
};

/// Scanning speller. Keys resume scanning from the top; a chosen suggestion stops it.
#[derive(Debug)]
pub struct WritingScreen {
    text: String,
    mode: KeyboardMode,
    shift: bool,
    caps_lock: bool,
    spanish: bool,
    alphabet: Alphabet,
    suggestions: Vec<Suggestion>,
}

impl WritingScreen {
    pub fn new(settings: &UserSettings) -> Self {
        Self {
            text: String::new(),
            mode: KeyboardMode::Normal,
            shift: false,
            caps_lock: false,
            spanish: settings.language == Language::Spanish,
            alphabet: Alphabet::for_language(
                settings.language,
                settings.custom_alphabet.as_deref(),
                settings.custom_first_letters.as_deref(),
            ),
            suggestions: Vec::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn mode(&self) -> KeyboardMode {
        self.mode
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    fn refresh_suggestions(&mut self, ctx: &ScreenContext<'_>) {
        self.suggestions = if is_at_word_start(&self.text) {
            ctx.predictor.predict_next(&self.text)
        } else {
            ctx.predictor.complete_word(current_word(&self.text))
        };
        crate::log_debug_content(&format!(
            "suggestions for {:?}: {}",
            current_word(&self.text),
            self.suggestions.len()
        ));
    }

    fn learn(&self, ctx: &ScreenContext<'_>) {
        let sentence = self.text.trim();
        if sentence.is_empty() {
            return;
        }
        let report = ctx.predictor.observe(sentence);
        tracing::debug!(
            recorded = report.recorded,
            rejected = report.rejected,
            "writing screen learned text"
        );
    }

    /// Capitalize per context; a consumed one-shot shift is cleared unless caps lock holds it.
    fn cased(&mut self, word: &str) -> String {
        let caps = CapsContext::for_text(&self.text, self.shift, self.caps_lock);
        if caps.capitalizes(word) && !self.caps_lock {
            self.shift = false;
        }
        apply_capitalization_policy(word, &caps)
    }

    /// Attach punctuation to the previous word, dropping a separating space.
    fn attach_punctuation(&mut self, mark: &str, ctx: &mut ScreenContext<'_>) {
        let had_space = self.text.ends_with(' ');
        let trimmed_len = self.text.trim_end().len();
        self.text.truncate(trimmed_len);
        self.text.push_str(mark);
        if had_space {
            ctx.send_key(KeyCommand::Backspace);
        }
        ctx.send_text(mark);
        if adds_space_after(mark) {
            self.text.push(' ');
            ctx.send_text(" ");
        }
    }

    fn insert_char(&mut self, raw: &str, ctx: &mut ScreenContext<'_>) {
        let mut typed = self.cased(raw);
        if self.spanish {
            if let Some(mark) = single(&typed).and_then(|ch| spanish_opening_mark(ch, &self.text))
            {
                typed = mark.to_string();
                self.shift = true;
            }
        }
        if is_punctuation(&typed) {
            self.attach_punctuation(&typed, ctx);
        } else if self.mode == KeyboardMode::Emoji {
            typed.push(' ');
            self.text.push_str(&typed);
            ctx.send_text(&typed);
            self.mode = KeyboardMode::Normal;
        } else {
            self.text.push_str(&typed);
            ctx.send_text(&typed);
        }
    }

    fn press_key(&mut self, key: &Key, ctx: &mut ScreenContext<'_>) -> ScreenAction {
        match key {
            Key::Char(raw) => self.insert_char(raw, ctx),
            Key::Backspace => {
                if self.text.pop().is_some() {
                    ctx.send_key(KeyCommand::Backspace);
                }
            }
            Key::Space => {
                self.text.push(' ');
                ctx.send_text(" ");
                self.learn(ctx);
            }
            Key::Enter => {
                self.text.push('\n');
                ctx.send_key(KeyCommand::Enter);
            }
            Key::Shift => {
                self.shift = !self.shift;
                self.caps_lock = !self.caps_lock;
                return ScreenAction::TreeChanged;
            }
            Key::Emoji => self.mode = KeyboardMode::Emoji,
            Key::Symbols => self.mode = KeyboardMode::Symbol,
            Key::Numbers => self.mode = KeyboardMode::Numeric,
            Key::Back => self.mode = KeyboardMode::Normal,
            Key::Exit => return ScreenAction::SwitchTo(ScreenKind::MainMenu),
        }
        self.refresh_suggestions(ctx);
        ScreenAction::TreeChanged
    }

    fn choose_suggestion(&mut self, word: &str, ctx: &mut ScreenContext<'_>) -> ScreenAction {
        let word_start = is_at_word_start(&self.text);
        let partial = current_word(&self.text).to_string();
        let word = self.cased(word);
        if is_punctuation(&word) {
            self.attach_punctuation(&word, ctx);
        } else if word_start {
            let needs_space = !self.text.is_empty() && !self.text.ends_with(char::is_whitespace);
            let insert = if needs_space {
                format!(" {word} ")
            } else {
                format!("{word} ")
            };
            self.text.push_str(&insert);
            ctx.send_text(&insert);
            self.learn(ctx);
        } else {
            let insert = format!("{} ", missing_characters(&partial, &word));
            self.text.push_str(&insert);
            ctx.send_text(&insert);
            self.learn(ctx);
        }
        self.refresh_suggestions(ctx);
        ScreenAction::TreeChanged
    }
}

fn single(text: &str) -> Option<char> {
    let mut chars = text.chars();
    let ch = chars.next()?;
    chars.next().is_none().then_some(ch)
}

impl Screen for WritingScreen {
    fn kind(&self) -> ScreenKind {
        ScreenKind::Writing
    }

    fn title(&self) -> &'static str {
        "Writing"
    }

    fn tree(&self) -> OptionTree<ScreenItem> {
        let keys = keys_for_mode(self.mode, &self.alphabet, is_at_word_start(&self.text));
        let columns = grid_columns(self.mode, keys.len());
        let rows = keyboard_items(&grid_rows(keys, columns));
        if self.suggestions.is_empty() {
            return OptionTree::new(rows);
        }
        let words = self
            .suggestions
            .iter()
            .map(|suggestion| {
                OptionItem::leaf(
                    format!("{} {}%", suggestion.word, suggestion.percentage_label()),
                    ScreenItem::Suggestion(suggestion.word.clone()),
                )
            })
            .collect();
        OptionTree::new(vec![
            OptionItem::branch("Suggestions", words),
            OptionItem::branch("Keyboard", rows),
        ])
    }

    fn on_enter(&mut self, ctx: &mut ScreenContext<'_>) {
        self.refresh_suggestions(ctx);
    }

    fn on_commit(
        &mut self,
        commit: &Commit<ScreenItem>,
        ctx: &mut ScreenContext<'_>,
    ) -> ScreenAction {
        match &commit.action {
            Some(ScreenItem::Key(key)) => self.press_key(key, ctx),
            Some(ScreenItem::Suggestion(word)) => self.choose_suggestion(word, ctx),
            _ => ScreenAction::Stay,
        }
    }

    fn detail_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("> {}", display_tail(&self.text).replace('\n', " ⏎ "))];
        let mut flags = Vec::new();
        if self.caps_lock {
            flags.push("CAPS");
        }
        if self.shift && !self.caps_lock {
            flags.push("Shift");
        }
        if self.mode != KeyboardMode::Normal {
            flags.push(match self.mode {
                KeyboardMode::Emoji => "Emoji",
                KeyboardMode::Symbol => "Symbols",
                _ => "Numbers",
            });
        }
        if !flags.is_empty() {
            lines.push(flags.join(" · "));
        }
        lines
    }
}
