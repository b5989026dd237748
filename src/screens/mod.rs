//! Screen controllers: each supplies an option tree to the scan engine and turns
//! committed items into actions.

mod main_menu;
mod navigation;
mod session;
mod settings;
#[cfg(test)]
mod tests;
mod writing;

pub use main_menu::MainMenuScreen;
pub use navigation::NavigationScreen;
pub use session::{ScanSession, SessionUpdate};
pub use settings::SettingsScreen;
pub use writing::WritingScreen;

use crate::config::{InputMode, Language, ScanSpeed};
use crate::inject::{KeyCommand, KeystrokeSink};
use crate::keyboard::{Key, KeyGrid};
use crate::predict::SharedPredictor;
use crate::scan::{Commit, CommitPolicy, OptionItem, OptionTree};
use crate::settings::{SettingsStore, UserSettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    MainMenu,
    Writing,
    Navigation,
    Settings,
}

/// Payload carried by every selectable item.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenItem {
    Open(ScreenKind),
    Quit,
    Speed(ScanSpeed),
    Language(Language),
    InputMode(InputMode),
    SaveSettings,
    Nav(KeyCommand),
    /// `true` enters the browser sub-menu, `false` leaves it.
    BrowserMenu(bool),
    Suggestion(String),
    Key(Key),
}

/// What the host does after a screen handled a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenAction {
    Stay,
    /// The screen's tree changed; hand the new one to the engine.
    TreeChanged,
    SwitchTo(ScreenKind),
    Quit,
}

/// Shared state a screen may touch while handling a commit.
pub struct ScreenContext<'a> {
    pub settings: &'a mut UserSettings,
    pub settings_store: &'a SettingsStore,
    pub predictor: &'a SharedPredictor,
    pub sink: &'a mut dyn KeystrokeSink,
    /// One-line message for the status bar.
    pub notice: &'a mut Option<String>,
}

impl ScreenContext<'_> {
    /// Delivery failures are logged and shown; they never undo the commit.
    pub fn send_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Err(err) = self.sink.send_text(text) {
            crate::log_debug(&format!("text delivery failed: {err:#}"));
            *self.notice = Some(format!("Delivery failed: {err}"));
        }
    }

    pub fn send_key(&mut self, key: KeyCommand) {
        if let Err(err) = self.sink.send_key(key) {
            crate::log_debug(&format!("key delivery failed ({}): {err:#}", key.label()));
            *self.notice = Some(format!("Delivery failed: {err}"));
        }
    }
}

pub trait Screen: Send {
    fn kind(&self) -> ScreenKind;

    fn title(&self) -> &'static str;

    fn tree(&self) -> OptionTree<ScreenItem>;

    fn on_commit(
        &mut self,
        commit: &Commit<ScreenItem>,
        ctx: &mut ScreenContext<'_>,
    ) -> ScreenAction;

    /// Called once when the screen becomes active.
    fn on_enter(&mut self, _ctx: &mut ScreenContext<'_>) {}

    /// While true, the next key press goes to [`Screen::capture_key`] instead of
    /// acting as the switch.
    fn is_capturing_key(&self) -> bool {
        false
    }

    fn capture_key(&mut self, _key: char, _ctx: &mut ScreenContext<'_>) -> ScreenAction {
        ScreenAction::Stay
    }

    /// Extra lines shown under the options (typed text, prompts).
    fn detail_lines(&self) -> Vec<String> {
        Vec::new()
    }
}

pub fn build_screen(kind: ScreenKind, settings: &UserSettings) -> Box<dyn Screen> {
    match kind {
        ScreenKind::MainMenu => Box::new(MainMenuScreen::new()),
        ScreenKind::Writing => Box::new(WritingScreen::new(settings)),
        ScreenKind::Navigation => Box::new(NavigationScreen::new()),
        ScreenKind::Settings => Box::new(SettingsScreen::new(settings)),
    }
}

/// Row-by-row tree over a key grid. Each row's label lists its keys.
pub(crate) fn grid_tree<T>(
    rows: &[Vec<Option<T>>],
    label: impl Fn(&T) -> String,
    item: impl Fn(&T) -> (ScreenItem, CommitPolicy),
) -> Vec<OptionItem<ScreenItem>> {
    rows.iter()
        .map(|row| {
            let row_label = row
                .iter()
                .flatten()
                .map(&label)
                .collect::<Vec<_>>()
                .join(" ");
            let children = row
                .iter()
                .map(|slot| match slot {
                    Some(entry) => {
                        let (action, policy) = item(entry);
                        OptionItem::leaf(label(entry), action).with_policy(policy)
                    }
                    None => OptionItem::placeholder(),
                })
                .collect();
            OptionItem::branch(row_label, children)
        })
        .collect()
}

/// Key grid as option items.
pub(crate) fn keyboard_items(grid: &KeyGrid) -> Vec<OptionItem<ScreenItem>> {
    grid_tree(
        grid,
        |key| key.label().to_string(),
        |key| {
            // Typing keeps the scan running; leaving the screen stops it.
            let policy = match key {
                Key::Exit => CommitPolicy::Stop,
                _ => CommitPolicy::Resume,
            };
            (ScreenItem::Key(key.clone()), policy)
        },
    )
}
