use super::{Screen, ScreenAction, ScreenContext, ScreenItem, ScreenKind};
use crate::config::{InputMode, Language, ScanSpeed};
use crate::scan::{Commit, CommitPolicy, OptionItem, OptionTree};
use crate::settings::UserSettings;

/// Two-level `setting -> value` menu. Values apply immediately; Continue saves.
#[derive(Debug)]
pub struct SettingsScreen {
    draft: UserSettings,
    capturing: bool,
}

impl SettingsScreen {
    pub fn new(settings: &UserSettings) -> Self {
        Self {
            draft: settings.clone(),
            capturing: false,
        }
    }

    pub fn draft(&self) -> &UserSettings {
        &self.draft
    }

    fn value(label: &str, item: ScreenItem, current: bool) -> OptionItem<ScreenItem> {
        let label = if current {
            format!("[{label}]")
        } else {
            label.to_string()
        };
        OptionItem::leaf(label, item).with_policy(CommitPolicy::Resume)
    }
}

impl Screen for SettingsScreen {
    fn kind(&self) -> ScreenKind {
        ScreenKind::Settings
    }

    fn title(&self) -> &'static str {
        "Settings"
    }

    fn tree(&self) -> OptionTree<ScreenItem> {
        let speeds = ScanSpeed::ALL
            .iter()
            .map(|&speed| {
                Self::value(
                    speed.label(),
                    ScreenItem::Speed(speed),
                    self.draft.speed == speed,
                )
            })
            .collect();
        let languages = [Language::English, Language::Spanish]
            .iter()
            .map(|&language| {
                Self::value(
                    language.label(),
                    ScreenItem::Language(language),
                    self.draft.language == language,
                )
            })
            .collect();
        let input_modes = InputMode::ALL
            .iter()
            .map(|&mode| {
                let current = self.draft.input_mode == mode;
                let item = Self::value(mode.label(), ScreenItem::InputMode(mode), current);
                if mode == InputMode::Custom {
                    // Key capture pauses scanning until the next activation.
                    item.with_policy(CommitPolicy::Stop)
                } else {
                    item
                }
            })
            .collect();
        OptionTree::new(vec![
            OptionItem::branch(
                format!("Cycle Speed: {}", self.draft.speed.label()),
                speeds,
            ),
            OptionItem::branch(
                format!("Language: {}", self.draft.language.label()),
                languages,
            ),
            OptionItem::branch(
                format!("Input Mode: {}", self.draft.input_mode.label()),
                input_modes,
            ),
            OptionItem::leaf("Continue", ScreenItem::SaveSettings),
        ])
    }

    fn on_commit(
        &mut self,
        commit: &Commit<ScreenItem>,
        ctx: &mut ScreenContext<'_>,
    ) -> ScreenAction {
        match commit.action {
            Some(ScreenItem::Speed(speed)) => self.draft.set_speed(speed),
            Some(ScreenItem::Language(language)) => self.draft.language = language,
            Some(ScreenItem::InputMode(InputMode::Custom)) => {
                self.capturing = true;
            }
            Some(ScreenItem::InputMode(mode)) => self.draft.input_mode = mode,
            Some(ScreenItem::SaveSettings) => {
                *ctx.settings = self.draft.clone();
                if let Err(err) = ctx.settings_store.save(ctx.settings) {
                    crate::log_debug(&format!("settings save failed: {err:#}"));
                    *ctx.notice = Some(format!("Settings not saved: {err}"));
                } else {
                    *ctx.notice = Some("Settings saved".to_string());
                }
                return ScreenAction::SwitchTo(ScreenKind::MainMenu);
            }
            _ => return ScreenAction::Stay,
        }
        ScreenAction::TreeChanged
    }

    fn is_capturing_key(&self) -> bool {
        self.capturing
    }

    fn capture_key(&mut self, key: char, ctx: &mut ScreenContext<'_>) -> ScreenAction {
        if !self.capturing {
            return ScreenAction::Stay;
        }
        self.capturing = false;
        self.draft.input_mode = InputMode::Custom;
        self.draft.custom_key = Some(key);
        *ctx.notice = Some(format!("Switch key set to {}", describe_key(key)));
        ScreenAction::TreeChanged
    }

    fn detail_lines(&self) -> Vec<String> {
        if self.capturing {
            vec!["Press any key to select as input".to_string()]
        } else {
            Vec::new()
        }
    }
}

fn describe_key(key: char) -> String {
    if key == ' ' {
        "Space".to_string()
    } else {
        format!("'{key}'")
    }
}
