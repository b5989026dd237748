use std::time::Duration;

use super::{build_screen, Screen, ScreenAction, ScreenContext, ScreenItem, ScreenKind};
use crate::inject::KeystrokeSink;
use crate::predict::SharedPredictor;
use crate::scan::{ScanEngine, Transition};
use crate::settings::{SettingsStore, UserSettings};

/// What the host should do after feeding an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionUpdate {
    Unchanged,
    Redraw,
    Quit,
}

/// One scan engine driving whichever screen is active.
pub struct ScanSession {
    engine: ScanEngine<ScreenItem>,
    screen: Box<dyn Screen>,
    settings: UserSettings,
    settings_store: SettingsStore,
    predictor: SharedPredictor,
    sink: Box<dyn KeystrokeSink>,
    notice: Option<String>,
}

impl ScanSession {
    pub fn new(
        start: ScreenKind,
        settings: UserSettings,
        settings_store: SettingsStore,
        predictor: SharedPredictor,
        sink: Box<dyn KeystrokeSink>,
    ) -> Self {
        let screen = build_screen(start, &settings);
        let engine = ScanEngine::new(screen.tree());
        let mut session = Self {
            engine,
            screen,
            settings,
            settings_store,
            predictor,
            sink,
            notice: None,
        };
        session.enter_current_screen();
        session
    }

    pub fn engine(&self) -> &ScanEngine<ScreenItem> {
        &self.engine
    }

    pub fn screen(&self) -> &dyn Screen {
        self.screen.as_ref()
    }

    pub fn settings(&self) -> &UserSettings {
        &self.settings
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    /// Tick interval for the running session, read once when scanning is armed.
    pub fn cycle_interval(&self) -> Duration {
        self.settings.cycle_interval()
    }

    /// Whether `key` should act as the switch right now.
    pub fn is_activation_key(&self, key: char) -> bool {
        !self.screen.is_capturing_key() && self.settings.activation_key() == Some(key)
    }

    pub fn activate(&mut self) -> SessionUpdate {
        if self.screen.is_capturing_key() {
            return SessionUpdate::Unchanged;
        }
        let transition = self.engine.activate();
        self.apply(transition)
    }

    pub fn tick(&mut self, session: u64) -> SessionUpdate {
        let transition = self.engine.tick_for_session(session);
        self.apply(transition)
    }

    /// Raw key press that was not the switch. Only matters while a screen captures keys.
    pub fn key_pressed(&mut self, key: char) -> SessionUpdate {
        if !self.screen.is_capturing_key() {
            return SessionUpdate::Unchanged;
        }
        let mut ctx = ScreenContext {
            settings: &mut self.settings,
            settings_store: &self.settings_store,
            predictor: &self.predictor,
            sink: self.sink.as_mut(),
            notice: &mut self.notice,
        };
        let action = self.screen.capture_key(key, &mut ctx);
        self.handle_action(action)
    }

    /// Leave the current screen immediately.
    pub fn switch_to(&mut self, kind: ScreenKind) {
        self.engine.reset();
        self.screen = build_screen(kind, &self.settings);
        self.enter_current_screen();
        tracing::debug!(screen = ?kind, "screen switched");
    }

    fn enter_current_screen(&mut self) {
        let mut ctx = ScreenContext {
            settings: &mut self.settings,
            settings_store: &self.settings_store,
            predictor: &self.predictor,
            sink: self.sink.as_mut(),
            notice: &mut self.notice,
        };
        self.screen.on_enter(&mut ctx);
        self.engine.set_tree(self.screen.tree());
    }

    fn apply(&mut self, transition: Transition<ScreenItem>) -> SessionUpdate {
        match transition {
            Transition::None => SessionUpdate::Unchanged,
            Transition::Highlight => SessionUpdate::Redraw,
            Transition::Committed(commit) => {
                crate::log_debug_content(&format!("committed '{}'", commit.label));
                let mut ctx = ScreenContext {
                    settings: &mut self.settings,
                    settings_store: &self.settings_store,
                    predictor: &self.predictor,
                    sink: self.sink.as_mut(),
                    notice: &mut self.notice,
                };
                let action = self.screen.on_commit(&commit, &mut ctx);
                self.handle_action(action)
            }
        }
    }

    fn handle_action(&mut self, action: ScreenAction) -> SessionUpdate {
        match action {
            ScreenAction::Stay => SessionUpdate::Redraw,
            ScreenAction::TreeChanged => {
                self.engine.set_tree(self.screen.tree());
                SessionUpdate::Redraw
            }
            ScreenAction::SwitchTo(kind) => {
                self.switch_to(kind);
                SessionUpdate::Redraw
            }
            ScreenAction::Quit => {
                self.engine.reset();
                SessionUpdate::Quit
            }
        }
    }
}
