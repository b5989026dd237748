use super::*;
use crate::config::Language;
use crate::inject::{RecordingSink, SinkEvent};
use crate::predict::{BigramTable, Predictor};
use crate::scan::Stage;
use anyhow::{bail, Result};
use std::sync::{Arc, Mutex};

/// Recording sink the test keeps a handle to after the session takes ownership.
#[derive(Clone, Default)]
struct SharedSink(Arc<Mutex<RecordingSink>>);

impl KeystrokeSink for SharedSink {
    fn send_text(&mut self, text: &str) -> Result<()> {
        self.0.lock().unwrap().send_text(text)
    }

    fn send_key(&mut self, key: KeyCommand) -> Result<()> {
        self.0.lock().unwrap().send_key(key)
    }
}

impl SharedSink {
    fn events(&self) -> Vec<SinkEvent> {
        self.0.lock().unwrap().events().to_vec()
    }

    fn text(&self) -> String {
        self.0.lock().unwrap().text()
    }
}

struct FailingSink;

impl KeystrokeSink for FailingSink {
    fn send_text(&mut self, _text: &str) -> Result<()> {
        bail!("target gone")
    }

    fn send_key(&mut self, _key: KeyCommand) -> Result<()> {
        bail!("target gone")
    }
}

fn predictor_with(sentences: &[&str]) -> SharedPredictor {
    let mut predictor = Predictor::new(BigramTable::new());
    for sentence in sentences {
        predictor.observe(sentence);
    }
    SharedPredictor::new(predictor)
}

fn start(kind: ScreenKind, settings: UserSettings, predictor: SharedPredictor) -> (ScanSession, SharedSink) {
    let sink = SharedSink::default();
    let session = ScanSession::new(
        kind,
        settings,
        SettingsStore::in_memory(),
        predictor,
        Box::new(sink.clone()),
    );
    (session, sink)
}

/// Arm if idle, then tick to and activate each index of `path`.
fn select(session: &mut ScanSession, path: &[usize]) -> SessionUpdate {
    if session.engine().stage() == Stage::Idle {
        session.activate();
    }
    let mut last = SessionUpdate::Unchanged;
    for &idx in path {
        for _ in 0..idx {
            let id = session.engine().session();
            session.tick(id);
        }
        last = session.activate();
    }
    last
}

fn writing_text(session: &ScanSession) -> String {
    session.screen().detail_lines()[0]
        .trim_start_matches("> ")
        .to_string()
}

#[test]
fn main_menu_opens_screens_and_quits() {
    let (mut session, _) = start(ScreenKind::MainMenu, UserSettings::default(), predictor_with(&[]));
    assert_eq!(session.engine().tree().depth(), 1);

    select(&mut session, &[2]);
    assert_eq!(session.screen().kind(), ScreenKind::Settings);
    assert_eq!(session.engine().stage(), Stage::Idle);

    session.switch_to(ScreenKind::MainMenu);
    assert_eq!(select(&mut session, &[3]), SessionUpdate::Quit);
}

#[test]
fn switching_screens_drops_pending_ticks() {
    let (mut session, _) = start(ScreenKind::MainMenu, UserSettings::default(), predictor_with(&[]));
    session.activate();
    let stale = session.engine().session();
    session.switch_to(ScreenKind::Navigation);
    assert_eq!(session.tick(stale), SessionUpdate::Unchanged);
    assert!(session.engine().path().is_empty());
}

#[test]
fn navigation_forwards_keys_and_keeps_scanning() {
    let (mut session, sink) =
        start(ScreenKind::Navigation, UserSettings::default(), predictor_with(&[]));
    select(&mut session, &[0, 2]);
    assert_eq!(sink.events(), vec![SinkEvent::Key(KeyCommand::Up)]);
    assert_eq!(session.engine().stage(), Stage::Scanning(0));
    assert_eq!(session.engine().path(), &[0]);

    select(&mut session, &[3, 2]);
    assert_eq!(session.screen().title(), "Browser Commands");
    select(&mut session, &[0, 1]);
    assert_eq!(sink.events().last(), Some(&SinkEvent::Key(KeyCommand::NewTab)));

    select(&mut session, &[1, 3]);
    assert_eq!(session.screen().title(), "Navigation");
    select(&mut session, &[3, 3]);
    assert_eq!(session.screen().kind(), ScreenKind::MainMenu);
}

#[test]
fn settings_apply_on_continue() {
    let (mut session, _) = start(ScreenKind::Settings, UserSettings::default(), predictor_with(&[]));
    select(&mut session, &[0, 2]);
    assert_eq!(session.settings().speed, ScanSpeed::Normal);
    assert!(session.engine().tree().items()[0].label.ends_with("Fast"));

    select(&mut session, &[1, 1]);
    select(&mut session, &[3]);
    assert_eq!(session.screen().kind(), ScreenKind::MainMenu);
    assert_eq!(session.settings().speed, ScanSpeed::Fast);
    assert_eq!(session.settings().language, Language::Spanish);
    assert_eq!(session.cycle_interval().as_millis(), 250);
    assert_eq!(session.notice(), Some("Settings saved"));
}

#[test]
fn custom_input_mode_captures_next_key() {
    let (mut session, _) = start(ScreenKind::Settings, UserSettings::default(), predictor_with(&[]));
    select(&mut session, &[2, 2]);
    assert!(session.screen().is_capturing_key());
    assert_eq!(session.engine().stage(), Stage::Idle);
    // The usual switch key is captured, not treated as an activation.
    assert!(!session.is_activation_key(' '));
    assert_eq!(session.activate(), SessionUpdate::Unchanged);

    session.key_pressed('j');
    assert!(!session.screen().is_capturing_key());
    select(&mut session, &[3]);
    assert_eq!(session.settings().input_mode, InputMode::Custom);
    assert!(session.is_activation_key('j'));
    assert!(!session.is_activation_key(' '));
}

#[test]
fn writing_capitalizes_and_completes_words() {
    let predictor = predictor_with(&["the cat sat"]);
    let (mut session, sink) = start(ScreenKind::Writing, UserSettings::default(), predictor.clone());
    // Word-start grid: 't' leads the first row.
    select(&mut session, &[0, 0]);
    assert_eq!(writing_text(&session), "T");
    assert_eq!(session.engine().tree().items()[0].label, "Suggestions");

    // Completion of "T" is "the"; only the missing letters are typed.
    select(&mut session, &[0, 0]);
    assert_eq!(writing_text(&session), "The ");
    assert_eq!(session.engine().stage(), Stage::Idle);

    // Next-word prediction after "the".
    assert_eq!(session.engine().tree().items()[0].children[0].label, "cat 100.00%");
    select(&mut session, &[0, 0]);
    assert_eq!(writing_text(&session), "The cat ");
    assert_eq!(sink.text(), "The cat ");
    assert_eq!(predictor.predict_next("cat")[0].word, "sat");
}

#[test]
fn writing_learns_from_typed_words() {
    let predictor = predictor_with(&[]);
    let (mut session, _) = start(ScreenKind::Writing, UserSettings::default(), predictor.clone());
    // "To" then space, then "a" then space.
    select(&mut session, &[0, 0]);
    select(&mut session, &[0, 3]);
    select(&mut session, &[4, 4]);
    select(&mut session, &[0, 1]);
    select(&mut session, &[4, 4]);
    assert_eq!(writing_text(&session), "To a ");
    let suggestions = predictor.predict_next("to");
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].word, "a");
}

#[test]
fn punctuation_replaces_trailing_space() {
    let (mut session, sink) = start(ScreenKind::Writing, UserSettings::default(), predictor_with(&[]));
    select(&mut session, &[0, 0]);
    select(&mut session, &[4, 4]);
    select(&mut session, &[3, 5]);
    assert_eq!(writing_text(&session), "T. ");
    assert_eq!(
        sink.events(),
        vec![
            SinkEvent::Text("T".to_string()),
            SinkEvent::Text(" ".to_string()),
            SinkEvent::Key(KeyCommand::Backspace),
            SinkEvent::Text(".".to_string()),
            SinkEvent::Text(" ".to_string()),
        ]
    );
}

#[test]
fn spanish_question_opens_with_inverted_mark() {
    let settings = UserSettings {
        language: Language::Spanish,
        ..UserSettings::default()
    };
    let (mut session, _) = start(ScreenKind::Writing, settings, predictor_with(&[]));
    // 32 letters + ". , ! ? \"" -> '?' is key 35: row 5, column 0.
    select(&mut session, &[5, 0]);
    assert_eq!(writing_text(&session), "¿");
    select(&mut session, &[0, 0]);
    assert_eq!(writing_text(&session), "¿E");
}

#[test]
fn emoji_key_inserts_and_returns_to_letters() {
    let (mut session, sink) = start(ScreenKind::Writing, UserSettings::default(), predictor_with(&[]));
    select(&mut session, &[4, 5]);
    assert_eq!(session.engine().tree().items().len(), 6);
    select(&mut session, &[0, 0]);
    assert_eq!(sink.text(), "😂 ");
    assert_eq!(session.engine().tree().items().len(), 6);
    assert_eq!(
        session.engine().tree().items()[0].children[0].label,
        "t"
    );
}

#[test]
fn placeholder_activation_types_nothing() {
    let (mut session, sink) = start(ScreenKind::Writing, UserSettings::default(), predictor_with(&[]));
    select(&mut session, &[5, 4]);
    assert!(sink.events().is_empty());
    assert_eq!(session.engine().stage(), Stage::Scanning(0));
    assert_eq!(session.engine().path(), &[0]);
    assert!(session.engine().timer_running());
}

#[test]
fn writing_exit_returns_to_main_menu() {
    let (mut session, _) = start(ScreenKind::Writing, UserSettings::default(), predictor_with(&[]));
    select(&mut session, &[5, 3]);
    assert_eq!(session.screen().kind(), ScreenKind::MainMenu);
    assert_eq!(session.engine().stage(), Stage::Idle);
}

#[test]
fn delivery_failure_keeps_text_and_reports() {
    let mut session = ScanSession::new(
        ScreenKind::Writing,
        UserSettings::default(),
        SettingsStore::in_memory(),
        predictor_with(&[]),
        Box::new(FailingSink),
    );
    select(&mut session, &[0, 0]);
    assert_eq!(writing_text(&session), "T");
    assert!(session.notice().is_some_and(|n| n.starts_with("Delivery failed")));
    assert_eq!(session.engine().stage(), Stage::Scanning(0));
}
