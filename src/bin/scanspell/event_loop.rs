//! Main loop: feeds key presses, clicks and timer ticks into the scan session.

use crossbeam_channel::{never, select, tick, Receiver, Sender};
use scanspell::screens::{ScanSession, SessionUpdate};
use scanspell::{log_debug, log_debug_content};
use std::time::{Duration, Instant};

use crate::buttons::{ButtonAction, ButtonRegistry};
use crate::input::InputEvent;
use crate::view::build_frame;
use crate::writer::WriterMessage;

pub(crate) struct EventLoopDeps {
    pub(crate) input_rx: Receiver<InputEvent>,
    pub(crate) writer_tx: Sender<WriterMessage>,
    pub(crate) buttons: ButtonRegistry,
}

/// Tick channel for one scanning session. Rebuilt whenever the engine arms a new
/// session or stops its timer, so ticks never outlive the session they belong to.
struct Ticker {
    session: Option<u64>,
    rx: Receiver<Instant>,
}

impl Ticker {
    fn idle() -> Self {
        Self {
            session: None,
            rx: never(),
        }
    }

    fn sync(&mut self, session: &ScanSession) {
        let engine = session.engine();
        let wanted = engine.timer_running().then(|| engine.session());
        if wanted == self.session {
            return;
        }
        self.session = wanted;
        self.rx = match wanted {
            Some(_) => tick(session.cycle_interval()),
            None => never(),
        };
    }
}

/// Raw-mode terminals report a held key as a stream of repeated bytes.
const KEY_REPEAT_GAP: Duration = Duration::from_millis(100);

/// Collapses a held activation key into one press. Each repeat pushes the window
/// forward, so the whole stream counts once.
#[derive(Default)]
pub(crate) struct RepeatGuard {
    last_key: Option<Instant>,
}

impl RepeatGuard {
    fn is_repeat(&mut self, now: Instant) -> bool {
        let repeat = self
            .last_key
            .is_some_and(|last| now.saturating_duration_since(last) < KEY_REPEAT_GAP);
        self.last_key = Some(now);
        repeat
    }
}

pub(crate) fn handle_input(
    session: &mut ScanSession,
    buttons: &ButtonRegistry,
    guard: &mut RepeatGuard,
    event: InputEvent,
    now: Instant,
) -> SessionUpdate {
    match event {
        InputEvent::Key(key) if session.is_activation_key(key) => {
            if guard.is_repeat(now) {
                log_debug("activation key repeat dropped");
                return SessionUpdate::Unchanged;
            }
            session.activate()
        }
        InputEvent::Key(key) => {
            log_debug_content(&format!("key '{key}' is not the switch"));
            session.key_pressed(key)
        }
        InputEvent::MouseClick { x, y } => match buttons.find_at(x, y) {
            Some(ButtonAction::Select) => session.activate(),
            None => SessionUpdate::Unchanged,
        },
        InputEvent::Exit => SessionUpdate::Quit,
    }
}

fn send_frame(session: &ScanSession, deps: &EventLoopDeps) {
    let frame = Box::new(build_frame(session));
    if deps.writer_tx.send(WriterMessage::Frame(frame)).is_err() {
        log_debug("writer thread gone; frame dropped");
    }
}

pub(crate) fn run_event_loop(session: &mut ScanSession, deps: &EventLoopDeps) {
    let mut ticker = Ticker::idle();
    let mut guard = RepeatGuard::default();
    send_frame(session, deps);
    loop {
        ticker.sync(session);
        let update = select! {
            recv(deps.input_rx) -> event => match event {
                Ok(event) => handle_input(session, &deps.buttons, &mut guard, event, Instant::now()),
                Err(_) => SessionUpdate::Quit,
            },
            recv(ticker.rx) -> _ => match ticker.session {
                Some(id) => session.tick(id),
                None => SessionUpdate::Unchanged,
            },
        };
        match update {
            SessionUpdate::Unchanged => {}
            SessionUpdate::Redraw => send_frame(session, deps),
            SessionUpdate::Quit => {
                tracing::info!("scan session quit");
                break;
            }
        }
    }
}
