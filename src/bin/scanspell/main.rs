//! scanspell entrypoint: a single-switch scanning keyboard in the terminal.
//!
//! # Architecture
//!
//! - Input thread: reads stdin, decodes keys and mouse clicks
//! - Writer thread: owns stdout and draws frames
//! - Event loop: drives the scan session from input and the tick timer
//! - Model writer: saves the learned bigram model in the background

mod buttons;
mod event_loop;
mod input;
mod transcript;
mod view;
mod writer;

use anyhow::Result;
use crossbeam_channel::bounded;
use scanspell::config::AppConfig;
use scanspell::inject::{ChildProcessSink, KeystrokeSink};
use scanspell::predict::{load_model, JsonModelStore, Predictor, SharedPredictor};
use scanspell::screens::{ScanSession, ScreenKind};
use scanspell::settings::{SettingsStore, UserSettings};
use scanspell::terminal_restore::TerminalRestoreGuard;
use scanspell::{init_logging, init_tracing, log_debug, log_file_path};
use std::io;

use crate::buttons::ButtonRegistry;
use crate::event_loop::{run_event_loop, EventLoopDeps};
use crate::input::spawn_input_thread;
use crate::transcript::SharedTranscript;
use crate::writer::{spawn_writer_thread, WriterMessage};

/// Max pending frames for the writer thread.
const WRITER_CHANNEL_CAPACITY: usize = 64;

/// Max pending input events before backpressure.
const INPUT_CHANNEL_CAPACITY: usize = 256;

fn main() -> Result<()> {
    let config = AppConfig::parse_args()?;
    init_logging(&config);
    let trace_path = init_tracing(&config);
    log_debug("=== scanspell started ===");
    log_debug(&format!("Log file: {:?}", log_file_path()));
    if let Some(path) = trace_path {
        log_debug(&format!("Trace file: {}", path.display()));
    }

    let settings_store = SettingsStore::new(config.settings_path());
    let first_run =
        config.reset_settings || settings_store.path().is_some_and(|path| !path.exists());
    let mut settings = if config.reset_settings {
        UserSettings::default()
    } else {
        settings_store.load()
    };
    settings.apply_cli(&config);

    let model_path = config.model_path();
    let (table, load_status) = load_model(&model_path, config.initial_model.as_deref());
    log_debug(&format!("model: {}", load_status.summary()));
    tracing::info!(
        loaded = load_status.is_loaded(),
        path = %model_path.display(),
        "model seeded"
    );
    let mut predictor = Predictor::new(table).with_learning(!config.no_learn);
    if !config.no_learn {
        predictor = predictor.with_persistence(Box::new(JsonModelStore::spawn(model_path)));
    }
    let predictor = SharedPredictor::new(predictor);

    let transcript = SharedTranscript::default();
    let sink: Box<dyn KeystrokeSink> = match config.target_command()? {
        Some(argv) => Box::new(ChildProcessSink::spawn(&argv)?),
        None => Box::new(transcript.clone()),
    };

    let start = if first_run {
        ScreenKind::Settings
    } else {
        ScreenKind::MainMenu
    };
    let mut session = ScanSession::new(start, settings, settings_store, predictor, sink);
    session.set_notice(load_status.summary());

    let mut stdout = io::stdout();
    let terminal_guard = TerminalRestoreGuard::enter(&mut stdout, true)?;

    let buttons = ButtonRegistry::new();
    let (writer_tx, writer_rx) = bounded(WRITER_CHANNEL_CAPACITY);
    let writer_handle = spawn_writer_thread(writer_rx, buttons.clone());
    let (input_tx, input_rx) = bounded(INPUT_CHANNEL_CAPACITY);
    // The input thread blocks on stdin and ends with the process.
    let _input_handle = spawn_input_thread(input_tx);

    let deps = EventLoopDeps {
        input_rx,
        writer_tx,
        buttons,
    };
    run_event_loop(&mut session, &deps);

    let _ = deps.writer_tx.send(WriterMessage::Shutdown);
    if writer_handle.join().is_err() {
        log_debug("writer thread panicked");
    }
    terminal_guard.restore();
    // Dropping the session flushes the model writer and stops a target program.
    drop(session);

    let typed = transcript.output();
    if !typed.is_empty() {
        println!("{typed}");
    }
    log_debug("=== scanspell exited ===");
    Ok(())
}
