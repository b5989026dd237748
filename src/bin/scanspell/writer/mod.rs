mod render;
mod state;

use crossbeam_channel::{Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use crate::buttons::ButtonRegistry;
use crate::view::Frame;

const WRITER_RECV_TIMEOUT_MS: u64 = 25;

#[derive(Debug, Clone)]
pub(crate) enum WriterMessage {
    Frame(Box<Frame>),
    Shutdown,
}

/// Owns stdout while the overlay runs. Draws frames as they arrive and redraws
/// the last one when the terminal is resized.
pub(crate) fn spawn_writer_thread(
    rx: Receiver<WriterMessage>,
    buttons: ButtonRegistry,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut state = state::WriterState::new(buttons);
        loop {
            match rx.recv_timeout(Duration::from_millis(WRITER_RECV_TIMEOUT_MS)) {
                Ok(message) => {
                    if !state.handle_message(message) {
                        break;
                    }
                }
                Err(RecvTimeoutError::Timeout) => state.redraw_if_resized(),
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
