use crossterm::terminal::size as terminal_size;
use scanspell::log_debug;
use std::io::{self, Write};

use super::render::draw_frame;
use super::WriterMessage;
use crate::buttons::ButtonRegistry;
use crate::view::Frame;

pub(super) struct WriterState<W: Write = io::Stdout> {
    out: W,
    buttons: ButtonRegistry,
    frame: Option<Frame>,
    rows: u16,
    cols: u16,
}

impl WriterState {
    pub(super) fn new(buttons: ButtonRegistry) -> Self {
        Self::with_output(io::stdout(), buttons)
    }
}

impl<W: Write> WriterState<W> {
    fn with_output(out: W, buttons: ButtonRegistry) -> Self {
        let (cols, rows) = terminal_size().unwrap_or((80, 24));
        Self {
            out,
            buttons,
            frame: None,
            rows,
            cols,
        }
    }

    /// Returns false when the writer should stop.
    pub(super) fn handle_message(&mut self, message: WriterMessage) -> bool {
        match message {
            WriterMessage::Frame(frame) => {
                self.frame = Some(*frame);
                self.draw();
                true
            }
            WriterMessage::Shutdown => false,
        }
    }

    pub(super) fn redraw_if_resized(&mut self) {
        let Ok((cols, rows)) = terminal_size() else {
            return;
        };
        if (cols, rows) != (self.cols, self.rows) {
            self.cols = cols;
            self.rows = rows;
            self.draw();
        }
    }

    fn draw(&mut self) {
        let Some(frame) = self.frame.as_ref() else {
            return;
        };
        match draw_frame(&mut self.out, frame, self.rows, self.cols) {
            Ok(buttons) => self.buttons.replace(buttons),
            Err(err) => log_debug(&format!("frame draw failed: {err}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buttons::ButtonAction;

    fn frame() -> Frame {
        Frame {
            title: "Main Menu".to_string(),
            lines: Vec::new(),
            details: Vec::new(),
            notice: None,
            status: "Idle".to_string(),
        }
    }

    #[test]
    fn frame_message_draws_and_registers_select() {
        let buttons = ButtonRegistry::new();
        let mut state = WriterState::with_output(Vec::new(), buttons.clone());
        state.rows = 24;
        state.cols = 80;
        assert!(state.handle_message(WriterMessage::Frame(Box::new(frame()))));
        assert!(String::from_utf8_lossy(&state.out).contains("Main Menu"));
        assert_eq!(buttons.find_at(4, 23), Some(ButtonAction::Select));
    }

    #[test]
    fn shutdown_stops_the_writer() {
        let mut state = WriterState::with_output(Vec::new(), ButtonRegistry::new());
        assert!(!state.handle_message(WriterMessage::Shutdown));
        assert!(state.out.is_empty());
    }
}
