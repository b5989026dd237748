use crate::input::event::InputEvent;
use crate::input::mouse::{parse_sgr_mouse, MouseEventKind};

const MAX_ESCAPE_LEN: usize = 32;

/// Turns raw terminal bytes into [`InputEvent`]s. Escape sequences and multi-byte
/// characters may be split across reads, so partial ones are carried over.
pub(crate) struct InputParser {
    pending: Vec<u8>,
    esc_buffer: Option<Vec<u8>>,
}

impl InputParser {
    pub(crate) fn new() -> Self {
        Self {
            pending: Vec::new(),
            esc_buffer: None,
        }
    }

    pub(crate) fn consume_bytes(&mut self, bytes: &[u8], out: &mut Vec<InputEvent>) {
        for &byte in bytes {
            if self.consume_escape(byte, out) {
                continue;
            }
            match byte {
                // Ctrl+Q, and Ctrl+C since raw mode swallows SIGINT.
                0x11 | 0x03 => {
                    self.flush_pending(out);
                    out.push(InputEvent::Exit);
                }
                0x00..=0x1f | 0x7f => self.flush_pending(out),
                _ => self.pending.push(byte),
            }
        }
    }

    /// Returns true when `byte` belonged to an escape sequence.
    fn consume_escape(&mut self, byte: u8, out: &mut Vec<InputEvent>) -> bool {
        if self.esc_buffer.is_none() {
            if byte == 0x1b {
                self.esc_buffer = Some(vec![byte]);
                return true;
            }
            return false;
        }
        let Some(buffer) = self.esc_buffer.as_mut() else {
            return false;
        };
        buffer.push(byte);
        match buffer[1] {
            b'[' => {
                if buffer.len() >= 3 && (0x40..=0x7e).contains(&byte) {
                    let sequence = std::mem::take(buffer);
                    self.esc_buffer = None;
                    if let Some((MouseEventKind::Press, x, y)) = parse_sgr_mouse(&sequence) {
                        self.flush_pending(out);
                        out.push(InputEvent::MouseClick { x, y });
                    }
                } else if buffer.len() > MAX_ESCAPE_LEN {
                    self.esc_buffer = None;
                }
                true
            }
            // SS3 keys (ESC O x) are three bytes long.
            b'O' => {
                if buffer.len() == 3 {
                    self.esc_buffer = None;
                }
                true
            }
            0x1b => {
                self.esc_buffer = Some(vec![0x1b]);
                true
            }
            // Alt+key: drop the prefix and treat the key as typed.
            _ => {
                self.esc_buffer = None;
                false
            }
        }
    }

    /// Emit complete characters; keep an unfinished escape or UTF-8 tail for the next read.
    /// A lone ESC stays buffered: the next byte either continues the sequence or
    /// discards it.
    pub(crate) fn flush_pending(&mut self, out: &mut Vec<InputEvent>) {
        let bytes = std::mem::take(&mut self.pending);
        let mut rest = bytes.as_slice();
        loop {
            match std::str::from_utf8(rest) {
                Ok(text) => {
                    out.extend(text.chars().map(InputEvent::Key));
                    return;
                }
                Err(err) => {
                    let (valid, tail) = rest.split_at(err.valid_up_to());
                    if let Ok(text) = std::str::from_utf8(valid) {
                        out.extend(text.chars().map(InputEvent::Key));
                    }
                    match err.error_len() {
                        Some(len) => rest = &tail[len..],
                        None => {
                            self.pending = tail.to_vec();
                            return;
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(chunks: &[&[u8]]) -> Vec<InputEvent> {
        let mut parser = InputParser::new();
        let mut out = Vec::new();
        for chunk in chunks {
            parser.consume_bytes(chunk, &mut out);
            parser.flush_pending(&mut out);
        }
        out
    }

    #[test]
    fn printable_bytes_become_keys() {
        assert_eq!(
            parse(&[b"a j"]),
            vec![
                InputEvent::Key('a'),
                InputEvent::Key(' '),
                InputEvent::Key('j')
            ]
        );
    }

    #[test]
    fn ctrl_q_and_ctrl_c_exit() {
        assert_eq!(
            parse(&[b"x\x11"]),
            vec![InputEvent::Key('x'), InputEvent::Exit]
        );
        assert_eq!(parse(&[b"\x03"]), vec![InputEvent::Exit]);
    }

    #[test]
    fn other_control_bytes_are_dropped() {
        assert_eq!(parse(&[b"\r\t\x7fk"]), vec![InputEvent::Key('k')]);
    }

    #[test]
    fn utf8_split_across_reads() {
        let bytes = "ñ".as_bytes();
        assert_eq!(
            parse(&[&bytes[..1], &bytes[1..]]),
            vec![InputEvent::Key('ñ')]
        );
    }

    #[test]
    fn mouse_press_is_a_click_and_release_is_ignored() {
        assert_eq!(
            parse(&[b"\x1b[<0;5;20M\x1b[<0;5;20m"]),
            vec![InputEvent::MouseClick { x: 5, y: 20 }]
        );
    }

    #[test]
    fn mouse_report_split_across_reads() {
        assert_eq!(
            parse(&[b"\x1b[<0;5", b";20M"]),
            vec![InputEvent::MouseClick { x: 5, y: 20 }]
        );
    }

    #[test]
    fn arrow_and_ss3_sequences_are_swallowed() {
        assert_eq!(
            parse(&[b"\x1b[A\x1bOBz"]),
            vec![InputEvent::Key('z')]
        );
    }

    #[test]
    fn alt_prefix_is_dropped() {
        assert_eq!(parse(&[b"\x1bq"]), vec![InputEvent::Key('q')]);
    }

    #[test]
    fn escape_split_from_its_sequence_is_not_typed() {
        assert_eq!(
            parse(&[b"\x1b", b"[A", b"z"]),
            vec![InputEvent::Key('z')]
        );
        assert_eq!(parse(&[b"\x1b", b"OB"]), vec![]);
    }

    #[test]
    fn escape_then_ctrl_q_still_exits() {
        assert_eq!(parse(&[b"\x1b", b"\x11"]), vec![InputEvent::Exit]);
    }

    #[test]
    fn lone_escape_is_ignored() {
        assert_eq!(parse(&[b"\x1b", b"a"]), vec![InputEvent::Key('a')]);
    }
}
