//! Delivery of typed text and navigation keys to whatever is being controlled.

use anyhow::{bail, Context, Result};
use std::io::Write;
use std::process::{Child, ChildStdin, Command, Stdio};

use crate::log_debug;

/// Named non-text keys. Each maps to the byte sequence a terminal sends for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCommand {
    Tab,
    Enter,
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,
    End,
    /// Meta prefix: the next key arrives Alt-modified.
    Alt,
    Escape,
    ChangeWindow,
    CloseWindow,
    Backspace,
    SearchBar,
    NewTab,
    CloseTab,
    SwitchTab,
    ReopenTab,
    GoBack,
    GoForward,
}

impl KeyCommand {
    pub fn label(self) -> &'static str {
        match self {
            KeyCommand::Tab => "Tab",
            KeyCommand::Enter => "Enter",
            KeyCommand::Up => "↑",
            KeyCommand::Down => "↓",
            KeyCommand::Left => "←",
            KeyCommand::Right => "→",
            KeyCommand::PageUp => "Page Up",
            KeyCommand::PageDown => "Page Down",
            KeyCommand::Home => "Home",
            KeyCommand::End => "End",
            KeyCommand::Alt => "Alt",
            KeyCommand::Escape => "Esc",
            KeyCommand::ChangeWindow => "Change Window",
            KeyCommand::CloseWindow => "Close Window",
            KeyCommand::Backspace => "Backspace",
            KeyCommand::SearchBar => "Search Bar",
            KeyCommand::NewTab => "New Tab",
            KeyCommand::CloseTab => "Close Tab",
            KeyCommand::SwitchTab => "Switch Tab",
            KeyCommand::ReopenTab => "Re-open Tab",
            KeyCommand::GoBack => "Go Back",
            KeyCommand::GoForward => "Go Forward",
        }
    }

    /// Terminal encoding. Ctrl+Tab and Ctrl+Shift+T have no legacy encoding and use
    /// the CSI-u form.
    pub fn bytes(self) -> &'static [u8] {
        match self {
            KeyCommand::Tab => b"\t",
            KeyCommand::Enter => b"\r",
            KeyCommand::Up => b"\x1b[A",
            KeyCommand::Down => b"\x1b[B",
            KeyCommand::Right => b"\x1b[C",
            KeyCommand::Left => b"\x1b[D",
            KeyCommand::PageUp => b"\x1b[5~",
            KeyCommand::PageDown => b"\x1b[6~",
            KeyCommand::Home => b"\x1b[H",
            KeyCommand::End => b"\x1b[F",
            KeyCommand::Alt | KeyCommand::Escape => b"\x1b",
            KeyCommand::ChangeWindow => b"\x1b\x1b",
            KeyCommand::CloseWindow => b"\x1b\x1bOS",
            KeyCommand::Backspace => b"\x7f",
            KeyCommand::SearchBar => b"\x0c",
            KeyCommand::NewTab => b"\x14",
            KeyCommand::CloseTab => b"\x17",
            KeyCommand::SwitchTab => b"\x1b[9;5u",
            KeyCommand::ReopenTab => b"\x1b[116;6u",
            KeyCommand::GoBack => b"\x1b[1;3D",
            KeyCommand::GoForward => b"\x1b[1;3C",
        }
    }
}

/// Receiver of committed output. Failures are reported to the caller, which logs
/// them and carries on; scanning never depends on delivery.
pub trait KeystrokeSink: Send {
    fn send_text(&mut self, text: &str) -> Result<()>;
    fn send_key(&mut self, key: KeyCommand) -> Result<()>;
}

/// What a [`RecordingSink`] saw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    Text(String),
    Key(KeyCommand),
}

/// Keeps every request in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Vec<SinkEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SinkEvent] {
        &self.events
    }

    /// Concatenated text requests, ignoring keys.
    pub fn text(&self) -> String {
        self.events
            .iter()
            .filter_map(|event| match event {
                SinkEvent::Text(text) => Some(text.as_str()),
                SinkEvent::Key(_) => None,
            })
            .collect()
    }
}

impl KeystrokeSink for RecordingSink {
    fn send_text(&mut self, text: &str) -> Result<()> {
        self.events.push(SinkEvent::Text(text.to_string()));
        Ok(())
    }

    fn send_key(&mut self, key: KeyCommand) -> Result<()> {
        self.events.push(SinkEvent::Key(key));
        Ok(())
    }
}

/// Used when no target program is configured: applies output to an in-memory
/// buffer shown under the keyboard.
#[derive(Debug, Default)]
pub struct TranscriptSink {
    output: String,
    last_key: Option<KeyCommand>,
}

impl TranscriptSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn last_key(&self) -> Option<KeyCommand> {
        self.last_key
    }
}

impl KeystrokeSink for TranscriptSink {
    fn send_text(&mut self, text: &str) -> Result<()> {
        self.output.push_str(text);
        Ok(())
    }

    fn send_key(&mut self, key: KeyCommand) -> Result<()> {
        match key {
            KeyCommand::Backspace => {
                self.output.pop();
            }
            KeyCommand::Enter => self.output.push('\n'),
            KeyCommand::Tab => self.output.push('\t'),
            _ => {}
        }
        self.last_key = Some(key);
        Ok(())
    }
}

/// Writes output to the stdin of a spawned program.
pub struct ChildProcessSink {
    child: Child,
    stdin: Option<ChildStdin>,
}

impl ChildProcessSink {
    pub fn spawn(argv: &[String]) -> Result<Self> {
        let Some((program, args)) = argv.split_first() else {
            bail!("target command is empty");
        };
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("failed to start target '{program}'"))?;
        let stdin = child.stdin.take();
        log_debug(&format!("target started: {program} (pid {})", child.id()));
        Ok(Self { child, stdin })
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let Some(stdin) = self.stdin.as_mut() else {
            bail!("target stdin is closed");
        };
        let result = stdin.write_all(bytes).and_then(|()| stdin.flush());
        if let Err(err) = result {
            // A broken pipe means the target exited; stop writing to it.
            self.stdin = None;
            return Err(err).context("failed to write to target");
        }
        Ok(())
    }
}

impl KeystrokeSink for ChildProcessSink {
    fn send_text(&mut self, text: &str) -> Result<()> {
        self.write_bytes(text.as_bytes())
    }

    fn send_key(&mut self, key: KeyCommand) -> Result<()> {
        self.write_bytes(key.bytes())
    }
}

impl Drop for ChildProcessSink {
    fn drop(&mut self) {
        self.stdin.take();
        match self.child.try_wait() {
            Ok(Some(_)) => {}
            _ => {
                let _ = self.child.kill();
                let _ = self.child.wait();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_keys_use_csi_sequences() {
        assert_eq!(KeyCommand::Up.bytes(), b"\x1b[A");
        assert_eq!(KeyCommand::Left.bytes(), b"\x1b[D");
        assert_eq!(KeyCommand::Backspace.bytes(), b"\x7f");
        assert_eq!(KeyCommand::PageDown.bytes(), b"\x1b[6~");
    }

    #[test]
    fn recording_sink_keeps_order() {
        let mut sink = RecordingSink::new();
        sink.send_text("hi").unwrap();
        sink.send_key(KeyCommand::Backspace).unwrap();
        sink.send_text("!").unwrap();
        assert_eq!(
            sink.events(),
            &[
                SinkEvent::Text("hi".to_string()),
                SinkEvent::Key(KeyCommand::Backspace),
                SinkEvent::Text("!".to_string()),
            ]
        );
        assert_eq!(sink.text(), "hi!");
    }

    #[test]
    fn transcript_sink_applies_editing_keys() {
        let mut sink = TranscriptSink::new();
        sink.send_text("cats").unwrap();
        sink.send_key(KeyCommand::Backspace).unwrap();
        sink.send_key(KeyCommand::Enter).unwrap();
        sink.send_key(KeyCommand::PageUp).unwrap();
        assert_eq!(sink.output(), "cat\n");
        assert_eq!(sink.last_key(), Some(KeyCommand::PageUp));
    }

    #[test]
    fn child_sink_rejects_empty_command() {
        assert!(ChildProcessSink::spawn(&[]).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn child_sink_feeds_stdin() {
        let path = std::env::temp_dir().join(format!("scanspell-sink-{}.txt", std::process::id()));
        let argv = vec![
            "sh".to_string(),
            "-c".to_string(),
            format!("cat > '{}'", path.display()),
        ];
        {
            let mut sink = ChildProcessSink::spawn(&argv).unwrap();
            sink.send_text("hola").unwrap();
            sink.send_key(KeyCommand::Enter).unwrap();
            // Closing stdin lets `cat` finish before the drop reaps it.
            sink.stdin.take();
            let _ = sink.child.wait();
        }
        assert_eq!(std::fs::read(&path).unwrap(), b"hola\r");
        let _ = std::fs::remove_file(&path);
    }
}
