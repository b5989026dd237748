//! Keeps the built-in transcript readable after the session takes the sink.

use anyhow::Result;
use scanspell::inject::{KeyCommand, KeystrokeSink, TranscriptSink};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Clone, Default)]
pub(crate) struct SharedTranscript(Arc<Mutex<TranscriptSink>>);

impl SharedTranscript {
    fn sink(&self) -> MutexGuard<'_, TranscriptSink> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn output(&self) -> String {
        self.sink().output().to_string()
    }
}

impl KeystrokeSink for SharedTranscript {
    fn send_text(&mut self, text: &str) -> Result<()> {
        self.sink().send_text(text)
    }

    fn send_key(&mut self, key: KeyCommand) -> Result<()> {
        self.sink().send_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_one_transcript() {
        let transcript = SharedTranscript::default();
        let mut writer = transcript.clone();
        writer.send_text("hola").unwrap();
        writer.send_key(KeyCommand::Backspace).unwrap();
        assert_eq!(transcript.output(), "hol");
    }
}
