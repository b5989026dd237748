//! Terminal setup for the scanning overlay. Whatever was switched on is switched
//! off again on drop, on explicit restore, and from the panic hook.

use crossterm::{
    cursor::{Hide, Show},
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::{
    io::{self, Write},
    panic,
    sync::{
        atomic::{AtomicU8, Ordering},
        OnceLock,
    },
};

const RAW_MODE: u8 = 1 << 0;
const ALT_SCREEN: u8 = 1 << 1;
const MOUSE_CAPTURE: u8 = 1 << 2;
const CURSOR_HIDDEN: u8 = 1 << 3;

static ACTIVE: AtomicU8 = AtomicU8::new(0);
static PANIC_HOOK_INSTALLED: OnceLock<()> = OnceLock::new();

fn mark(flag: u8) {
    ACTIVE.fetch_or(flag, Ordering::SeqCst);
}

/// Holds the terminal in overlay mode for its lifetime.
pub struct TerminalRestoreGuard {
    _private: (),
}

impl TerminalRestoreGuard {
    /// Raw mode, alternate screen, hidden cursor and (optionally) mouse reporting.
    /// Steps that succeeded before a failure are still undone by the guard.
    pub fn enter(stdout: &mut impl Write, mouse: bool) -> io::Result<Self> {
        install_terminal_panic_hook();
        let guard = Self { _private: () };
        enable_raw_mode()?;
        mark(RAW_MODE);
        execute!(stdout, EnterAlternateScreen)?;
        mark(ALT_SCREEN);
        execute!(stdout, Hide)?;
        mark(CURSOR_HIDDEN);
        if mouse {
            execute!(stdout, EnableMouseCapture)?;
            mark(MOUSE_CAPTURE);
        }
        Ok(guard)
    }

    pub fn restore(&self) {
        restore_terminal();
    }
}

impl Drop for TerminalRestoreGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

/// Undo every step recorded as active. Safe to call more than once.
pub fn restore_terminal() {
    let active = ACTIVE.swap(0, Ordering::SeqCst);
    if active == 0 {
        return;
    }
    if active & RAW_MODE != 0 {
        let _ = disable_raw_mode();
    }
    let mut stdout = io::stdout();
    if active & MOUSE_CAPTURE != 0 {
        let _ = execute!(stdout, DisableMouseCapture);
    }
    if active & ALT_SCREEN != 0 {
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
    if active & CURSOR_HIDDEN != 0 {
        let _ = execute!(stdout, Show);
    }
    let _ = stdout.flush();
}

fn install_terminal_panic_hook() {
    PANIC_HOOK_INSTALLED.get_or_init(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            restore_terminal();
            crate::log_panic(info);
            let location = info
                .location()
                .map(|loc| format!("{}:{}", loc.file(), loc.line()))
                .unwrap_or_else(|| "unknown".to_string());
            crate::log_debug(&format!("scanspell panicked at {location}"));
            crate::log_debug_content(&format!("panic payload: {info}"));
            previous(info);
        }));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restore_without_setup_is_a_no_op() {
        restore_terminal();
        assert_eq!(ACTIVE.load(Ordering::SeqCst), 0);
        restore_terminal();
    }
}
