use std::io;

use crossterm::terminal;

/// Puts the terminal in raw mode (no line buffering, no echo) until dropped.
pub struct RawMode {
    _private: (),
}

impl RawMode {
    pub fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        log::trace!("raw mode on");
        Ok(Self { _private: () })
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            log::warn!("failed to restore terminal mode: {e}");
        }
        log::trace!("raw mode off");
    }
}
