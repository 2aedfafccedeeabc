//! Byte-driven line editor for a raw-mode terminal.
//!
//! Supports appending printable ASCII, destructive backspace, Tab completion
//! of the command name, and Up/Down history recall. There is no cursor
//! movement inside the line.

pub mod terminal;

pub use terminal::RawMode;

use std::io::{self, Read, Write};

use crate::complete::{Completion, CompletionEngine, CompletionState, Vocabulary};
use crate::history::HistoryStore;

const CTRL_C: u8 = 0x03;
const CTRL_D: u8 = 0x04;
const BACKSPACE: u8 = 0x08;
const TAB: u8 = b'\t';
const ESC: u8 = 0x1b;
const DEL: u8 = 0x7f;

const BELL: &[u8] = b"\x07";
/// Return to column 0 and clear to end of line.
const CLEAR_LINE: &[u8] = b"\r\x1b[K";

/// How a call to [`LineEditor::read_line`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// Enter was pressed; the finished line without its terminator.
    Line(String),
    /// Ctrl-C.
    Interrupted,
    /// Ctrl-D, or the input stream ended.
    EndOfInput,
}

/// In-progress line state, discarded when the line ends.
#[derive(Debug, Default)]
struct LineState {
    buffer: String,
    completion: CompletionState,
    /// Bytes read since ESC while recognizing an arrow key.
    escape: Option<Vec<u8>>,
}

/// Turns terminal bytes into edited lines, echoing to `out`.
pub struct LineEditor<W> {
    out: W,
    prompt: String,
    bell: bool,
}

impl<W: Write> LineEditor<W> {
    pub fn new(out: W, prompt: impl Into<String>) -> Self {
        Self {
            out,
            prompt: prompt.into(),
            bell: true,
        }
    }

    /// Whether to ring the terminal bell on failed completion.
    pub fn with_bell(mut self, bell: bool) -> Self {
        self.bell = bell;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Print the prompt and edit one line from `input`.
    pub fn read_line<R: Read, V: Vocabulary>(
        &mut self,
        input: &mut R,
        history: &mut HistoryStore,
        completer: &CompletionEngine<V>,
    ) -> io::Result<ReadOutcome> {
        self.out.write_all(self.prompt.as_bytes())?;
        self.out.flush()?;

        let mut line = LineState::default();
        loop {
            let Some(byte) = read_byte(input)? else {
                self.out.write_all(b"\r\n")?;
                self.out.flush()?;
                return Ok(ReadOutcome::EndOfInput);
            };
            let outcome = self.handle_byte(byte, &mut line, history, completer)?;
            self.out.flush()?;
            if let Some(outcome) = outcome {
                return Ok(outcome);
            }
        }
    }

    fn handle_byte<V: Vocabulary>(
        &mut self,
        byte: u8,
        line: &mut LineState,
        history: &mut HistoryStore,
        completer: &CompletionEngine<V>,
    ) -> io::Result<Option<ReadOutcome>> {
        // Control keys end the line even mid escape sequence.
        match byte {
            CTRL_C => {
                self.out.write_all(b"\r\n")?;
                return Ok(Some(ReadOutcome::Interrupted));
            }
            CTRL_D => {
                self.out.write_all(b"\r\n")?;
                return Ok(Some(ReadOutcome::EndOfInput));
            }
            _ => {}
        }

        if let Some(mut pending) = line.escape.take() {
            pending.push(byte);
            if pending == b"[" {
                line.escape = Some(pending);
                return Ok(None);
            }
            let recalled = match pending.as_slice() {
                b"[A" => history.previous().map(ToString::to_string),
                b"[B" => history.next().map(ToString::to_string),
                _ => None,
            };
            if let Some(text) = recalled {
                self.replace_buffer(line, text)?;
            }
            return Ok(None);
        }

        match byte {
            b'\r' | b'\n' => {
                self.out.write_all(b"\r\n")?;
                return Ok(Some(ReadOutcome::Line(std::mem::take(&mut line.buffer))));
            }
            BACKSPACE | DEL => {
                if line.buffer.pop().is_some() {
                    line.completion.reset();
                    self.out.write_all(b"\x08 \x08")?;
                }
            }
            TAB => self.complete(line, completer)?,
            ESC => line.escape = Some(Vec::with_capacity(2)),
            0x20..=0x7e => {
                line.buffer.push(byte as char);
                line.completion.reset();
                self.out.write_all(&[byte])?;
            }
            _ => {}
        }
        Ok(None)
    }

    fn complete<V: Vocabulary>(
        &mut self,
        line: &mut LineState,
        completer: &CompletionEngine<V>,
    ) -> io::Result<()> {
        let tab_count = line.completion.press(&line.buffer);
        match completer.complete(&line.buffer, tab_count) {
            Completion::NoMatch => self.ring()?,
            Completion::FullMatch(word) => {
                line.buffer = format!("{word} ");
                line.completion.reset();
                self.redraw(&line.buffer)?;
            }
            Completion::PartialMatch(prefix) => {
                line.buffer = prefix;
                line.completion.reset();
                self.redraw(&line.buffer)?;
            }
            Completion::MultipleMatch { listing: None, .. } => self.ring()?,
            Completion::MultipleMatch {
                listing: Some(candidates),
                ..
            } => {
                write!(
                    self.out,
                    "\r\n{}\r\n{}{}",
                    candidates.join("  "),
                    self.prompt,
                    line.buffer
                )?;
                line.completion.reset();
            }
        }
        Ok(())
    }

    /// Swap the whole buffer for `text` (history recall) and redraw.
    fn replace_buffer(&mut self, line: &mut LineState, text: String) -> io::Result<()> {
        line.buffer = text;
        line.completion.reset();
        self.redraw(&line.buffer)
    }

    fn redraw(&mut self, buffer: &str) -> io::Result<()> {
        self.out.write_all(CLEAR_LINE)?;
        self.out.write_all(self.prompt.as_bytes())?;
        self.out.write_all(buffer.as_bytes())
    }

    fn ring(&mut self) -> io::Result<()> {
        if self.bell {
            self.out.write_all(BELL)?;
        }
        Ok(())
    }
}

/// One byte from `input`, or `None` at end of stream.
pub(crate) fn read_byte<R: Read>(input: &mut R) -> io::Result<Option<u8>> {
    let mut buf = [0u8; 1];
    loop {
        match input.read(&mut buf) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(buf[0])),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}
