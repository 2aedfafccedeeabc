//! The read-eval loop tying the editor, parser, executor and history together.

use std::fs::File;
use std::io::{self, IsTerminal, Read, Write};
use std::os::fd::AsFd;
use std::path::PathBuf;

use crate::complete::{CompletionEngine, PathVocabulary};
use crate::config::Config;
use crate::editor::{LineEditor, RawMode, ReadOutcome, read_byte};
use crate::exec::{ExitSignal, Executor, Streams};
use crate::history::{self, HistoryStore, SaveMode};
use crate::parse::{self, ParseOptions};

/// One interactive (or scripted) shell session.
pub struct Shell {
    config: Config,
    executor: Executor,
    history: HistoryStore,
    completer: CompletionEngine<PathVocabulary>,
    options: ParseOptions,
    history_file: Option<PathBuf>,
}

impl Shell {
    pub fn new(config: Config) -> Self {
        let executor = Executor::default();
        let builtins = executor
            .builtins()
            .names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        let mut history = HistoryStore::with_capacity(config.history.capacity);
        let history_file = config.history_file();
        if let Some(path) = &history_file {
            match history::load(&mut history, path) {
                Ok(_) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => log::warn!("reading {}: {e}", path.display()),
            }
            // Entries already on disk are not appended again on exit.
            history.mark_flushed();
        }

        Self {
            options: config.parse_options(),
            completer: CompletionEngine::new(PathVocabulary::new(builtins)),
            config,
            executor,
            history,
            history_file,
        }
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Parse and run one line on the given streams.
    ///
    /// Parse errors are reported on `streams.stderr` and leave history
    /// untouched.
    pub fn run_line_with(&mut self, line: &str, mut streams: Streams) -> ExitSignal {
        match parse::parse_with(line, self.options) {
            Ok(pipeline) => self.executor.execute_with(&pipeline, &mut self.history, streams),
            Err(e) => {
                log::debug!("parse error in {line:?}: {e}");
                let _ = writeln!(streams.stderr, "minish: {e}");
                ExitSignal::Continue
            }
        }
    }

    /// Parse and run one line on the shell's own standard streams.
    pub fn run_line(&mut self, line: &str) -> ExitSignal {
        self.run_line_with(line, Streams::inherited())
    }

    /// Run until `exit`, Ctrl-D or end of input; returns the exit status.
    ///
    /// Reads through the line editor when stdin is a terminal, otherwise
    /// one line at a time without a prompt.
    pub fn run(&mut self) -> i32 {
        let code = if io::stdin().is_terminal() {
            self.run_interactive()
        } else {
            // Unbuffered: commands that inherit stdin read what follows
            // their own line.
            match io::stdin().as_fd().try_clone_to_owned() {
                Ok(fd) => self.run_script(File::from(fd)),
                Err(e) => {
                    log::error!("reading input: {e}");
                    1
                }
            }
        };
        self.save_history();
        code
    }

    fn run_interactive(&mut self) -> i32 {
        log::info!("interactive session started");
        let mut editor =
            LineEditor::new(io::stdout(), self.config.settings.prompt.clone())
                .with_bell(self.config.settings.bell);
        let mut stdin = io::stdin();

        loop {
            let outcome = {
                let _raw = match RawMode::enable() {
                    Ok(raw) => raw,
                    Err(e) => {
                        eprintln!("minish: cannot enter raw mode: {e}");
                        return 1;
                    }
                };
                editor.read_line(&mut stdin, &mut self.history, &self.completer)
            };
            let line = match outcome {
                Ok(ReadOutcome::Line(line)) => line,
                Ok(ReadOutcome::Interrupted) | Ok(ReadOutcome::EndOfInput) => return 0,
                Err(e) => {
                    log::error!("reading input: {e}");
                    return 1;
                }
            };
            if let ExitSignal::Exit(code) = self.run_line(&line) {
                return code;
            }
        }
    }

    /// Run every line of `input`, stopping early on `exit`.
    pub fn run_script<R: Read>(&mut self, mut input: R) -> i32 {
        loop {
            let line = match read_script_line(&mut input) {
                Ok(Some(line)) => line,
                Ok(None) => return 0,
                Err(e) => {
                    log::error!("reading input: {e}");
                    return 1;
                }
            };
            if let ExitSignal::Exit(code) = self.run_line(&line) {
                return code;
            }
        }
    }

    /// Append this session's new entries to the history file, if any.
    fn save_history(&mut self) {
        let Some(path) = &self.history_file else {
            return;
        };
        if let Err(e) = history::save(&mut self.history, path, SaveMode::Append) {
            log::warn!("writing {}: {e}", path.display());
        }
    }
}

/// One line of `input` without its `\n` (or `\r\n`), read a byte at a time
/// so nothing past the newline is consumed. `None` at end of input.
fn read_script_line<R: Read>(input: &mut R) -> io::Result<Option<String>> {
    let mut bytes = Vec::new();
    loop {
        match read_byte(input)? {
            Some(b'\n') => break,
            Some(byte) => bytes.push(byte),
            None if bytes.is_empty() => return Ok(None),
            None => break,
        }
    }
    if bytes.last() == Some(&b'\r') {
        bytes.pop();
    }
    Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
}
