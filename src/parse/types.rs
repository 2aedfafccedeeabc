//! Types produced by the parser and consumed by the execution engine.

use std::fmt;

/// Which standard stream a redirection replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdin,
    Stdout,
    Stderr,
}

impl Stream {
    pub fn as_str(self) -> &'static str {
        match self {
            Stream::Stdin => "stdin",
            Stream::Stdout => "stdout",
            Stream::Stderr => "stderr",
        }
    }
}

/// How an output redirection target is opened.
///
/// Input redirections always carry `Truncate`; the file is opened read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectMode {
    /// `>`, `1>`, `2>`: create or clear the target.
    Truncate,
    /// `>>`, `1>>`, `2>>`: create or extend the target.
    Append,
}

/// A single redirection attached to the last stage of a pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirection {
    pub stream: Stream,
    pub mode: RedirectMode,
    /// Target path, taken verbatim (trimmed) from the text after the operator.
    pub target: String,
}

impl Redirection {
    pub fn new(stream: Stream, mode: RedirectMode, target: impl Into<String>) -> Self {
        Self {
            stream,
            mode,
            target: target.into(),
        }
    }
}

/// One stage of a pipeline: a command name and its arguments.
///
/// A stage produced by the parser never has an empty name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub arguments: Vec<String>,
}

impl Command {
    pub fn new(name: impl Into<String>, arguments: Vec<String>) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    /// Build a command from a token list; `None` when there are no tokens.
    pub fn from_words(mut words: Vec<String>) -> Option<Self> {
        if words.is_empty() {
            return None;
        }
        let arguments = words.split_off(1);
        let name = words.pop()?;
        Some(Self { name, arguments })
    }
}

/// Renders as the name followed by each argument, separated by single spaces.
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for arg in &self.arguments {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// A parsed input line: zero or more stages plus an optional redirection.
///
/// Every stage but the first reads from the previous stage's output.
/// `stages` is empty for blank input, which executes as a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pipeline {
    pub stages: Vec<Command>,
    /// Applies to the last stage. An input redirection replaces that
    /// stage's pipe from the previous stage.
    pub redirection: Option<Redirection>,
}

impl Pipeline {
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// The stage that is recorded in history for this line.
    pub fn first(&self) -> Option<&Command> {
        self.stages.first()
    }
}
