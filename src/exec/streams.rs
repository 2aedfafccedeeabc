//! Explicit standard-stream handles passed to each pipeline stage.
//!
//! Each stage gets its own input, output and error handle. Built-ins write
//! through them; external commands receive them as [`Stdio`]. Nothing
//! process-wide is rebound, so nothing has to be restored afterwards.

use std::fs::File;
use std::io::{self, PipeReader, PipeWriter, Write};
use std::process::Stdio;

/// Where a stage reads from.
#[derive(Debug)]
pub enum Input {
    /// The shell's own standard input.
    Stdin,
    File(File),
    Pipe(PipeReader),
}

impl Input {
    pub fn into_stdio(self) -> Stdio {
        match self {
            Input::Stdin => Stdio::inherit(),
            Input::File(f) => f.into(),
            Input::Pipe(p) => p.into(),
        }
    }
}

/// Where a stage writes to.
#[derive(Debug)]
pub enum Output {
    /// The shell's own standard output.
    Stdout,
    /// The shell's own standard error.
    Stderr,
    File(File),
    Pipe(PipeWriter),
}

impl Output {
    pub fn into_stdio(self) -> Stdio {
        match self {
            Output::Stdout => io::stdout().into(),
            Output::Stderr => io::stderr().into(),
            Output::File(f) => f.into(),
            Output::Pipe(p) => p.into(),
        }
    }

    /// A second handle to the same destination.
    pub fn try_clone(&self) -> io::Result<Output> {
        Ok(match self {
            Output::Stdout => Output::Stdout,
            Output::Stderr => Output::Stderr,
            Output::File(f) => Output::File(f.try_clone()?),
            Output::Pipe(p) => Output::Pipe(p.try_clone()?),
        })
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout => io::stdout().write(buf),
            Output::Stderr => io::stderr().write(buf),
            Output::File(f) => f.write(buf),
            Output::Pipe(p) => p.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout => io::stdout().flush(),
            Output::Stderr => io::stderr().flush(),
            Output::File(f) => f.flush(),
            Output::Pipe(p) => p.flush(),
        }
    }
}

/// The three handles a pipeline starts from before redirection.
#[derive(Debug)]
pub struct Streams {
    pub stdin: Input,
    pub stdout: Output,
    pub stderr: Output,
}

impl Streams {
    /// The shell's own standard streams.
    pub fn inherited() -> Self {
        Self {
            stdin: Input::Stdin,
            stdout: Output::Stdout,
            stderr: Output::Stderr,
        }
    }
}
