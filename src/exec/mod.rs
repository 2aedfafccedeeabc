//! Execution engine: redirection, pipe wiring and dispatch.

pub mod search;
pub mod streams;

pub use search::SearchPath;
pub use streams::{Input, Output, Streams};

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::process::Child;

use thiserror::Error;

use crate::commands::{BuiltinContext, BuiltinRegistry};
use crate::history::HistoryStore;
use crate::parse::{Command, Pipeline, RedirectMode, Redirection, Stream};

/// What the shell loop should do after a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitSignal {
    Continue,
    /// Terminate the shell with this status.
    Exit(i32),
}

/// A failure that aborts a pipeline.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("{path}: {source}")]
    Redirect {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("cannot create pipe: {0}")]
    Pipe(#[source] io::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Runs parsed pipelines against a built-in registry.
pub struct Executor {
    builtins: BuiltinRegistry,
}

impl Default for Executor {
    fn default() -> Self {
        Self::new(BuiltinRegistry::standard())
    }
}

impl Executor {
    pub fn new(builtins: BuiltinRegistry) -> Self {
        Self { builtins }
    }

    pub fn builtins(&self) -> &BuiltinRegistry {
        &self.builtins
    }

    /// Run a pipeline on the shell's own standard streams.
    pub fn execute(&self, pipeline: &Pipeline, history: &mut HistoryStore) -> ExitSignal {
        self.execute_with(pipeline, history, Streams::inherited())
    }

    /// Run a pipeline starting from explicit streams, then record its first
    /// stage in `history`.
    ///
    /// Failures are reported on `streams.stderr` and never abort the shell;
    /// only `exit` produces [`ExitSignal::Exit`], in which case nothing is
    /// recorded.
    pub fn execute_with(
        &self,
        pipeline: &Pipeline,
        history: &mut HistoryStore,
        streams: Streams,
    ) -> ExitSignal {
        let Some(first) = pipeline.first() else {
            return ExitSignal::Continue;
        };
        let mut report = streams.stderr.try_clone().ok();

        match self.run(pipeline, history, streams) {
            Ok(ExitSignal::Exit(code)) => return ExitSignal::Exit(code),
            Ok(ExitSignal::Continue) => {}
            Err(e) => {
                log::warn!("pipeline `{first}` failed: {e}");
                if let Some(out) = report.as_mut() {
                    let _ = writeln!(out, "minish: {e}");
                }
            }
        }

        history.append(first.clone());
        ExitSignal::Continue
    }

    /// Wire and run every stage.
    ///
    /// Redirection targets are opened before any stage starts, and every
    /// redirection (input included) applies to the last stage. External
    /// stages are spawned and left running while later stages start, so a
    /// producer never blocks on a full pipe with no reader; built-in stages
    /// run to completion in place. All spawned children are reaped at the end.
    fn run(
        &self,
        pipeline: &Pipeline,
        history: &mut HistoryStore,
        streams: Streams,
    ) -> Result<ExitSignal, ExecError> {
        let Streams {
            stdin,
            stdout,
            stderr,
        } = streams;

        let (mut input, mut last_in, mut last_out, mut last_err) = (stdin, None, stdout, None);
        if let Some(redirection) = &pipeline.redirection {
            match redirection.stream {
                Stream::Stdin => last_in = Some(Input::File(open_target(redirection)?)),
                Stream::Stdout => last_out = Output::File(open_target(redirection)?),
                Stream::Stderr => last_err = Some(Output::File(open_target(redirection)?)),
            }
        }
        let last_err = match last_err {
            Some(err) => err,
            None => stderr.try_clone()?,
        };

        let mut env = StageEnv {
            history,
            search_path: SearchPath::from_env(),
            home: std::env::var("HOME").ok(),
            children: Vec::new(),
        };
        let Some((last, init)) = pipeline.stages.split_last() else {
            return Ok(ExitSignal::Continue);
        };

        let mut signal = ExitSignal::Continue;
        for stage in init {
            let (reader, writer) = io::pipe().map_err(ExecError::Pipe)?;
            let stage_input = std::mem::replace(&mut input, Input::Pipe(reader));
            signal = self.run_stage(
                stage,
                stage_input,
                Output::Pipe(writer),
                stderr.try_clone()?,
                &mut env,
            );
            if signal != ExitSignal::Continue {
                break;
            }
        }
        if signal == ExitSignal::Continue {
            // A file redirected in replaces the upstream pipe; dropping the
            // reader lets the previous stage see a closed pipe.
            let input = last_in.unwrap_or(input);
            signal = self.run_stage(last, input, last_out, last_err, &mut env);
        }
        if let ExitSignal::Exit(code) = signal {
            return Ok(ExitSignal::Exit(code));
        }

        for (name, mut child) in env.children {
            match child.wait() {
                Ok(status) if !status.success() => log::debug!("{name} exited with {status}"),
                Ok(_) => {}
                Err(e) => log::warn!("waiting for {name}: {e}"),
            }
        }
        Ok(ExitSignal::Continue)
    }

    /// Dispatch one stage: a built-in runs to completion here, anything else
    /// is spawned and recorded in `env.children`.
    ///
    /// The stage's handles are dropped before returning, which closes its end
    /// of any pipe.
    fn run_stage(
        &self,
        stage: &Command,
        input: Input,
        mut output: Output,
        mut err: Output,
        env: &mut StageEnv,
    ) -> ExitSignal {
        let Some(builtin) = self.builtins.get(&stage.name) else {
            if let Some(child) = spawn(stage, input, output, err) {
                env.children.push((stage.name.clone(), child));
            }
            return ExitSignal::Continue;
        };

        log::debug!("builtin: {stage}");
        // Built-ins never read their input.
        drop(input);
        let mut ctx = BuiltinContext {
            stdout: &mut output,
            stderr: &mut err,
            history: &mut *env.history,
            builtins: self.builtins.names(),
            search_path: &env.search_path,
            home: env.home.as_deref(),
        };
        match builtin.run(&stage.arguments, &mut ctx) {
            Ok(signal) => signal,
            Err(e) => {
                log::debug!("{} output failed: {e}", stage.name);
                ExitSignal::Continue
            }
        }
    }
}

/// State shared by the stages of one pipeline run.
struct StageEnv<'a> {
    history: &'a mut HistoryStore,
    search_path: SearchPath,
    home: Option<String>,
    children: Vec<(String, Child)>,
}

/// Start an external command on the given handles.
///
/// A launch failure is reported as `<name>: command not found` on the stage's
/// error stream; the handles are dropped so neighbouring stages see EOF.
fn spawn(stage: &Command, input: Input, output: Output, err: Output) -> Option<Child> {
    let mut report = err.try_clone().ok();
    let result = std::process::Command::new(&stage.name)
        .args(&stage.arguments)
        .stdin(input.into_stdio())
        .stdout(output.into_stdio())
        .stderr(err.into_stdio())
        .spawn();
    match result {
        Ok(child) => {
            log::debug!("spawned {} (pid {})", stage.name, child.id());
            Some(child)
        }
        Err(e) => {
            log::debug!("spawn {} failed: {e}", stage.name);
            if let Some(out) = report.as_mut() {
                let _ = writeln!(out, "{}: command not found", stage.name);
            }
            None
        }
    }
}

/// Open a redirection target: read-only for input, create + truncate or
/// create + append for output.
fn open_target(redirection: &Redirection) -> Result<File, ExecError> {
    let path = &redirection.target;
    let result = match (redirection.stream, redirection.mode) {
        (Stream::Stdin, _) => File::open(path),
        (_, RedirectMode::Truncate) => File::create(path),
        (_, RedirectMode::Append) => OpenOptions::new().create(true).append(true).open(path),
    };
    log::debug!("redirect {} -> {path}", redirection.stream.as_str());
    result.map_err(|source| ExecError::Redirect {
        path: path.clone(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;

    fn pipeline(line: &str) -> Pipeline {
        parse(line).unwrap()
    }

    #[test]
    fn empty_pipeline_is_noop() {
        let mut history = HistoryStore::new();
        let signal = Executor::default().execute(&Pipeline::default(), &mut history);
        assert_eq!(signal, ExitSignal::Continue);
        assert!(history.is_empty());
    }

    #[test]
    fn exit_propagates_and_is_not_recorded() {
        let mut history = HistoryStore::new();
        let signal = Executor::default().execute(&pipeline("exit 4"), &mut history);
        assert_eq!(signal, ExitSignal::Exit(4));
        assert!(history.is_empty());
    }

    #[test]
    fn redirect_target_open_failure() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.txt");
        let redirection = Redirection::new(
            Stream::Stdin,
            RedirectMode::Truncate,
            missing.to_str().unwrap(),
        );
        let err = open_target(&redirection).unwrap_err();
        assert!(matches!(err, ExecError::Redirect { .. }));
        assert!(err.to_string().starts_with(missing.to_str().unwrap()));
    }

    #[test]
    fn append_target_keeps_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");
        std::fs::write(&path, "one\n").unwrap();
        let redirection =
            Redirection::new(Stream::Stdout, RedirectMode::Append, path.to_str().unwrap());
        let mut file = open_target(&redirection).unwrap();
        writeln!(file, "two").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn truncate_target_clears_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        std::fs::write(&path, "old content\n").unwrap();
        let redirection =
            Redirection::new(Stream::Stdout, RedirectMode::Truncate, path.to_str().unwrap());
        open_target(&redirection).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }
}
