//! minish: a small interactive shell.
//!
//! A line is split at its first redirection operator, cut into `|` stages,
//! and each stage is tokenized with POSIX-style quoting. Stages are either
//! built-ins run in-process or external programs found on `PATH`, connected
//! by OS pipes. Input comes from a raw-mode line editor with Tab completion
//! of command names and Up/Down history recall.
//!
//! # Architecture
//!
//! - **[`parse`]**: Tokenizer, redirection split, pipeline types.
//! - **[`exec`]**: Executor: redirection, pipe wiring, process spawning, `PATH` search.
//! - **[`commands`]**: Built-ins: `echo`, `exit`, `type`, `pwd`, `cd`, `history`.
//! - **[`history`]**: Bounded command history with a navigation cursor and file persistence.
//! - **[`complete`]**: Command-name completion over built-ins and executables.
//! - **[`editor`]**: Byte-driven line editor and raw terminal mode.
//! - **[`session`]**: The read-eval loop.
//! - **[`config`]**: Configuration loading: embedded defaults + user overlay merge.
//! - **[`logging`]**: Diagnostic log at `~/.local/share/minish/minish.log`.

/// Built-in command trait and implementations.
pub mod commands;
/// Tab completion of command names.
pub mod complete;
/// Configuration types, loading, and overlay merge logic.
pub mod config;
/// Line editing on a raw terminal.
pub mod editor;
/// Pipeline execution.
pub mod exec;
/// Command history.
pub mod history;
/// File-based diagnostic logging.
pub mod logging;
/// Line parsing: tokenizer, redirection, pipeline types.
pub mod parse;
/// Interactive session loop.
pub mod session;

pub use session::Shell;
