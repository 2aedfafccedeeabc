//! Built-in commands.
//!
//! Each built-in implements [`Builtin`] and runs inside the shell process,
//! writing through the handles in its [`BuiltinContext`]. Built-ins never
//! spawn a process.

/// `cd`: change the working directory.
pub mod cd;
/// `history`: list, load and save the command history.
pub mod history;
/// `echo`, `pwd` and `exit`.
pub mod simple;
/// `type`: report how a name would be run.
pub mod type_cmd;

use std::collections::HashMap;
use std::io::{self, Write};

use crate::exec::{ExitSignal, SearchPath};
use crate::history::HistoryStore;

/// Everything a built-in may read or touch while it runs.
pub struct BuiltinContext<'a> {
    pub stdout: &'a mut dyn Write,
    pub stderr: &'a mut dyn Write,
    pub history: &'a mut HistoryStore,
    /// Names of all registered built-ins.
    pub builtins: &'a [&'static str],
    pub search_path: &'a SearchPath,
    /// Value of `HOME`, if set.
    pub home: Option<&'a str>,
}

/// A command implemented inside the shell.
pub trait Builtin: Send + Sync {
    fn name(&self) -> &'static str;

    /// Run with the given arguments (the command name excluded).
    ///
    /// User-facing failures are written to `ctx.stderr` and still return
    /// `Ok`; an `Err` means the output handles themselves failed.
    fn run(&self, args: &[String], ctx: &mut BuiltinContext) -> io::Result<ExitSignal>;
}

/// Dispatch table from name to built-in.
pub struct BuiltinRegistry {
    specs: HashMap<&'static str, Box<dyn Builtin>>,
    names: Vec<&'static str>,
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl BuiltinRegistry {
    pub fn empty() -> Self {
        Self {
            specs: HashMap::new(),
            names: Vec::new(),
        }
    }

    /// `exit`, `echo`, `type`, `pwd`, `cd` and `history`.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(simple::Exit));
        registry.register(Box::new(simple::Echo));
        registry.register(Box::new(type_cmd::Type));
        registry.register(Box::new(simple::Pwd));
        registry.register(Box::new(cd::Cd));
        registry.register(Box::new(history::History));
        registry
    }

    /// Add a built-in, replacing any existing one with the same name.
    pub fn register(&mut self, builtin: Box<dyn Builtin>) {
        let name = builtin.name();
        if self.specs.insert(name, builtin).is_none() {
            self.names.push(name);
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn Builtin> {
        self.specs.get(name).map(|b| b.as_ref())
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> &[&'static str] {
        &self.names
    }
}
