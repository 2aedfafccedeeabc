use std::io::{self, Write};

use crate::commands::{Builtin, BuiltinContext};
use crate::exec::ExitSignal;

/// Prints its arguments joined by single spaces, then a newline.
pub struct Echo;

impl Builtin for Echo {
    fn name(&self) -> &'static str {
        "echo"
    }

    fn run(&self, args: &[String], ctx: &mut BuiltinContext) -> io::Result<ExitSignal> {
        writeln!(ctx.stdout, "{}", args.join(" "))?;
        Ok(ExitSignal::Continue)
    }
}

/// Prints the current working directory.
pub struct Pwd;

impl Builtin for Pwd {
    fn name(&self) -> &'static str {
        "pwd"
    }

    fn run(&self, _args: &[String], ctx: &mut BuiltinContext) -> io::Result<ExitSignal> {
        match std::env::current_dir() {
            Ok(dir) => writeln!(ctx.stdout, "{}", dir.display())?,
            Err(e) => writeln!(ctx.stderr, "pwd: {e}")?,
        }
        Ok(ExitSignal::Continue)
    }
}

/// Ends the shell with an optional numeric status (default 0).
pub struct Exit;

impl Builtin for Exit {
    fn name(&self) -> &'static str {
        "exit"
    }

    fn run(&self, args: &[String], ctx: &mut BuiltinContext) -> io::Result<ExitSignal> {
        let Some(arg) = args.first() else {
            return Ok(ExitSignal::Exit(0));
        };
        match arg.parse::<i32>() {
            Ok(code) => Ok(ExitSignal::Exit(code)),
            Err(_) => {
                writeln!(ctx.stderr, "exit: {arg}: numeric argument required")?;
                Ok(ExitSignal::Exit(2))
            }
        }
    }
}
