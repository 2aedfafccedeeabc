use std::io::{self, Write};
use std::path::Path;

use crate::commands::{Builtin, BuiltinContext};
use crate::exec::ExitSignal;

/// Changes the working directory of the shell process.
///
/// With no argument, goes to `HOME`. A leading `~` is expanded against `HOME`.
pub struct Cd;

impl Builtin for Cd {
    fn name(&self) -> &'static str {
        "cd"
    }

    fn run(&self, args: &[String], ctx: &mut BuiltinContext) -> io::Result<ExitSignal> {
        let target = match args.first() {
            Some(arg) => shellexpand::tilde_with_context(arg.as_str(), || ctx.home).into_owned(),
            None => match ctx.home {
                Some(home) => home.to_string(),
                None => {
                    writeln!(ctx.stderr, "cd: HOME not set")?;
                    return Ok(ExitSignal::Continue);
                }
            },
        };

        if let Err(e) = std::env::set_current_dir(Path::new(&target)) {
            log::debug!("cd {target}: {e}");
            let shown = args.first().map_or(target.as_str(), String::as_str);
            let reason = match e.kind() {
                io::ErrorKind::NotADirectory => "Not a directory",
                io::ErrorKind::PermissionDenied => "Permission denied",
                _ => "No such file or directory",
            };
            writeln!(ctx.stderr, "cd: {shown}: {reason}")?;
        }
        Ok(ExitSignal::Continue)
    }
}
