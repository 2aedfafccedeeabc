use std::io::{self, Write};

use crate::commands::{Builtin, BuiltinContext};
use crate::exec::ExitSignal;

/// Reports, for each name, whether it is a built-in, an executable on the
/// search path, or unknown.
pub struct Type;

impl Builtin for Type {
    fn name(&self) -> &'static str {
        "type"
    }

    fn run(&self, args: &[String], ctx: &mut BuiltinContext) -> io::Result<ExitSignal> {
        if args.is_empty() {
            writeln!(ctx.stderr, "type: missing argument")?;
        }
        for name in args {
            if ctx.builtins.contains(&name.as_str()) {
                writeln!(ctx.stdout, "{name} is a shell builtin")?;
            } else if let Some(path) = ctx.search_path.find(name) {
                writeln!(ctx.stdout, "{name} is {}", path.display())?;
            } else {
                writeln!(ctx.stdout, "{name}: not found")?;
            }
        }
        Ok(ExitSignal::Continue)
    }
}
