use std::io::{self, Write};
use std::path::Path;

use crate::commands::{Builtin, BuiltinContext};
use crate::exec::ExitSignal;
use crate::history::{self, SaveMode};

/// `history [N]`, `history -r FILE`, `history -w FILE`, `history -a FILE`.
pub struct History;

impl Builtin for History {
    fn name(&self) -> &'static str {
        "history"
    }

    fn run(&self, args: &[String], ctx: &mut BuiltinContext) -> io::Result<ExitSignal> {
        match args.first().map(String::as_str) {
            None => list(ctx, None)?,
            Some(flag @ ("-r" | "-w" | "-a")) => {
                let Some(path) = args.get(1) else {
                    writeln!(ctx.stderr, "history: {flag}: option requires an argument")?;
                    return Ok(ExitSignal::Continue);
                };
                let path = Path::new(path);
                let result = match flag {
                    "-r" => history::load(ctx.history, path).map(|_| ()),
                    "-w" => history::save(ctx.history, path, SaveMode::Truncate),
                    _ => history::save(ctx.history, path, SaveMode::Append),
                };
                if let Err(e) = result {
                    log::warn!("history {flag} {}: {e}", path.display());
                    writeln!(ctx.stderr, "history: {}: {e}", path.display())?;
                }
            }
            Some(limit) => match limit.parse::<usize>() {
                Ok(n) => list(ctx, Some(n))?,
                Err(_) => writeln!(ctx.stderr, "history: {limit}: numeric argument required")?,
            },
        }
        Ok(ExitSignal::Continue)
    }
}

fn list(ctx: &mut BuiltinContext, limit: Option<usize>) -> io::Result<()> {
    for (n, entry) in ctx.history.numbered(limit) {
        writeln!(ctx.stdout, "{n:>5}  {entry}")?;
    }
    Ok(())
}
