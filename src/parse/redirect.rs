//! Positional redirection scan.
//!
//! The scan runs on the raw line before any quote processing and honors only
//! the first `>` or `<` it finds. By default it is not quote-aware: a `>`
//! inside a quoted argument still starts a redirection. Callers that want the
//! operator ignored inside quotes opt in with `quote_aware`.

use super::ParseError;
use super::types::{RedirectMode, Redirection, Stream};

/// Split `line` into the command text and an optional redirection.
///
/// Returns the command text (trimmed) and the parsed redirection, if any.
/// An operator with nothing after it is a [`ParseError::MissingRedirectTarget`].
pub fn split_redirection(
    line: &str,
    quote_aware: bool,
) -> Result<(&str, Option<Redirection>), ParseError> {
    let Some(pos) = find_operator(line, quote_aware) else {
        return Ok((line.trim(), None));
    };
    let bytes = line.as_bytes();
    let prev = pos.checked_sub(1).map(|p| bytes[p]);

    let (stream, mode, lhs_end, rhs_start) = if bytes[pos] == b'<' {
        (Stream::Stdin, RedirectMode::Truncate, pos, pos + 1)
    } else {
        let doubled = bytes.get(pos + 1) == Some(&b'>');
        let (mode, rhs_start) = if doubled {
            (RedirectMode::Append, pos + 2)
        } else {
            (RedirectMode::Truncate, pos + 1)
        };
        match prev {
            Some(b'2') => (Stream::Stderr, mode, pos - 1, rhs_start),
            Some(b'1') => (Stream::Stdout, mode, pos - 1, rhs_start),
            _ => (Stream::Stdout, mode, pos, rhs_start),
        }
    };

    let target = line[rhs_start..].trim();
    if target.is_empty() {
        return Err(ParseError::MissingRedirectTarget);
    }
    log::debug!(
        "redirection: {} {:?} -> {target}",
        stream.as_str(),
        mode
    );
    Ok((
        line[..lhs_end].trim(),
        Some(Redirection::new(stream, mode, target)),
    ))
}

/// Byte offset of the first redirection operator.
fn find_operator(line: &str, quote_aware: bool) -> Option<usize> {
    if !quote_aware {
        return line.find(['>', '<']);
    }

    let (mut sq, mut dq, mut esc) = (false, false, false);
    for (i, c) in line.char_indices() {
        if esc {
            esc = false;
            continue;
        }
        match c {
            '\\' if !sq => esc = true,
            '\'' if !dq => sq = !sq,
            '"' if !sq => dq = !dq,
            '>' | '<' if !sq && !dq => return Some(i),
            _ => {}
        }
    }
    None
}
