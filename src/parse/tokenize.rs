use super::ParseError;

/// Split command text into words, honoring quotes and backslash escapes.
///
/// - Single quotes: everything up to the closing quote is literal.
/// - Double quotes: only `\"`, `\\` and `\$` are unescaped; any other
///   backslash is kept together with the character after it.
/// - Unquoted: a backslash makes the next character literal.
/// - Unquoted spaces and tabs separate words; runs of them collapse.
///
/// A quoted empty string (`''` or `""`) still produces a word.
pub fn tokenize(text: &str) -> Result<Vec<String>, ParseError> {
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();
    let mut words = Vec::new();
    let mut buf = String::new();
    // Distinguishes an empty quoted word from "no word yet".
    let mut in_word = false;
    let (mut sq, mut dq) = (false, false);
    let mut i = 0;

    while i < len {
        let c = chars[i];

        if sq {
            if c == '\'' {
                sq = false;
            } else {
                buf.push(c);
            }
            i += 1;
            continue;
        }

        if c == '\\' {
            let Some(&next) = chars.get(i + 1) else {
                return Err(ParseError::DanglingEscape);
            };
            if dq && !matches!(next, '"' | '\\' | '$') {
                buf.push(c);
            }
            buf.push(next);
            in_word = true;
            i += 2;
            continue;
        }

        if dq {
            if c == '"' {
                dq = false;
            } else {
                buf.push(c);
            }
            i += 1;
            continue;
        }

        match c {
            '\'' => {
                sq = true;
                in_word = true;
            }
            '"' => {
                dq = true;
                in_word = true;
            }
            ' ' | '\t' => {
                if in_word {
                    words.push(std::mem::take(&mut buf));
                    in_word = false;
                }
            }
            _ => {
                buf.push(c);
                in_word = true;
            }
        }
        i += 1;
    }

    if sq {
        return Err(ParseError::UnterminatedQuote('\''));
    }
    if dq {
        return Err(ParseError::UnterminatedQuote('"'));
    }
    if in_word {
        words.push(buf);
    }
    Ok(words)
}

/// Split text at unquoted, unescaped `|` characters.
///
/// Quoting is tracked only to find the separators; the returned pieces keep
/// their quotes and escapes for [`tokenize`].
pub fn split_stages(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let (mut sq, mut dq, mut esc) = (false, false, false);

    for (i, c) in text.char_indices() {
        if esc {
            esc = false;
            continue;
        }
        match c {
            '\\' if !sq => esc = true,
            '\'' if !dq => sq = !sq,
            '"' if !sq => dq = !dq,
            '|' if !sq && !dq => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}
